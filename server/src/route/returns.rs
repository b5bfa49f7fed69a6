mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::returns::request::{ReturnRequest, Transformer};
use crate::route::returns::response::Presenter;
use application::service::ReturnService;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};

pub trait ReturnRouter {
    fn route_return(self) -> Self;
}

impl ReturnRouter for Router<AppModule> {
    fn route_return(self) -> Self {
        self.route(
            "/returns",
            post(
                |State(module): State<AppModule>,
                 headers: HeaderMap,
                 Json(req): Json<ReturnRequest>| async move {
                    module.auth().authenticate(&headers).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().return_movie(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
