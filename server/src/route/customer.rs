mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::customer::request::{
    CreateRequest, DeleteRequest, GetAllRequest, GetRequest, Transformer, UpdateRequest,
};
use crate::route::customer::response::{CustomerResponse, Presenter};
use application::service::{GetCustomerService, HandleCustomerService};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use uuid::Uuid;

pub trait CustomerRouter {
    fn route_customer(self) -> Self;
}

impl CustomerRouter for Router<AppModule> {
    fn route_customer(self) -> Self {
        self.route(
            "/customers",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().get_all_customers(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 headers: HeaderMap,
                 Json(req): Json<CreateRequest>| async move {
                    module.auth().authenticate(&headers).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.pgpool().create_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/customers/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(CustomerResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .put(
                |State(module): State<AppModule>,
                 headers: HeaderMap,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateRequest>| async move {
                    module.auth().authenticate(&headers).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .try_intake((id, req))
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| async move { module.pgpool().update_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 headers: HeaderMap,
                 Path(id): Path<Uuid>| async move {
                    module.auth().authenticate(&headers).map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteRequest::new(id))
                        .handle(|dto| async move { module.pgpool().delete_customer(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
