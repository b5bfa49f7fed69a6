mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::user::request::{CreateRequest, GetRequest, Transformer};
use crate::route::user::response::{Presenter, UserResponse};
use application::service::{CreateUserService, GetUserService};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

static AUTH_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-auth-token");

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    let user = Controller::new(Transformer, Presenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .bypass(|dto| {
                            let module = module.clone();
                            async move { module.pgpool().register_user(dto).await }
                        })
                        .await
                        .map_err(ErrorStatus::from)?;
                    let token = module
                        .auth()
                        .issue_token(user.id, user.is_admin)
                        .map_err(ErrorStatus::from)?;
                    Ok::<_, ErrorStatus>((
                        [(AUTH_TOKEN_HEADER.clone(), token)],
                        UserResponse::from(user),
                    ))
                },
            ),
        )
        .route(
            "/users/me",
            get(
                |State(module): State<AppModule>, headers: HeaderMap| async move {
                    let claims = module
                        .auth()
                        .authenticate(&headers)
                        .map_err(ErrorStatus::from)?;
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(claims.sub))
                        .handle(|dto| async move { module.pgpool().get_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(UserResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
    }
}
