mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::auth::request::{LoginRequest, Transformer};
use crate::route::auth::response::{Presenter, TokenResponse};
use application::service::AuthService;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

pub trait AuthRouter {
    fn route_auth(self) -> Self;
}

impl AuthRouter for Router<AppModule> {
    fn route_auth(self) -> Self {
        self.route(
            "/auth",
            post(
                |State(module): State<AppModule>, Json(req): Json<LoginRequest>| async move {
                    let user = Controller::new(Transformer, Presenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .bypass(|dto| {
                            let module = module.clone();
                            async move { module.pgpool().verify_credentials(dto).await }
                        })
                        .await
                        .map_err(ErrorStatus::from)?;
                    let token = module
                        .auth()
                        .issue_token(user.id, user.is_admin)
                        .map_err(ErrorStatus::from)?;
                    Ok::<_, ErrorStatus>(Json(TokenResponse::new(token)))
                },
            ),
        )
    }
}
