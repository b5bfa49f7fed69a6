use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::GenreDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    id: Uuid,
    name: String,
}

impl From<GenreDto> for GenreResponse {
    fn from(value: GenreDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl IntoResponse for GenreResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<GenreDto> for Presenter {
    type To = GenreResponse;
    fn emit(&self, input: GenreDto) -> Self::To {
        GenreResponse::from(input)
    }
}

impl Exhaust<Option<GenreDto>> for Presenter {
    type To = Option<GenreResponse>;
    fn emit(&self, input: Option<GenreDto>) -> Self::To {
        input.map(GenreResponse::from)
    }
}

impl Exhaust<Vec<GenreDto>> for Presenter {
    type To = Json<Vec<GenreResponse>>;
    fn emit(&self, input: Vec<GenreDto>) -> Self::To {
        Json::from(input.into_iter().map(GenreResponse::from).collect::<Vec<_>>())
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::OK
    }
}
