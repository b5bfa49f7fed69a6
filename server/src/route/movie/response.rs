use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{GenreDto, MovieDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    id: Uuid,
    title: String,
    genre: GenreField,
    number_in_stock: i32,
    daily_rental_rate: i32,
}

#[derive(Debug, Serialize)]
pub struct GenreField {
    id: Uuid,
    name: String,
}

impl From<GenreDto> for GenreField {
    fn from(value: GenreDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<MovieDto> for MovieResponse {
    fn from(value: MovieDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            genre: GenreField::from(value.genre),
            number_in_stock: value.number_in_stock,
            daily_rental_rate: value.daily_rental_rate,
        }
    }
}

impl IntoResponse for MovieResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<MovieDto> for Presenter {
    type To = MovieResponse;
    fn emit(&self, input: MovieDto) -> Self::To {
        MovieResponse::from(input)
    }
}

impl Exhaust<Option<MovieDto>> for Presenter {
    type To = Option<MovieResponse>;
    fn emit(&self, input: Option<MovieDto>) -> Self::To {
        input.map(MovieResponse::from)
    }
}

impl Exhaust<Vec<MovieDto>> for Presenter {
    type To = Json<Vec<MovieResponse>>;
    fn emit(&self, input: Vec<MovieDto>) -> Self::To {
        Json::from(
            input
                .into_iter()
                .map(MovieResponse::from)
                .collect::<Vec<_>>(),
        )
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::OK
    }
}
