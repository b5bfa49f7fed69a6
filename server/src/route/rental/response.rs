use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{CustomerSnapshotDto, MovieSnapshotDto, RentalDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    id: Uuid,
    customer: CustomerField,
    movie: MovieField,
    #[serde(with = "time::serde::rfc3339")]
    rented_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    returned_at: Option<OffsetDateTime>,
    rental_fee: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CustomerField {
    id: Uuid,
    name: String,
    phone: String,
}

#[derive(Debug, Serialize)]
pub struct MovieField {
    id: Uuid,
    title: String,
    daily_rental_rate: i32,
}

impl From<CustomerSnapshotDto> for CustomerField {
    fn from(value: CustomerSnapshotDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone: value.phone,
        }
    }
}

impl From<MovieSnapshotDto> for MovieField {
    fn from(value: MovieSnapshotDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            daily_rental_rate: value.daily_rental_rate,
        }
    }
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            customer: CustomerField::from(value.customer),
            movie: MovieField::from(value.movie),
            rented_at: value.rented_at,
            returned_at: value.returned_at,
            rental_fee: value.rental_fee,
        }
    }
}

impl IntoResponse for RentalResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse(RentalResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<RentalDto> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        CreatedResponse(RentalResponse::from(input))
    }
}

impl Exhaust<Option<RentalDto>> for Presenter {
    type To = Option<RentalResponse>;
    fn emit(&self, input: Option<RentalDto>) -> Self::To {
        input.map(RentalResponse::from)
    }
}

impl Exhaust<Vec<RentalDto>> for Presenter {
    type To = Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        Json::from(
            input
                .into_iter()
                .map(RentalResponse::from)
                .collect::<Vec<_>>(),
        )
    }
}
