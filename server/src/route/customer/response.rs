use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::CustomerDto;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    id: Uuid,
    name: String,
    phone: String,
    is_gold: bool,
}

impl From<CustomerDto> for CustomerResponse {
    fn from(value: CustomerDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            phone: value.phone,
            is_gold: value.is_gold,
        }
    }
}

impl IntoResponse for CustomerResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<CustomerDto> for Presenter {
    type To = CustomerResponse;
    fn emit(&self, input: CustomerDto) -> Self::To {
        CustomerResponse::from(input)
    }
}

impl Exhaust<Option<CustomerDto>> for Presenter {
    type To = Option<CustomerResponse>;
    fn emit(&self, input: Option<CustomerDto>) -> Self::To {
        input.map(CustomerResponse::from)
    }
}

impl Exhaust<Vec<CustomerDto>> for Presenter {
    type To = Json<Vec<CustomerResponse>>;
    fn emit(&self, input: Vec<CustomerDto>) -> Self::To {
        Json::from(
            input
                .into_iter()
                .map(CustomerResponse::from)
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
