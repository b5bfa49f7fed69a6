use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateRentalDto, GetAllRentalDto, GetRentalDto};
use kernel::prelude::entity::{SelectLimit, SelectOffset};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct RentRequest {
    customer_id: Uuid,
    movie_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    #[serde(default)]
    limit: SelectLimit,
    #[serde(default)]
    offset: SelectOffset,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<RentRequest> for Transformer {
    type To = CreateRentalDto;
    fn emit(&self, RentRequest { customer_id, movie_id }: RentRequest) -> Self::To {
        CreateRentalDto {
            customer_id,
            movie_id,
        }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetAllRentalDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetAllRentalDto {
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetRentalDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetRentalDto { id: input.id }
    }
}
