use error_stack::{Report, ResultExt};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use application::transfer::{
    CreateMovieDto, DeleteMovieDto, GetAllMovieDto, GetMovieDto, UpdateMovieDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequest {
    #[validate(length(min = 3, max = 255))]
    title: String,
    genre_id: Uuid,
    #[validate(range(min = 0, max = 255))]
    number_in_stock: i32,
    #[validate(range(min = 0, max = 255))]
    daily_rental_rate: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequest {
    #[validate(length(min = 3, max = 255))]
    title: String,
    genre_id: Uuid,
    #[validate(range(min = 0, max = 255))]
    number_in_stock: i32,
    #[validate(range(min = 0, max = 255))]
    daily_rental_rate: i32,
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
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

impl TryIntake<CreateRequest> for Transformer {
    type To = CreateMovieDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        input.validate().change_context(KernelError::Validation)?;
        Ok(CreateMovieDto {
            title: input.title,
            genre_id: input.genre_id,
            number_in_stock: input.number_in_stock,
            daily_rental_rate: input.daily_rental_rate,
        })
    }
}

impl TryIntake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateMovieDto;
    type Error = Report<KernelError>;
    fn emit(&self, (id, input): (Uuid, UpdateRequest)) -> Result<Self::To, Self::Error> {
        input.validate().change_context(KernelError::Validation)?;
        Ok(UpdateMovieDto {
            id,
            title: input.title,
            genre_id: input.genre_id,
            number_in_stock: input.number_in_stock,
            daily_rental_rate: input.daily_rental_rate,
        })
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteMovieDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteMovieDto { id: input.id }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetAllMovieDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetAllMovieDto {
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetMovieDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetMovieDto { id: input.id }
    }
}
