use error_stack::{Report, ResultExt};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use application::transfer::{
    CreateGenreDto, DeleteGenreDto, GetAllGenreDto, GetGenreDto, UpdateGenreDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequest {
    #[validate(length(min = 4, max = 100))]
    name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequest {
    #[validate(length(min = 4, max = 100))]
    name: String,
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

// I want to use primitive type(i32) in these fields, but default attribute not supported for literals(https://github.com/serde-rs/serde/issues/368)
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
    type To = CreateGenreDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        input.validate().change_context(KernelError::Validation)?;
        Ok(CreateGenreDto { name: input.name })
    }
}

impl TryIntake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateGenreDto;
    type Error = Report<KernelError>;
    fn emit(&self, (id, input): (Uuid, UpdateRequest)) -> Result<Self::To, Self::Error> {
        input.validate().change_context(KernelError::Validation)?;
        Ok(UpdateGenreDto {
            id,
            name: input.name,
        })
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteGenreDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteGenreDto { id: input.id }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetAllGenreDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetAllGenreDto {
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetGenreDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetGenreDto { id: input.id }
    }
}
