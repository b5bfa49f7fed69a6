use error_stack::{Report, ResultExt};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use application::transfer::{
    CreateCustomerDto, DeleteCustomerDto, GetAllCustomerDto, GetCustomerDto, UpdateCustomerDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequest {
    #[validate(length(min = 3, max = 50))]
    name: String,
    #[validate(length(min = 5, max = 50))]
    phone: String,
    #[serde(default)]
    is_gold: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequest {
    #[validate(length(min = 3, max = 50))]
    name: String,
    #[validate(length(min = 5, max = 50))]
    phone: String,
    #[serde(default)]
    is_gold: bool,
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
    type To = CreateCustomerDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        input.validate().change_context(KernelError::Validation)?;
        Ok(CreateCustomerDto {
            name: input.name,
            phone: input.phone,
            is_gold: input.is_gold,
        })
    }
}

impl TryIntake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateCustomerDto;
    type Error = Report<KernelError>;
    fn emit(&self, (id, input): (Uuid, UpdateRequest)) -> Result<Self::To, Self::Error> {
        input.validate().change_context(KernelError::Validation)?;
        Ok(UpdateCustomerDto {
            id,
            name: input.name,
            phone: input.phone,
            is_gold: input.is_gold,
        })
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteCustomerDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteCustomerDto { id: input.id }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetAllCustomerDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetAllCustomerDto {
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetCustomerDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetCustomerDto { id: input.id }
    }
}
