use error_stack::{Report, ResultExt};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use application::transfer::{CreateUserDto, GetUserDto};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequest {
    #[validate(length(min = 3, max = 50))]
    name: String,
    #[validate(email, length(min = 5, max = 255))]
    email: String,
    #[validate(length(min = 10, max = 255))]
    password: String,
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
    type To = CreateUserDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        input.validate().change_context(KernelError::Validation)?;
        Ok(CreateUserDto {
            name: input.name,
            email: input.email,
            password: input.password,
        })
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetUserDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}
