use error_stack::{Report, ResultExt};
use serde::Deserialize;
use validator::Validate;

use application::transfer::LoginDto;
use kernel::KernelError;

use crate::controller::TryIntake;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email, length(min = 5, max = 255))]
    email: String,
    #[validate(length(min = 10, max = 255))]
    password: String,
}

pub struct Transformer;

impl TryIntake<LoginRequest> for Transformer {
    type To = LoginDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: LoginRequest) -> Result<Self::To, Self::Error> {
        input.validate().change_context(KernelError::Validation)?;
        Ok(LoginDto {
            email: input.email,
            password: input.password,
        })
    }
}
