use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    Validation,
    NotFound,
    OutOfStock,
    AlreadyReturned,
    DuplicateEmail,
    InvalidCredentials,
    Unauthorized,
    Forbidden,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid request payload"),
            KernelError::NotFound => write!(f, "Entity with the given ID was not found"),
            KernelError::OutOfStock => write!(f, "Movie not in stock"),
            KernelError::AlreadyReturned => write!(f, "Rental already processed"),
            KernelError::DuplicateEmail => write!(f, "Email already registered"),
            KernelError::InvalidCredentials => write!(f, "Invalid email or password"),
            KernelError::Unauthorized => write!(f, "Access denied. No valid token provided"),
            KernelError::Forbidden => write!(f, "Access denied"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
