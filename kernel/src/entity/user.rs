mod admin;
mod email;
mod id;
mod name;
mod password;

pub use self::{admin::*, email::*, id::*, name::*, password::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct User {
    id: UserId,
    name: UserName,
    email: UserEmail,
    password: UserPassword,
    is_admin: AdminFlag,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: UserEmail,
        password: UserPassword,
        is_admin: AdminFlag,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            is_admin,
        }
    }
}
