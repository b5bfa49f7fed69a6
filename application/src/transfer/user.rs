use kernel::prelude::entity::{DestructUser, User};
use uuid::Uuid;

/// The password hash stays behind; this is what leaves the service layer.
#[derive(Debug, Clone)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            is_admin,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            is_admin: is_admin.into(),
        }
    }
}

#[derive(Debug)]
pub struct GetUserDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}
