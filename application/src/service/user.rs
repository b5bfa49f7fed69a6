use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{AdminFlag, User, UserEmail, UserId, UserName, UserPassword};
use kernel::KernelError;

use crate::transfer::{CreateUserDto, GetUserDto, UserDto};

pub(in crate::service) fn hash_password(
    password: &str,
) -> error_stack::Result<UserPassword, KernelError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| Report::new(KernelError::Internal).attach_printable("Failed to hash password"))?
        .to_string();
    Ok(UserPassword::new(hash))
}

#[async_trait::async_trait]
pub trait GetUserService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnUserQuery<Connection>
{
    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<Option<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = UserId::new(dto.id);
        let user = self.user_query().find_by_id(&mut connection, &id).await?;

        Ok(user.map(UserDto::from))
    }
}

impl<Connection: Transaction + Send, T> GetUserService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnUserQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateUserService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnUserQuery<Connection>
    + DependOnUserModifier<Connection>
{
    async fn register_user(&self, dto: CreateUserDto) -> error_stack::Result<UserDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let email = UserEmail::new(dto.email);
        let registered = self
            .user_query()
            .find_by_email(&mut connection, &email)
            .await?;
        if registered.is_some() {
            return Err(Report::new(KernelError::DuplicateEmail));
        }

        let password = hash_password(&dto.password)?;
        let user = User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new(dto.name),
            email,
            password,
            AdminFlag::default(),
        );
        self.user_modifier().create(&mut connection, &user).await?;

        connection.commit().await?;

        Ok(UserDto::from(user))
    }
}

impl<Connection: Transaction + Send, T> CreateUserService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnUserQuery<Connection>
        + DependOnUserModifier<Connection>
{
}
