use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};
use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::prelude::entity::UserEmail;
use kernel::KernelError;

use crate::transfer::{LoginDto, UserDto};

#[async_trait::async_trait]
pub trait AuthService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnUserQuery<Connection>
{
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    async fn verify_credentials(
        &self,
        dto: LoginDto,
    ) -> error_stack::Result<UserDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let email = UserEmail::new(dto.email);
        let user = self
            .user_query()
            .find_by_email(&mut connection, &email)
            .await?
            .ok_or_else(|| Report::new(KernelError::InvalidCredentials))?;

        let hash = PasswordHash::new(user.password().as_ref())
            .map_err(|_| Report::new(KernelError::Internal).attach_printable("Stored hash is not PHC-formatted"))?;
        Argon2::default()
            .verify_password(dto.password.as_bytes(), &hash)
            .map_err(|_| Report::new(KernelError::InvalidCredentials))?;

        Ok(UserDto::from(user))
    }
}

impl<Connection: Transaction + Send, T> AuthService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnUserQuery<Connection>
{
}

#[cfg(test)]
mod test {
    use argon2::password_hash::PasswordHash;
    use argon2::{Argon2, PasswordVerifier};

    use crate::service::user::hash_password;

    #[test]
    fn hashed_password_verifies_and_salts_differ() {
        let first = hash_password("correct horse battery").unwrap();
        let second = hash_password("correct horse battery").unwrap();
        assert_ne!(first, second);

        let hash = PasswordHash::new(first.as_ref()).unwrap();
        assert!(Argon2::default()
            .verify_password(b"correct horse battery", &hash)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong password", &hash)
            .is_err());
    }
}
