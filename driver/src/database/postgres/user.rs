use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{AdminFlag, User, UserEmail, UserId, UserName, UserPassword};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::{ConvertError, DriverError};

pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery<PostgresTransaction> for PostgresUserRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con, id).await.convert_error()
    }

    async fn find_by_email(
        &self,
        con: &mut PostgresTransaction,
        email: &UserEmail,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_email(con, email).await.convert_error()
    }
}

#[async_trait::async_trait]
impl UserModifier<PostgresTransaction> for PostgresUserRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::create(con, user).await.convert_error()
    }
}

impl DependOnUserQuery<PostgresTransaction> for PostgresDatabase {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier<PostgresTransaction> for PostgresDatabase {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password: String,
    is_admin: bool,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        User::new(
            UserId::new(value.id),
            UserName::new(value.name),
            UserEmail::new(value.email),
            UserPassword::new(value.password),
            AdminFlag::new(value.is_admin),
        )
    }
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_by_id(con: &mut PgConnection, id: &UserId) -> Result<Option<User>, DriverError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email, password, is_admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(
        con: &mut PgConnection,
        email: &UserEmail,
    ) -> Result<Option<User>, DriverError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, email, password, is_admin
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(User::from))
    }

    async fn create(con: &mut PgConnection, user: &User) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO users (id, name, email, password, is_admin)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_ref())
        .bind(user.name().as_ref())
        .bind(user.email().as_ref())
        .bind(user.password().as_ref())
        .bind(user.is_admin().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::UserQuery;
    use kernel::interface::update::UserModifier;
    use kernel::prelude::entity::{AdminFlag, User, UserEmail, UserId, UserName, UserPassword};
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresUserRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = UserId::new(uuid::Uuid::new_v4());
        let email = UserEmail::new(format!("{}@example.com", uuid::Uuid::new_v4()));

        let user = User::new(
            id.clone(),
            UserName::new("user"),
            email.clone(),
            UserPassword::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$hash"),
            AdminFlag::default(),
        );
        PostgresUserRepository.create(&mut con, &user).await?;

        let found = PostgresUserRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(user.clone()));

        let found = PostgresUserRepository.find_by_email(&mut con, &email).await?;
        assert_eq!(found, Some(user));
        Ok(())
    }
}
