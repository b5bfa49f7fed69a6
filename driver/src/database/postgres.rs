use std::ops::{Deref, DerefMut};

use error_stack::Report;
use sqlx::{Error, PgConnection, PgPool, Postgres};
use tracing::info;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::{ConvertError, DriverError};

pub use self::{customer::*, genre::*, movie::*, rental::*, user::*};

mod customer;
mod genre;
mod movie;
mod rental;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";

pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL).convert_error()?;
        let pool = PgPool::connect(&url).await.convert_error()?;
        migrate(&pool).await.convert_error()?;
        Ok(Self { pool })
    }
}

/// One unit of work. Every use case runs inside exactly one of these, so
/// the rental insert and the stock decrement (or the rental close and the
/// stock increment) commit together or not at all.
pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<PostgresTransaction> for PostgresDatabase {
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(con))
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            Error::PoolTimedOut => Report::from(error).change_context(KernelError::Timeout),
            _ => Report::from(error).change_context(KernelError::Internal),
        })
    }
}

impl<T> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            DriverError::SqlX(Error::PoolTimedOut) => {
                Report::from(error).change_context(KernelError::Timeout)
            }
            _ => Report::from(error).change_context(KernelError::Internal),
        })
    }
}

async fn migrate(pool: &PgPool) -> Result<(), Error> {
    info!("Ensuring database schema");
    sqlx::query(
        // language=postgresql
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id UUID PRIMARY KEY,
            name VARCHAR(100) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        // language=postgresql
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY,
            name VARCHAR(50) NOT NULL,
            phone VARCHAR(50) NOT NULL,
            is_gold BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        // language=postgresql
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            id UUID PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            genre_id UUID NOT NULL,
            genre_name VARCHAR(100) NOT NULL,
            number_in_stock INTEGER NOT NULL CHECK (number_in_stock >= 0),
            daily_rental_rate INTEGER NOT NULL CHECK (daily_rental_rate >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        // language=postgresql
        r#"
        CREATE TABLE IF NOT EXISTS rentals (
            id UUID PRIMARY KEY,
            customer_id UUID NOT NULL,
            customer_name VARCHAR(50) NOT NULL,
            customer_phone VARCHAR(50) NOT NULL,
            movie_id UUID NOT NULL,
            movie_title VARCHAR(255) NOT NULL,
            daily_rental_rate INTEGER NOT NULL,
            rented_at TIMESTAMPTZ NOT NULL,
            returned_at TIMESTAMPTZ,
            rental_fee BIGINT
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        // language=postgresql
        r#"
        CREATE INDEX IF NOT EXISTS idx_rentals_contents ON rentals (customer_id, movie_id)
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        // language=postgresql
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name VARCHAR(50) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL,
            is_admin BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
