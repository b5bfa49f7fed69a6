use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{
    Customer, CustomerId, CustomerName, CustomerPhone, GoldStatus, SelectLimit, SelectOffset,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::{ConvertError, DriverError};

pub struct PostgresCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery<PostgresTransaction> for PostgresCustomerRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        PgCustomerInternal::find_by_id(con, id).await.convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        PgCustomerInternal::find_all(con, limit, offset)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl CustomerModifier<PostgresTransaction> for PostgresCustomerRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        PgCustomerInternal::create(con, customer).await.convert_error()
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        customer: &Customer,
    ) -> error_stack::Result<bool, KernelError> {
        PgCustomerInternal::update(con, customer).await.convert_error()
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<bool, KernelError> {
        PgCustomerInternal::delete(con, id).await.convert_error()
    }
}

impl DependOnCustomerQuery<PostgresTransaction> for PostgresDatabase {
    type CustomerQuery = PostgresCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &PostgresCustomerRepository
    }
}

impl DependOnCustomerModifier<PostgresTransaction> for PostgresDatabase {
    type CustomerModifier = PostgresCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &PostgresCustomerRepository
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    phone: String,
    is_gold: bool,
}

impl From<CustomerRow> for Customer {
    fn from(value: CustomerRow) -> Self {
        Customer::new(
            CustomerId::new(value.id),
            CustomerName::new(value.name),
            CustomerPhone::new(value.phone),
            GoldStatus::new(value.is_gold),
        )
    }
}

pub(in crate::database) struct PgCustomerInternal;

impl PgCustomerInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CustomerId,
    ) -> Result<Option<Customer>, DriverError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, name, phone, is_gold
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Customer::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> Result<Vec<Customer>, DriverError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            // language=postgresql
            r#"
            SELECT id, name, phone, is_gold
            FROM customers
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn create(con: &mut PgConnection, customer: &Customer) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO customers (id, name, phone, is_gold)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.phone().as_ref())
        .bind(customer.is_gold().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, customer: &Customer) -> Result<bool, DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE customers
            SET name = $2, phone = $3, is_gold = $4
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.phone().as_ref())
        .bind(customer.is_gold().as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(con: &mut PgConnection, id: &CustomerId) -> Result<bool, DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::CustomerQuery;
    use kernel::interface::update::CustomerModifier;
    use kernel::prelude::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, GoldStatus,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresCustomerRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = CustomerId::new(uuid::Uuid::new_v4());

        let customer = Customer::new(
            id.clone(),
            CustomerName::new("customer"),
            CustomerPhone::new("12345"),
            GoldStatus::default(),
        );
        PostgresCustomerRepository.create(&mut con, &customer).await?;

        let found = PostgresCustomerRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(customer.clone()));

        let customer = customer.reconstruct(|c| c.is_gold = GoldStatus::new(true));
        let matched = PostgresCustomerRepository.update(&mut con, &customer).await?;
        assert!(matched);

        let found = PostgresCustomerRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(customer));

        let matched = PostgresCustomerRepository.delete(&mut con, &id).await?;
        assert!(matched);

        let found = PostgresCustomerRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }
}
