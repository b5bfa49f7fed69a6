use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{Customer, CustomerId, CustomerName, CustomerPhone, GoldStatus};
use kernel::KernelError;

use crate::transfer::{
    CreateCustomerDto, CustomerDto, DeleteCustomerDto, GetAllCustomerDto, GetCustomerDto,
    UpdateCustomerDto,
};

#[async_trait::async_trait]
pub trait GetCustomerService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnCustomerQuery<Connection>
{
    async fn get_all_customers(
        &self,
        dto: GetAllCustomerDto,
    ) -> error_stack::Result<Vec<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customers = self
            .customer_query()
            .find_all(&mut connection, &dto.limit, &dto.offset)
            .await?;

        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }

    async fn get_customer(
        &self,
        dto: GetCustomerDto,
    ) -> error_stack::Result<Option<CustomerDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = CustomerId::new(dto.id);
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &id)
            .await?;

        Ok(customer.map(CustomerDto::from))
    }
}

impl<Connection: Transaction + Send, T> GetCustomerService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnCustomerQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait HandleCustomerService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnCustomerModifier<Connection>
{
    async fn create_customer(
        &self,
        dto: CreateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new(dto.name),
            CustomerPhone::new(dto.phone),
            GoldStatus::new(dto.is_gold),
        );
        self.customer_modifier()
            .create(&mut connection, &customer)
            .await?;

        connection.commit().await?;

        Ok(CustomerDto::from(customer))
    }

    async fn update_customer(
        &self,
        dto: UpdateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customer = Customer::new(
            CustomerId::new(dto.id),
            CustomerName::new(dto.name),
            CustomerPhone::new(dto.phone),
            GoldStatus::new(dto.is_gold),
        );
        let matched = self
            .customer_modifier()
            .update(&mut connection, &customer)
            .await?;
        if !matched {
            return Err(Report::new(KernelError::NotFound));
        }

        connection.commit().await?;

        Ok(CustomerDto::from(customer))
    }

    async fn delete_customer(
        &self,
        dto: DeleteCustomerDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = CustomerId::new(dto.id);
        let matched = self
            .customer_modifier()
            .delete(&mut connection, &id)
            .await?;
        if !matched {
            return Err(Report::new(KernelError::NotFound));
        }

        connection.commit().await?;

        Ok(())
    }
}

impl<Connection: Transaction + Send, T> HandleCustomerService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnCustomerModifier<Connection>
{
}
