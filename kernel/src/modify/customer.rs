use crate::database::Transaction;
use crate::entity::{Customer, CustomerId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CustomerModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError>;
    /// Returns whether a row matched.
    async fn update(
        &self,
        con: &mut Connection,
        customer: &Customer,
    ) -> error_stack::Result<bool, KernelError>;
    /// Returns whether a row matched.
    async fn delete(
        &self,
        con: &mut Connection,
        id: &CustomerId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnCustomerModifier<Connection: Transaction>: 'static + Sync + Send {
    type CustomerModifier: CustomerModifier<Connection>;
    fn customer_modifier(&self) -> &Self::CustomerModifier;
}
