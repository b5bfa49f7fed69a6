use crate::database::Transaction;
use crate::entity::{Rental, RentalFee, RentalId, ReturnedAt};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError>;
    /// Writes the return time and the fee together, conditioned on the
    /// rental still being open. Returns whether a row matched; a `false`
    /// means a concurrent return already closed it.
    async fn mark_returned(
        &self,
        con: &mut Connection,
        id: &RentalId,
        returned_at: &ReturnedAt,
        rental_fee: &RentalFee,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnRentalModifier<Connection: Transaction>: 'static + Sync + Send {
    type RentalModifier: RentalModifier<Connection>;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
