use crate::database::Transaction;
use crate::entity::{CustomerId, MovieId, Rental, RentalId, SelectLimit, SelectOffset};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
    /// Most recent rentals first.
    async fn find_all(
        &self,
        con: &mut Connection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
    /// The most recently opened rental for the pair that is still out.
    async fn find_open_by_contents(
        &self,
        con: &mut Connection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
    /// The most recently opened rental for the pair, returned or not.
    async fn find_latest_by_contents(
        &self,
        con: &mut Connection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
}

pub trait DependOnRentalQuery<Connection: Transaction>: Sync + Send + 'static {
    type RentalQuery: RentalQuery<Connection>;
    fn rental_query(&self) -> &Self::RentalQuery;
}
