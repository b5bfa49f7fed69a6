use crate::database::Transaction;
use crate::entity::{Movie, MovieId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError>;
    /// Returns whether a row matched.
    async fn update(
        &self,
        con: &mut Connection,
        movie: &Movie,
    ) -> error_stack::Result<bool, KernelError>;
    /// Returns whether a row matched.
    async fn delete(
        &self,
        con: &mut Connection,
        id: &MovieId,
    ) -> error_stack::Result<bool, KernelError>;
    /// Takes one copy off the shelf, conditioned on one remaining.
    /// Returns whether a row matched; a `false` here is the losing side of
    /// a race for the last copy and the caller must roll back.
    async fn decrement_stock(
        &self,
        con: &mut Connection,
        id: &MovieId,
    ) -> error_stack::Result<bool, KernelError>;
    /// Puts one copy back on the shelf.
    async fn increment_stock(
        &self,
        con: &mut Connection,
        id: &MovieId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnMovieModifier<Connection: Transaction>: 'static + Sync + Send {
    type MovieModifier: MovieModifier<Connection>;
    fn movie_modifier(&self) -> &Self::MovieModifier;
}
