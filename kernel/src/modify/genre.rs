use crate::database::Transaction;
use crate::entity::{Genre, GenreId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait GenreModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        genre: &Genre,
    ) -> error_stack::Result<(), KernelError>;
    /// Returns whether a row matched.
    async fn update(
        &self,
        con: &mut Connection,
        genre: &Genre,
    ) -> error_stack::Result<bool, KernelError>;
    /// Returns whether a row matched.
    async fn delete(
        &self,
        con: &mut Connection,
        id: &GenreId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnGenreModifier<Connection: Transaction>: 'static + Sync + Send {
    type GenreModifier: GenreModifier<Connection>;
    fn genre_modifier(&self) -> &Self::GenreModifier;
}
