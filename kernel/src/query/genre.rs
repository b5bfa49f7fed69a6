use crate::database::Transaction;
use crate::entity::{Genre, GenreId, SelectLimit, SelectOffset};
use crate::KernelError;

#[async_trait::async_trait]
pub trait GenreQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &GenreId,
    ) -> error_stack::Result<Option<Genre>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Connection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Genre>, KernelError>;
}

pub trait DependOnGenreQuery<Connection: Transaction>: Sync + Send + 'static {
    type GenreQuery: GenreQuery<Connection>;
    fn genre_query(&self) -> &Self::GenreQuery;
}
