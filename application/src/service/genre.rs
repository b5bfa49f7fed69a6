use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnGenreQuery, GenreQuery};
use kernel::interface::update::{DependOnGenreModifier, GenreModifier};
use kernel::prelude::entity::{Genre, GenreId, GenreName};
use kernel::KernelError;

use crate::transfer::{
    CreateGenreDto, DeleteGenreDto, GenreDto, GetAllGenreDto, GetGenreDto, UpdateGenreDto,
};

#[async_trait::async_trait]
pub trait GetGenreService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnGenreQuery<Connection>
{
    async fn get_all_genres(
        &self,
        dto: GetAllGenreDto,
    ) -> error_stack::Result<Vec<GenreDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let genres = self
            .genre_query()
            .find_all(&mut connection, &dto.limit, &dto.offset)
            .await?;

        Ok(genres.into_iter().map(GenreDto::from).collect())
    }

    async fn get_genre(
        &self,
        dto: GetGenreDto,
    ) -> error_stack::Result<Option<GenreDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = GenreId::new(dto.id);
        let genre = self.genre_query().find_by_id(&mut connection, &id).await?;

        Ok(genre.map(GenreDto::from))
    }
}

impl<Connection: Transaction + Send, T> GetGenreService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnGenreQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait HandleGenreService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnGenreModifier<Connection>
{
    async fn create_genre(
        &self,
        dto: CreateGenreDto,
    ) -> error_stack::Result<GenreDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let genre = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new(dto.name));
        self.genre_modifier().create(&mut connection, &genre).await?;

        connection.commit().await?;

        Ok(GenreDto::from(genre))
    }

    async fn update_genre(
        &self,
        dto: UpdateGenreDto,
    ) -> error_stack::Result<GenreDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let genre = Genre::new(GenreId::new(dto.id), GenreName::new(dto.name));
        let matched = self.genre_modifier().update(&mut connection, &genre).await?;
        if !matched {
            return Err(Report::new(KernelError::NotFound));
        }

        connection.commit().await?;

        Ok(GenreDto::from(genre))
    }

    async fn delete_genre(&self, dto: DeleteGenreDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = GenreId::new(dto.id);
        let matched = self.genre_modifier().delete(&mut connection, &id).await?;
        if !matched {
            return Err(Report::new(KernelError::NotFound));
        }

        connection.commit().await?;

        Ok(())
    }
}

impl<Connection: Transaction + Send, T> HandleGenreService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnGenreModifier<Connection>
{
}
