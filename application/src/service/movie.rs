use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnGenreQuery, DependOnMovieQuery, GenreQuery, MovieQuery};
use kernel::interface::update::{DependOnMovieModifier, MovieModifier};
use kernel::prelude::entity::{DailyRentalRate, GenreId, Movie, MovieId, MovieStock, MovieTitle};
use kernel::KernelError;

use crate::transfer::{
    CreateMovieDto, DeleteMovieDto, GetAllMovieDto, GetMovieDto, MovieDto, UpdateMovieDto,
};

#[async_trait::async_trait]
pub trait GetMovieService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnMovieQuery<Connection>
{
    async fn get_all_movies(
        &self,
        dto: GetAllMovieDto,
    ) -> error_stack::Result<Vec<MovieDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let movies = self
            .movie_query()
            .find_all(&mut connection, &dto.limit, &dto.offset)
            .await?;

        Ok(movies.into_iter().map(MovieDto::from).collect())
    }

    async fn get_movie(
        &self,
        dto: GetMovieDto,
    ) -> error_stack::Result<Option<MovieDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = MovieId::new(dto.id);
        let movie = self.movie_query().find_by_id(&mut connection, &id).await?;

        Ok(movie.map(MovieDto::from))
    }
}

impl<Connection: Transaction + Send, T> GetMovieService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnMovieQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait HandleMovieService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnGenreQuery<Connection>
    + DependOnMovieModifier<Connection>
{
    /// The referenced genre is resolved once and embedded by value; the
    /// movie keeps that copy until its next update.
    async fn create_movie(
        &self,
        dto: CreateMovieDto,
    ) -> error_stack::Result<MovieDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let genre_id = GenreId::new(dto.genre_id);
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &genre_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable("Genre with the given ID was not found")
            })?;

        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new(dto.title),
            genre,
            MovieStock::new(dto.number_in_stock),
            DailyRentalRate::new(dto.daily_rental_rate),
        );
        self.movie_modifier().create(&mut connection, &movie).await?;

        connection.commit().await?;

        Ok(MovieDto::from(movie))
    }

    async fn update_movie(
        &self,
        dto: UpdateMovieDto,
    ) -> error_stack::Result<MovieDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let genre_id = GenreId::new(dto.genre_id);
        let genre = self
            .genre_query()
            .find_by_id(&mut connection, &genre_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable("Genre with the given ID was not found")
            })?;

        let movie = Movie::new(
            MovieId::new(dto.id),
            MovieTitle::new(dto.title),
            genre,
            MovieStock::new(dto.number_in_stock),
            DailyRentalRate::new(dto.daily_rental_rate),
        );
        let matched = self.movie_modifier().update(&mut connection, &movie).await?;
        if !matched {
            return Err(Report::new(KernelError::NotFound));
        }

        connection.commit().await?;

        Ok(MovieDto::from(movie))
    }

    async fn delete_movie(&self, dto: DeleteMovieDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = MovieId::new(dto.id);
        let matched = self.movie_modifier().delete(&mut connection, &id).await?;
        if !matched {
            return Err(Report::new(KernelError::NotFound));
        }

        connection.commit().await?;

        Ok(())
    }
}

impl<Connection: Transaction + Send, T> HandleMovieService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnGenreQuery<Connection>
        + DependOnMovieModifier<Connection>
{
}
