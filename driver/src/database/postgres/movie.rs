use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{DependOnMovieQuery, MovieQuery};
use kernel::interface::update::{DependOnMovieModifier, MovieModifier};
use kernel::prelude::entity::{
    DailyRentalRate, Genre, GenreId, GenreName, Movie, MovieId, MovieStock, MovieTitle,
    SelectLimit, SelectOffset,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::{ConvertError, DriverError};

pub struct PostgresMovieRepository;

#[async_trait::async_trait]
impl MovieQuery<PostgresTransaction> for PostgresMovieRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        PgMovieInternal::find_by_id(con, id).await.convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Movie>, KernelError> {
        PgMovieInternal::find_all(con, limit, offset)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl MovieModifier<PostgresTransaction> for PostgresMovieRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::create(con, movie).await.convert_error()
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        movie: &Movie,
    ) -> error_stack::Result<bool, KernelError> {
        PgMovieInternal::update(con, movie).await.convert_error()
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        PgMovieInternal::delete(con, id).await.convert_error()
    }

    async fn decrement_stock(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        PgMovieInternal::decrement_stock(con, id).await.convert_error()
    }

    async fn increment_stock(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::increment_stock(con, id).await.convert_error()
    }
}

impl DependOnMovieQuery<PostgresTransaction> for PostgresDatabase {
    type MovieQuery = PostgresMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &PostgresMovieRepository
    }
}

impl DependOnMovieModifier<PostgresTransaction> for PostgresDatabase {
    type MovieModifier = PostgresMovieRepository;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        &PostgresMovieRepository
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    genre_id: Uuid,
    genre_name: String,
    number_in_stock: i32,
    daily_rental_rate: i32,
}

impl From<MovieRow> for Movie {
    fn from(value: MovieRow) -> Self {
        Movie::new(
            MovieId::new(value.id),
            MovieTitle::new(value.title),
            Genre::new(GenreId::new(value.genre_id), GenreName::new(value.genre_name)),
            MovieStock::new(value.number_in_stock),
            DailyRentalRate::new(value.daily_rental_rate),
        )
    }
}

pub(in crate::database) struct PgMovieInternal;

impl PgMovieInternal {
    async fn find_by_id(con: &mut PgConnection, id: &MovieId) -> Result<Option<Movie>, DriverError> {
        let row = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, title, genre_id, genre_name, number_in_stock, daily_rental_rate
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Movie::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> Result<Vec<Movie>, DriverError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, title, genre_id, genre_name, number_in_stock, daily_rental_rate
            FROM movies
            ORDER BY title
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn create(con: &mut PgConnection, movie: &Movie) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO movies (id, title, genre_id, genre_name, number_in_stock, daily_rental_rate)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.genre().id().as_ref())
        .bind(movie.genre().name().as_ref())
        .bind(movie.number_in_stock().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, movie: &Movie) -> Result<bool, DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE movies
            SET title = $2, genre_id = $3, genre_name = $4, number_in_stock = $5, daily_rental_rate = $6
            WHERE id = $1
            "#,
        )
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.genre().id().as_ref())
        .bind(movie.genre().name().as_ref())
        .bind(movie.number_in_stock().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(con: &mut PgConnection, id: &MovieId) -> Result<bool, DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn decrement_stock(con: &mut PgConnection, id: &MovieId) -> Result<bool, DriverError> {
        // The row lock this takes serializes concurrent checkouts of the
        // same movie; the re-evaluated predicate fails the loser.
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock - 1
            WHERE id = $1 AND number_in_stock > 0
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_stock(con: &mut PgConnection, id: &MovieId) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock + 1
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::MovieQuery;
    use kernel::interface::update::MovieModifier;
    use kernel::prelude::entity::{
        DailyRentalRate, Genre, GenreId, GenreName, Movie, MovieId, MovieStock, MovieTitle,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresMovieRepository};

    fn movie(id: MovieId, stock: i32) -> Movie {
        Movie::new(
            id,
            MovieTitle::new("movie"),
            Genre::new(GenreId::new(uuid::Uuid::new_v4()), GenreName::new("genre")),
            MovieStock::new(stock),
            DailyRentalRate::new(2),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = MovieId::new(uuid::Uuid::new_v4());

        let movie = movie(id.clone(), 1);
        PostgresMovieRepository.create(&mut con, &movie).await?;

        let found = PostgresMovieRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(movie.clone()));

        let movie = movie.reconstruct(|m| m.title = MovieTitle::new("retitled"));
        let matched = PostgresMovieRepository.update(&mut con, &movie).await?;
        assert!(matched);

        let matched = PostgresMovieRepository.delete(&mut con, &id).await?;
        assert!(matched);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn decrement_is_conditioned_on_remaining_stock(
    ) -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = MovieId::new(uuid::Uuid::new_v4());

        PostgresMovieRepository
            .create(&mut con, &movie(id.clone(), 1))
            .await?;

        let matched = PostgresMovieRepository.decrement_stock(&mut con, &id).await?;
        assert!(matched);

        // Shelf is empty now; the conditional update must not match.
        let matched = PostgresMovieRepository.decrement_stock(&mut con, &id).await?;
        assert!(!matched);

        let found = PostgresMovieRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found.map(|m| *m.number_in_stock().as_ref()), Some(0));

        PostgresMovieRepository.increment_stock(&mut con, &id).await?;
        let found = PostgresMovieRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found.map(|m| *m.number_in_stock().as_ref()), Some(1));
        Ok(())
    }
}
