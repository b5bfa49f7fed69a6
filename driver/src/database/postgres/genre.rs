use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::{DependOnGenreQuery, GenreQuery};
use kernel::interface::update::{DependOnGenreModifier, GenreModifier};
use kernel::prelude::entity::{Genre, GenreId, GenreName, SelectLimit, SelectOffset};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::{ConvertError, DriverError};

pub struct PostgresGenreRepository;

#[async_trait::async_trait]
impl GenreQuery<PostgresTransaction> for PostgresGenreRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &GenreId,
    ) -> error_stack::Result<Option<Genre>, KernelError> {
        PgGenreInternal::find_by_id(con, id).await.convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Genre>, KernelError> {
        PgGenreInternal::find_all(con, limit, offset)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl GenreModifier<PostgresTransaction> for PostgresGenreRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        genre: &Genre,
    ) -> error_stack::Result<(), KernelError> {
        PgGenreInternal::create(con, genre).await.convert_error()
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        genre: &Genre,
    ) -> error_stack::Result<bool, KernelError> {
        PgGenreInternal::update(con, genre).await.convert_error()
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        id: &GenreId,
    ) -> error_stack::Result<bool, KernelError> {
        PgGenreInternal::delete(con, id).await.convert_error()
    }
}

impl DependOnGenreQuery<PostgresTransaction> for PostgresDatabase {
    type GenreQuery = PostgresGenreRepository;
    fn genre_query(&self) -> &Self::GenreQuery {
        &PostgresGenreRepository
    }
}

impl DependOnGenreModifier<PostgresTransaction> for PostgresDatabase {
    type GenreModifier = PostgresGenreRepository;
    fn genre_modifier(&self) -> &Self::GenreModifier {
        &PostgresGenreRepository
    }
}

#[derive(sqlx::FromRow)]
struct GenreRow {
    id: Uuid,
    name: String,
}

impl From<GenreRow> for Genre {
    fn from(value: GenreRow) -> Self {
        Genre::new(GenreId::new(value.id), GenreName::new(value.name))
    }
}

pub(in crate::database) struct PgGenreInternal;

impl PgGenreInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &GenreId,
    ) -> Result<Option<Genre>, DriverError> {
        let row = sqlx::query_as::<_, GenreRow>(
            // language=postgresql
            r#"
            SELECT id, name
            FROM genres
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Genre::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> Result<Vec<Genre>, DriverError> {
        let rows = sqlx::query_as::<_, GenreRow>(
            // language=postgresql
            r#"
            SELECT id, name
            FROM genres
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }

    async fn create(con: &mut PgConnection, genre: &Genre) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO genres (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(genre.id().as_ref())
        .bind(genre.name().as_ref())
        .execute(con)
        .await?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, genre: &Genre) -> Result<bool, DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE genres
            SET name = $2
            WHERE id = $1
            "#,
        )
        .bind(genre.id().as_ref())
        .bind(genre.name().as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(con: &mut PgConnection, id: &GenreId) -> Result<bool, DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM genres
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::GenreQuery;
    use kernel::interface::update::GenreModifier;
    use kernel::prelude::entity::{Genre, GenreId, GenreName};
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresGenreRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let id = GenreId::new(uuid::Uuid::new_v4());

        let genre = Genre::new(id.clone(), GenreName::new("thriller"));
        PostgresGenreRepository.create(&mut con, &genre).await?;

        let found = PostgresGenreRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(genre.clone()));

        let genre = genre.reconstruct(|g| g.name = GenreName::new("horror"));
        let matched = PostgresGenreRepository.update(&mut con, &genre).await?;
        assert!(matched);

        let found = PostgresGenreRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(genre));

        let matched = PostgresGenreRepository.delete(&mut con, &id).await?;
        assert!(matched);

        let found = PostgresGenreRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }
}
