use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{
    CustomerId, CustomerName, CustomerPhone, CustomerSnapshot, DailyRentalRate, MovieId,
    MovieSnapshot, MovieTitle, Rental, RentalFee, RentalId, RentedAt, ReturnedAt, SelectLimit,
    SelectOffset,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::{ConvertError, DriverError};

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery<PostgresTransaction> for PostgresRentalRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await.convert_error()
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con, limit, offset)
            .await
            .convert_error()
    }

    async fn find_open_by_contents(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_open_by_contents(con, customer_id, movie_id)
            .await
            .convert_error()
    }

    async fn find_latest_by_contents(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_latest_by_contents(con, customer_id, movie_id)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl RentalModifier<PostgresTransaction> for PostgresRentalRepository {
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await.convert_error()
    }

    async fn mark_returned(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
        returned_at: &ReturnedAt,
        rental_fee: &RentalFee,
    ) -> error_stack::Result<bool, KernelError> {
        PgRentalInternal::mark_returned(con, id, returned_at, rental_fee)
            .await
            .convert_error()
    }
}

impl DependOnRentalQuery<PostgresTransaction> for PostgresDatabase {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &PostgresRentalRepository
    }
}

impl DependOnRentalModifier<PostgresTransaction> for PostgresDatabase {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &PostgresRentalRepository
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    customer_id: Uuid,
    customer_name: String,
    customer_phone: String,
    movie_id: Uuid,
    movie_title: String,
    daily_rental_rate: i32,
    rented_at: OffsetDateTime,
    returned_at: Option<OffsetDateTime>,
    rental_fee: Option<i64>,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.id),
            CustomerSnapshot::new(
                CustomerId::new(value.customer_id),
                CustomerName::new(value.customer_name),
                CustomerPhone::new(value.customer_phone),
            ),
            MovieSnapshot::new(
                MovieId::new(value.movie_id),
                MovieTitle::new(value.movie_title),
                DailyRentalRate::new(value.daily_rental_rate),
            ),
            RentedAt::new(value.rented_at),
            value.returned_at.map(ReturnedAt::new),
            value.rental_fee.map(RentalFee::new),
        )
    }
}

static RENTAL_COLUMNS: &str = "id, customer_id, customer_name, customer_phone, movie_id, movie_title, daily_rental_rate, rented_at, returned_at, rental_fee";

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> Result<Option<Rental>, DriverError> {
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            // language=postgresql
            r#"
            SELECT {RENTAL_COLUMNS}
            FROM rentals
            WHERE id = $1
            "#,
        ))
        .bind(id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Rental::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        limit: &SelectLimit,
        offset: &SelectOffset,
    ) -> Result<Vec<Rental>, DriverError> {
        let rows = sqlx::query_as::<_, RentalRow>(&format!(
            // language=postgresql
            r#"
            SELECT {RENTAL_COLUMNS}
            FROM rentals
            ORDER BY rented_at DESC
            LIMIT $1 OFFSET $2
            "#,
        ))
        .bind(limit.as_ref())
        .bind(offset.as_ref())
        .fetch_all(con)
        .await?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn find_open_by_contents(
        con: &mut PgConnection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> Result<Option<Rental>, DriverError> {
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            // language=postgresql
            r#"
            SELECT {RENTAL_COLUMNS}
            FROM rentals
            WHERE customer_id = $1 AND movie_id = $2 AND returned_at IS NULL
            ORDER BY rented_at DESC
            LIMIT 1
            "#,
        ))
        .bind(customer_id.as_ref())
        .bind(movie_id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Rental::from))
    }

    async fn find_latest_by_contents(
        con: &mut PgConnection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> Result<Option<Rental>, DriverError> {
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            // language=postgresql
            r#"
            SELECT {RENTAL_COLUMNS}
            FROM rentals
            WHERE customer_id = $1 AND movie_id = $2
            ORDER BY rented_at DESC
            LIMIT 1
            "#,
        ))
        .bind(customer_id.as_ref())
        .bind(movie_id.as_ref())
        .fetch_optional(con)
        .await?;
        Ok(row.map(Rental::from))
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> Result<(), DriverError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rentals (id, customer_id, customer_name, customer_phone, movie_id, movie_title, daily_rental_rate, rented_at, returned_at, rental_fee)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.customer().id().as_ref())
        .bind(rental.customer().name().as_ref())
        .bind(rental.customer().phone().as_ref())
        .bind(rental.movie().id().as_ref())
        .bind(rental.movie().title().as_ref())
        .bind(rental.movie().daily_rental_rate().as_ref())
        .bind(rental.rented_at().as_ref())
        .bind(rental.returned_at().as_ref().map(AsRef::as_ref))
        .bind(rental.rental_fee().as_ref().map(AsRef::as_ref))
        .execute(con)
        .await?;
        Ok(())
    }

    async fn mark_returned(
        con: &mut PgConnection,
        id: &RentalId,
        returned_at: &ReturnedAt,
        rental_fee: &RentalFee,
    ) -> Result<bool, DriverError> {
        // The open-state predicate is the duplicate-return guard: a rental
        // leaves the checked-out state exactly once, even under races.
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE rentals
            SET returned_at = $2, rental_fee = $3
            WHERE id = $1 AND returned_at IS NULL
            "#,
        )
        .bind(id.as_ref())
        .bind(returned_at.as_ref())
        .bind(rental_fee.as_ref())
        .execute(con)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use time::OffsetDateTime;

    use application::service::{RentalService, ReturnService};
    use application::transfer::{CreateRentalDto, ReturnRentalDto};
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{MovieQuery, RentalQuery};
    use kernel::interface::update::{CustomerModifier, MovieModifier, RentalModifier};
    use kernel::prelude::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, Genre, GenreId,
        GenreName, GoldStatus, Movie, MovieId, MovieStock, MovieTitle, Rental, RentalFee,
        RentalId, ReturnedAt,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresCustomerRepository, PostgresDatabase, PostgresMovieRepository,
        PostgresRentalRepository, PostgresTransaction,
    };

    fn customer() -> Customer {
        Customer::new(
            CustomerId::new(uuid::Uuid::new_v4()),
            CustomerName::new("customer"),
            CustomerPhone::new("12345"),
            GoldStatus::default(),
        )
    }

    fn movie(stock: i32, rate: i32) -> Movie {
        Movie::new(
            MovieId::new(uuid::Uuid::new_v4()),
            MovieTitle::new("movie"),
            Genre::new(GenreId::new(uuid::Uuid::new_v4()), GenreName::new("genre")),
            MovieStock::new(stock),
            DailyRentalRate::new(rate),
        )
    }

    async fn seed(
        con: &mut PostgresTransaction,
        customer: &Customer,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        PostgresCustomerRepository.create(con, customer).await?;
        PostgresMovieRepository.create(con, movie).await?;
        Ok(())
    }

    async fn stock_of(
        db: &PostgresDatabase,
        id: &MovieId,
    ) -> error_stack::Result<i32, KernelError> {
        let mut con = db.transact().await?;
        let movie = PostgresMovieRepository.find_by_id(&mut con, id).await?;
        Ok(*movie.expect("movie must exist").number_in_stock().as_ref())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn mark_returned_matches_exactly_once() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let customer = customer();
        let movie = movie(1, 2);
        seed(&mut con, &customer, &movie).await?;

        let rental = Rental::checkout(
            RentalId::new(uuid::Uuid::new_v4()),
            &customer,
            &movie,
            OffsetDateTime::now_utc(),
        );
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let found = PostgresRentalRepository
            .find_open_by_contents(&mut con, customer.id(), movie.id())
            .await?;
        assert_eq!(found.as_ref().map(Rental::id), Some(rental.id()));

        let returned_at = ReturnedAt::new(OffsetDateTime::now_utc());
        let fee = RentalFee::new(0i64);
        let matched = PostgresRentalRepository
            .mark_returned(&mut con, rental.id(), &returned_at, &fee)
            .await?;
        assert!(matched);

        let matched = PostgresRentalRepository
            .mark_returned(&mut con, rental.id(), &returned_at, &fee)
            .await?;
        assert!(!matched);

        let found = PostgresRentalRepository
            .find_open_by_contents(&mut con, customer.id(), movie.id())
            .await?;
        assert!(found.is_none());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn checkout_and_return_round_trip_restores_stock(
    ) -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let customer = customer();
        let movie = movie(3, 2);
        let mut con = db.transact().await?;
        seed(&mut con, &customer, &movie).await?;
        con.commit().await?;

        let rented = db
            .rent_movie(CreateRentalDto {
                customer_id: *customer.id().as_ref(),
                movie_id: *movie.id().as_ref(),
            })
            .await?;
        assert_eq!(stock_of(&db, movie.id()).await?, 2);
        assert!(rented.returned_at.is_none());
        assert!(rented.rental_fee.is_none());

        let returned = db
            .return_movie(ReturnRentalDto {
                customer_id: *customer.id().as_ref(),
                movie_id: *movie.id().as_ref(),
            })
            .await?;
        assert_eq!(stock_of(&db, movie.id()).await?, 3);
        assert!(returned.returned_at.is_some());
        // Same-day return under the whole-days policy.
        assert_eq!(returned.rental_fee, Some(0));
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn second_return_is_rejected_and_stock_unchanged(
    ) -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let customer = customer();
        let movie = movie(1, 2);
        let mut con = db.transact().await?;
        seed(&mut con, &customer, &movie).await?;
        con.commit().await?;

        let dto = ReturnRentalDto {
            customer_id: *customer.id().as_ref(),
            movie_id: *movie.id().as_ref(),
        };

        db.rent_movie(CreateRentalDto {
            customer_id: *customer.id().as_ref(),
            movie_id: *movie.id().as_ref(),
        })
        .await?;
        db.return_movie(dto.clone()).await?;
        assert_eq!(stock_of(&db, movie.id()).await?, 1);

        let result = db.return_movie(dto).await;
        assert!(matches!(
            result.unwrap_err().current_context(),
            KernelError::AlreadyReturned
        ));
        assert_eq!(stock_of(&db, movie.id()).await?, 1);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn return_without_rental_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let customer = customer();
        let movie = movie(1, 2);
        let mut con = db.transact().await?;
        seed(&mut con, &customer, &movie).await?;
        con.commit().await?;

        let result = db
            .return_movie(ReturnRentalDto {
                customer_id: *customer.id().as_ref(),
                movie_id: *movie.id().as_ref(),
            })
            .await;
        assert!(matches!(
            result.unwrap_err().current_context(),
            KernelError::NotFound
        ));
        assert_eq!(stock_of(&db, movie.id()).await?, 1);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn checkout_of_empty_shelf_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let customer = customer();
        let movie = movie(0, 2);
        let mut con = db.transact().await?;
        seed(&mut con, &customer, &movie).await?;
        con.commit().await?;

        let result = db
            .rent_movie(CreateRentalDto {
                customer_id: *customer.id().as_ref(),
                movie_id: *movie.id().as_ref(),
            })
            .await;
        assert!(matches!(
            result.unwrap_err().current_context(),
            KernelError::OutOfStock
        ));
        assert_eq!(stock_of(&db, movie.id()).await?, 0);

        let mut con = db.transact().await?;
        let open = PostgresRentalRepository
            .find_open_by_contents(&mut con, customer.id(), movie.id())
            .await?;
        assert!(open.is_none());
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn concurrent_checkouts_of_last_copy_admit_exactly_one(
    ) -> error_stack::Result<(), KernelError> {
        let db = Arc::new(PostgresDatabase::new().await?);
        let customer_one = customer();
        let customer_two = customer();
        let movie = movie(1, 2);
        let mut con = db.transact().await?;
        PostgresCustomerRepository
            .create(&mut con, &customer_one)
            .await?;
        PostgresCustomerRepository
            .create(&mut con, &customer_two)
            .await?;
        PostgresMovieRepository.create(&mut con, &movie).await?;
        con.commit().await?;

        let (first, second) = tokio::join!(
            db.rent_movie(CreateRentalDto {
                customer_id: *customer_one.id().as_ref(),
                movie_id: *movie.id().as_ref(),
            }),
            db.rent_movie(CreateRentalDto {
                customer_id: *customer_two.id().as_ref(),
                movie_id: *movie.id().as_ref(),
            }),
        );

        let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        for result in [first, second] {
            if let Err(report) = result {
                assert!(matches!(
                    report.current_context(),
                    KernelError::OutOfStock
                ));
            }
        }
        assert_eq!(stock_of(&db, movie.id()).await?, 0);
        Ok(())
    }
}
