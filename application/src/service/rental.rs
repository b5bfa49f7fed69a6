use error_stack::Report;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnMovieQuery, DependOnRentalQuery, MovieQuery,
    RentalQuery,
};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{CustomerId, MovieId, Rental, RentalId};
use kernel::KernelError;

use crate::transfer::{
    CreateRentalDto, GetAllRentalDto, GetRentalDto, RentalDto, ReturnRentalDto,
};

#[async_trait::async_trait]
pub trait GetRentalService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnRentalQuery<Connection>
{
    async fn get_all_rentals(
        &self,
        dto: GetAllRentalDto,
    ) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rentals = self
            .rental_query()
            .find_all(&mut connection, &dto.limit, &dto.offset)
            .await?;

        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }

    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<Option<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let rental = self.rental_query().find_by_id(&mut connection, &id).await?;

        Ok(rental.map(RentalDto::from))
    }
}

impl<Connection: Transaction + Send, T> GetRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnRentalQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait RentalService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnCustomerQuery<Connection>
    + DependOnMovieQuery<Connection>
    + DependOnMovieModifier<Connection>
    + DependOnRentalModifier<Connection>
{
    /// Checkout. The rental insert and the stock decrement share one
    /// transaction; the decrement is conditioned on a copy remaining, so
    /// two checkouts racing for the last copy admit exactly one.
    async fn rent_movie(
        &self,
        dto: CreateRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customer_id = CustomerId::new(dto.customer_id);
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &customer_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable("Customer with the given ID was not found")
            })?;

        let movie_id = MovieId::new(dto.movie_id);
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &movie_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable("Movie with the given ID was not found")
            })?;

        if movie.number_in_stock().is_empty() {
            return Err(Report::new(KernelError::OutOfStock));
        }

        let matched = self
            .movie_modifier()
            .decrement_stock(&mut connection, &movie_id)
            .await?;
        if !matched {
            // Lost the race for the last copy after the read above.
            return Err(Report::new(KernelError::OutOfStock));
        }

        let rental = Rental::checkout(
            RentalId::new(Uuid::new_v4()),
            &customer,
            &movie,
            OffsetDateTime::now_utc(),
        );
        self.rental_modifier()
            .create(&mut connection, &rental)
            .await?;

        connection.commit().await?;

        info!(
            "rental opened: customer={} movie={}",
            dto.customer_id, dto.movie_id
        );

        Ok(RentalDto::from(rental))
    }
}

impl<Connection: Transaction + Send, T> RentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnCustomerQuery<Connection>
        + DependOnMovieQuery<Connection>
        + DependOnMovieModifier<Connection>
        + DependOnRentalModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait ReturnService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnMovieModifier<Connection>
    + DependOnRentalQuery<Connection>
    + DependOnRentalModifier<Connection>
{
    /// Return. The rental row carries the authoritative open-state guard:
    /// the conditional update closes it exactly once, and the stock
    /// increment commits in the same transaction.
    async fn return_movie(
        &self,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let customer_id = CustomerId::new(dto.customer_id);
        let movie_id = MovieId::new(dto.movie_id);

        let rental = self
            .rental_query()
            .find_open_by_contents(&mut connection, &customer_id, &movie_id)
            .await?;
        let rental = match rental {
            Some(rental) => rental,
            None => {
                let latest = self
                    .rental_query()
                    .find_latest_by_contents(&mut connection, &customer_id, &movie_id)
                    .await?;
                return Err(Report::new(match latest {
                    Some(_) => KernelError::AlreadyReturned,
                    None => KernelError::NotFound,
                }));
            }
        };

        let rental = rental.close(OffsetDateTime::now_utc())?;
        let (Some(returned_at), Some(rental_fee)) =
            (rental.returned_at().as_ref(), rental.rental_fee().as_ref())
        else {
            return Err(Report::new(KernelError::Internal)
                .attach_printable("closed rental must carry return time and fee"));
        };

        let matched = self
            .rental_modifier()
            .mark_returned(&mut connection, rental.id(), returned_at, rental_fee)
            .await?;
        if !matched {
            // A concurrent return closed it after the read above.
            return Err(Report::new(KernelError::AlreadyReturned));
        }

        self.movie_modifier()
            .increment_stock(&mut connection, rental.movie().id())
            .await?;

        connection.commit().await?;

        info!(
            "rental closed: customer={} movie={}",
            dto.customer_id, dto.movie_id
        );

        Ok(RentalDto::from(rental))
    }
}

impl<Connection: Transaction + Send, T> ReturnService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnMovieModifier<Connection>
        + DependOnRentalQuery<Connection>
        + DependOnRentalModifier<Connection>
{
}
