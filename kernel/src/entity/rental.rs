mod fee;
mod id;
mod rented_at;
mod returned_at;
mod snapshot;

pub use self::{fee::*, id::*, rented_at::*, returned_at::*, snapshot::*};

use destructure::{Destructure, Mutation};
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{Customer, Movie};
use crate::KernelError;

/// A single checkout of one movie copy by one customer.
///
/// `returned_at` and `rental_fee` are written together, exactly once: an
/// open rental has neither, a closed rental has both.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Rental {
    id: RentalId,
    customer: CustomerSnapshot,
    movie: MovieSnapshot,
    rented_at: RentedAt,
    returned_at: Option<ReturnedAt>,
    rental_fee: Option<RentalFee>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        customer: CustomerSnapshot,
        movie: MovieSnapshot,
        rented_at: RentedAt,
        returned_at: Option<ReturnedAt>,
        rental_fee: Option<RentalFee>,
    ) -> Self {
        Self {
            id,
            customer,
            movie,
            rented_at,
            returned_at,
            rental_fee,
        }
    }

    /// Opens a rental, copying the customer and movie fields the record
    /// keeps for its lifetime.
    pub fn checkout(id: RentalId, customer: &Customer, movie: &Movie, now: OffsetDateTime) -> Self {
        Self {
            id,
            customer: CustomerSnapshot::from_entity(customer),
            movie: MovieSnapshot::from_entity(movie),
            rented_at: RentedAt::new(now),
            returned_at: None,
            rental_fee: None,
        }
    }

    pub fn is_returned(&self) -> bool {
        self.returned_at.is_some()
    }

    /// Closes the rental, stamping the return time and the fee together.
    /// A rental leaves the checked-out state exactly once.
    pub fn close(self, now: OffsetDateTime) -> error_stack::Result<Self, KernelError> {
        if self.returned_at.is_some() {
            return Err(Report::new(KernelError::AlreadyReturned));
        }
        let fee = RentalFee::charge(&self.rented_at, now, self.movie.daily_rental_rate());
        Ok(Self {
            returned_at: Some(ReturnedAt::new(now)),
            rental_fee: Some(fee),
            ..self
        })
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, Genre, GenreId,
        GenreName, GoldStatus, Movie, MovieId, MovieStock, MovieTitle, Rental, RentalFee, RentalId,
        RentedAt,
    };
    use crate::KernelError;

    fn customer() -> Customer {
        Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new("customer"),
            CustomerPhone::new("12345"),
            GoldStatus::default(),
        )
    }

    fn movie(rate: i32) -> Movie {
        Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("movie"),
            Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("genre")),
            MovieStock::new(1),
            DailyRentalRate::new(rate),
        )
    }

    fn epoch() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
    }

    #[test]
    fn checkout_opens_with_snapshots_and_no_fee() {
        let customer = customer();
        let movie = movie(2);
        let rental = Rental::checkout(RentalId::new(Uuid::new_v4()), &customer, &movie, epoch());

        assert_eq!(rental.customer().id(), customer.id());
        assert_eq!(rental.movie().title(), movie.title());
        assert!(!rental.is_returned());
        assert_eq!(rental.rental_fee(), &None);
    }

    #[test]
    fn close_sets_return_time_and_fee_together() {
        let rental = Rental::checkout(
            RentalId::new(Uuid::new_v4()),
            &customer(),
            &movie(2),
            epoch(),
        );
        let closed = rental.close(epoch() + Duration::days(5)).unwrap();

        assert!(closed.is_returned());
        assert_eq!(closed.rental_fee(), &Some(RentalFee::new(10i64)));
    }

    #[test]
    fn same_day_return_is_free() {
        let rental = Rental::checkout(
            RentalId::new(Uuid::new_v4()),
            &customer(),
            &movie(2),
            epoch(),
        );
        let closed = rental.close(epoch() + Duration::hours(6)).unwrap();

        assert_eq!(closed.rental_fee(), &Some(RentalFee::new(0i64)));
    }

    #[test]
    fn partial_days_truncate() {
        let rental = Rental::checkout(
            RentalId::new(Uuid::new_v4()),
            &customer(),
            &movie(3),
            epoch(),
        );
        let closed = rental
            .close(epoch() + Duration::days(2) + Duration::hours(23))
            .unwrap();

        assert_eq!(closed.rental_fee(), &Some(RentalFee::new(6i64)));
    }

    #[test]
    fn close_twice_is_rejected() {
        let rental = Rental::checkout(
            RentalId::new(Uuid::new_v4()),
            &customer(),
            &movie(2),
            epoch(),
        );
        let closed = rental.close(epoch() + Duration::days(1)).unwrap();
        let result = closed.close(epoch() + Duration::days(2));

        assert!(matches!(
            result.unwrap_err().current_context(),
            KernelError::AlreadyReturned
        ));
    }

    #[test]
    fn fee_is_pure_over_its_inputs() {
        let rented_at = RentedAt::new(epoch());
        let rate = DailyRentalRate::new(4);
        let first = RentalFee::charge(&rented_at, epoch() + Duration::days(3), &rate);
        let second = RentalFee::charge(&rented_at, epoch() + Duration::days(3), &rate);

        assert_eq!(first, second);
        assert_eq!(first, RentalFee::new(12i64));
    }
}
