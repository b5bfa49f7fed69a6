use destructure::Destructure;
use vodca::References;

use crate::entity::{
    Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, Movie, MovieId, MovieTitle,
};

/// Value copy of the customer fields a rental keeps for its lifetime.
/// Later edits of the customer master record never touch this.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct CustomerSnapshot {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
}

impl CustomerSnapshot {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone) -> Self {
        Self { id, name, phone }
    }

    pub fn from_entity(customer: &Customer) -> Self {
        Self {
            id: customer.id().clone(),
            name: customer.name().clone(),
            phone: customer.phone().clone(),
        }
    }
}

/// Value copy of the movie fields priced into the rental, so a later rate
/// change never reprices an open rental.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct MovieSnapshot {
    id: MovieId,
    title: MovieTitle,
    daily_rental_rate: DailyRentalRate,
}

impl MovieSnapshot {
    pub fn new(id: MovieId, title: MovieTitle, daily_rental_rate: DailyRentalRate) -> Self {
        Self {
            id,
            title,
            daily_rental_rate,
        }
    }

    pub fn from_entity(movie: &Movie) -> Self {
        Self {
            id: movie.id().clone(),
            title: movie.title().clone(),
            daily_rental_rate: movie.daily_rental_rate().clone(),
        }
    }
}
