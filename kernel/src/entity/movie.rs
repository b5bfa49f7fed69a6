mod id;
mod rate;
mod stock;
mod title;

pub use self::{id::*, rate::*, stock::*, title::*};
use crate::entity::Genre;
use destructure::{Destructure, Mutation};
use vodca::References;

/// The genre is embedded by value: a movie keeps the genre fields it was
/// created (or last updated) with, independent of the genre master record.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Movie {
    id: MovieId,
    title: MovieTitle,
    genre: Genre,
    number_in_stock: MovieStock,
    daily_rental_rate: DailyRentalRate,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: MovieTitle,
        genre: Genre,
        number_in_stock: MovieStock,
        daily_rental_rate: DailyRentalRate,
    ) -> Self {
        Self {
            id,
            title,
            genre,
            number_in_stock,
            daily_rental_rate,
        }
    }
}
