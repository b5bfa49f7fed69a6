use kernel::prelude::entity::{DestructMovie, Movie, SelectLimit, SelectOffset};
use uuid::Uuid;

use crate::transfer::GenreDto;

#[derive(Debug, Clone)]
pub struct MovieDto {
    pub id: Uuid,
    pub title: String,
    pub genre: GenreDto,
    pub number_in_stock: i32,
    pub daily_rental_rate: i32,
}

impl From<Movie> for MovieDto {
    fn from(value: Movie) -> Self {
        let DestructMovie {
            id,
            title,
            genre,
            number_in_stock,
            daily_rental_rate,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            genre: GenreDto::from(genre),
            number_in_stock: number_in_stock.into(),
            daily_rental_rate: daily_rental_rate.into(),
        }
    }
}

#[derive(Debug)]
pub struct GetMovieDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct GetAllMovieDto {
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

#[derive(Debug)]
pub struct CreateMovieDto {
    pub title: String,
    pub genre_id: Uuid,
    pub number_in_stock: i32,
    pub daily_rental_rate: i32,
}

#[derive(Debug)]
pub struct UpdateMovieDto {
    pub id: Uuid,
    pub title: String,
    pub genre_id: Uuid,
    pub number_in_stock: i32,
    pub daily_rental_rate: i32,
}

#[derive(Debug)]
pub struct DeleteMovieDto {
    pub id: Uuid,
}
