use kernel::prelude::entity::{
    DestructCustomerSnapshot, DestructMovieSnapshot, DestructRental, Rental, SelectLimit,
    SelectOffset,
};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RentalDto {
    pub id: Uuid,
    pub customer: CustomerSnapshotDto,
    pub movie: MovieSnapshotDto,
    pub rented_at: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
    pub rental_fee: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CustomerSnapshotDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct MovieSnapshotDto {
    pub id: Uuid,
    pub title: String,
    pub daily_rental_rate: i32,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            customer,
            movie,
            rented_at,
            returned_at,
            rental_fee,
        } = value.into_destruct();
        let DestructCustomerSnapshot {
            id: customer_id,
            name,
            phone,
        } = customer.into_destruct();
        let DestructMovieSnapshot {
            id: movie_id,
            title,
            daily_rental_rate,
        } = movie.into_destruct();
        Self {
            id: id.into(),
            customer: CustomerSnapshotDto {
                id: customer_id.into(),
                name: name.into(),
                phone: phone.into(),
            },
            movie: MovieSnapshotDto {
                id: movie_id.into(),
                title: title.into(),
                daily_rental_rate: daily_rental_rate.into(),
            },
            rented_at: rented_at.into(),
            returned_at: returned_at.map(Into::into),
            rental_fee: rental_fee.map(Into::into),
        }
    }
}

#[derive(Debug)]
pub struct GetRentalDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct GetAllRentalDto {
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ReturnRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}
