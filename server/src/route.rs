mod auth;
mod customer;
mod genre;
mod movie;
mod rental;
mod returns;
mod user;

pub use self::{
    auth::AuthRouter, customer::CustomerRouter, genre::GenreRouter, movie::MovieRouter,
    rental::RentalRouter, returns::ReturnRouter, user::UserRouter,
};
