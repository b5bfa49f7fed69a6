mod auth;
mod customer;
mod genre;
mod movie;
mod rental;
mod user;

pub use self::{auth::*, customer::*, genre::*, movie::*, rental::*, user::*};
