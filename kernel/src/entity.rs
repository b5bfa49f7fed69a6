mod common;
mod customer;
mod genre;
mod movie;
mod rental;
mod user;

pub use self::{common::*, customer::*, genre::*, movie::*, rental::*, user::*};
