mod gold;
mod id;
mod name;
mod phone;

pub use self::{gold::*, id::*, name::*, phone::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
    is_gold: GoldStatus,
}

impl Customer {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone, is_gold: GoldStatus) -> Self {
        Self {
            id,
            name,
            phone,
            is_gold,
        }
    }
}
