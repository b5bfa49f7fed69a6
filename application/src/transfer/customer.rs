use kernel::prelude::entity::{Customer, DestructCustomer, SelectLimit, SelectOffset};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub is_gold: bool,
}

impl From<Customer> for CustomerDto {
    fn from(value: Customer) -> Self {
        let DestructCustomer {
            id,
            name,
            phone,
            is_gold,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            is_gold: is_gold.into(),
        }
    }
}

#[derive(Debug)]
pub struct GetCustomerDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct GetAllCustomerDto {
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

#[derive(Debug)]
pub struct CreateCustomerDto {
    pub name: String,
    pub phone: String,
    pub is_gold: bool,
}

#[derive(Debug)]
pub struct UpdateCustomerDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub is_gold: bool,
}

#[derive(Debug)]
pub struct DeleteCustomerDto {
    pub id: Uuid,
}
