use serde::Deserialize;
use uuid::Uuid;

use application::transfer::ReturnRentalDto;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    customer_id: Uuid,
    movie_id: Uuid,
}

pub struct Transformer;

impl Intake<ReturnRequest> for Transformer {
    type To = ReturnRentalDto;
    fn emit(&self, ReturnRequest { customer_id, movie_id }: ReturnRequest) -> Self::To {
        ReturnRentalDto {
            customer_id,
            movie_id,
        }
    }
}
