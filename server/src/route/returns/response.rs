use application::transfer::RentalDto;

use crate::controller::Exhaust;
use crate::route::rental::response::RentalResponse;

pub struct Presenter;

impl Exhaust<RentalDto> for Presenter {
    type To = RentalResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        RentalResponse::from(input)
    }
}
