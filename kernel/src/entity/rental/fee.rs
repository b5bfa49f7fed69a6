use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

use crate::entity::{DailyRentalRate, RentedAt};

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalFee(i64);

impl RentalFee {
    pub fn new(fee: impl Into<i64>) -> Self {
        Self(fee.into())
    }

    /// Fee owed when a rental opened at `rented_at` is returned at
    /// `returned_at`: whole elapsed days (truncated) times the daily rate.
    /// A same-day return is free.
    pub fn charge(
        rented_at: &RentedAt,
        returned_at: OffsetDateTime,
        rate: &DailyRentalRate,
    ) -> Self {
        let days = (returned_at - *rented_at.as_ref()).whole_days().max(0);
        Self(days * i64::from(*rate.as_ref()))
    }
}
