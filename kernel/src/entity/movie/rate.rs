use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Whole currency units charged per elapsed rental day.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct DailyRentalRate(i32);

impl DailyRentalRate {
    pub fn new(rate: impl Into<i32>) -> Self {
        Self(rate.into())
    }
}
