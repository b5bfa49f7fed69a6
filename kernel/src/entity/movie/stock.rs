use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Copies currently on the shelf. Never negative; checkout and return move
/// it through the store's conditional updates, one unit per rental.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct MovieStock(i32);

impl MovieStock {
    pub fn new(amount: impl Into<i32>) -> Self {
        Self(amount.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
