use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct GoldStatus(bool);

impl GoldStatus {
    pub fn new(is_gold: impl Into<bool>) -> Self {
        Self(is_gold.into())
    }
}
