use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct AdminFlag(bool);

impl AdminFlag {
    pub fn new(is_admin: impl Into<bool>) -> Self {
        Self(is_admin.into())
    }
}
