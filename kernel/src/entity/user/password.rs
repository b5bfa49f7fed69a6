use vodca::{AsRefln, Fromln};

/// PHC-format hash string. The plaintext never reaches the kernel.
#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct UserPassword(String);

impl UserPassword {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }
}
