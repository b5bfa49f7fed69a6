use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    token: String,
}

impl TokenResponse {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

pub struct Presenter;
