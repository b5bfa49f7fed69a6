use axum::http::{header, HeaderMap};
use error_stack::{Report, ResultExt};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use kernel::KernelError;

static JWT_SECRET: &str = "JWT_SECRET";
static TOKEN_LIFETIME: Duration = Duration::days(1);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub adm: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Token issuance and verification. Constructed once at boot and carried
/// in app state; keys never leave this module.
pub struct AuthModule {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthModule {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let secret = std::env::var(JWT_SECRET)
            .change_context(KernelError::Internal)
            .attach_printable("JWT_SECRET must be set")?;
        Ok(Self::new(&secret))
    }

    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue_token(
        &self,
        user_id: Uuid,
        is_admin: bool,
    ) -> error_stack::Result<String, KernelError> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user_id,
            adm: is_admin,
            iat: now.unix_timestamp(),
            exp: (now + TOKEN_LIFETIME).unix_timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .change_context(KernelError::Internal)
    }

    pub fn verify_token(&self, token: &str) -> error_stack::Result<Claims, KernelError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .change_context(KernelError::Unauthorized)
    }

    /// Gate for protected routes: a bearer token must be present and valid.
    pub fn authenticate(&self, headers: &HeaderMap) -> error_stack::Result<Claims, KernelError> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| Report::new(KernelError::Unauthorized))?;
        self.verify_token(token)
    }

    /// Gate for admin-only routes.
    pub fn authorize_admin(
        &self,
        headers: &HeaderMap,
    ) -> error_stack::Result<Claims, KernelError> {
        let claims = self.authenticate(headers)?;
        if !claims.adm {
            return Err(Report::new(KernelError::Forbidden));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod test {
    use axum::http::{header, HeaderMap, HeaderValue};
    use uuid::Uuid;

    use kernel::KernelError;

    use crate::auth::AuthModule;

    #[test]
    fn issued_token_round_trips() {
        let auth = AuthModule::new("an-adequately-long-test-secret");
        let user_id = Uuid::new_v4();

        let token = auth.issue_token(user_id, true).unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.adm);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let auth = AuthModule::new("an-adequately-long-test-secret");
        let other = AuthModule::new("a-completely-different-secret");

        let token = other.issue_token(Uuid::new_v4(), false).unwrap();
        let result = auth.verify_token(&token);

        assert!(matches!(
            result.unwrap_err().current_context(),
            KernelError::Unauthorized
        ));
    }

    #[test]
    fn authenticate_requires_bearer_header() {
        let auth = AuthModule::new("an-adequately-long-test-secret");
        let user_id = Uuid::new_v4();
        let token = auth.issue_token(user_id, false).unwrap();

        let mut headers = HeaderMap::new();
        assert!(auth.authenticate(&headers).is_err());

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let claims = auth.authenticate(&headers).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn admin_gate_rejects_plain_users() {
        let auth = AuthModule::new("an-adequately-long-test-secret");
        let token = auth.issue_token(Uuid::new_v4(), false).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let result = auth.authorize_admin(&headers);

        assert!(matches!(
            result.unwrap_err().current_context(),
            KernelError::Forbidden
        ));
    }
}
