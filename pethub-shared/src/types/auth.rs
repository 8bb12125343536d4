use std::sync::Arc;

use axum::extract::FromRef;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// HS256 signing secret shared by token issuance and the [`AdminUser`] extractor.
///
/// Handlers reach it through `axum::extract::FromRef`, so the application
/// state only has to provide a `FromRef` impl. States shared behind an
/// `Arc` get one for free.
///
/// [`AdminUser`]: crate::middleware::AdminUser
#[derive(Clone)]
pub struct JwtSecret(Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl AsRef<str>) -> Self {
        Self(Arc::from(secret.as_ref()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl<T> FromRef<Arc<T>> for JwtSecret
where
    JwtSecret: FromRef<T>,
{
    fn from_ref(state: &Arc<T>) -> Self {
        JwtSecret::from_ref(state.as_ref())
    }
}

impl std::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtSecret(..)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin account id.
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

impl Claims {
    pub fn new(admin_id: i32, duration_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: admin_id,
            iat: now,
            exp: now + duration_secs,
            jti: Uuid::now_v7(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub id: i32,
    pub token_id: Uuid,
}

impl From<Claims> for AuthAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            token_id: claims.jti,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AccessToken {
    pub fn bearer(token: String, expires_in: i64) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_claims_are_not_expired() {
        let claims = Claims::new(7, 60);
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn past_claims_are_expired() {
        let claims = Claims::new(7, -10);
        assert!(claims.is_expired());
    }

    struct Service {
        jwt: JwtSecret,
    }

    impl FromRef<Service> for JwtSecret {
        fn from_ref(state: &Service) -> Self {
            state.jwt.clone()
        }
    }

    #[test]
    fn secret_is_reachable_through_shared_state() {
        let state = Arc::new(Service { jwt: JwtSecret::new("shared") });
        let secret = JwtSecret::from_ref(&state);
        assert_eq!(secret.as_bytes(), b"shared");
    }

    #[test]
    fn secret_is_not_printed() {
        let secret = JwtSecret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "JwtSecret(..)");
        assert_eq!(secret.as_bytes(), b"hunter2");
    }
}
