use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ServiceError};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin record id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies admin session tokens. Tokens are HS256 JWTs valid for
/// 7 days; nothing is persisted, verification re-checks signature and expiry
/// on every protected request.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign(&self, admin_id: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Upstream(e.to_string()))
    }

    /// Missing, malformed, tampered and expired tokens all collapse into
    /// `Unauthorized`; the client learns nothing about which check failed.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ServiceError::Unauthorized)
    }
}

/// Extractor gating admin-protected routes. Reads `Authorization: Bearer
/// <token>` and verifies it against the signer held in `AppState`.
pub struct AdminIdentity {
    pub admin_id: String,
}

impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ServiceError::Unauthorized)?;

        let claims = state.signer.verify(token)?;

        Ok(AdminIdentity {
            admin_id: claims.sub,
        })
    }
}
