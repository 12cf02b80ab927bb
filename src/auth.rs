/// Bearer-token plumbing
///
/// Token issuance lives in the auth collaborator; this module only validates
/// `Authorization: Bearer <jwt>` headers and exposes the caller's identity
/// to handlers as an extractor.
use crate::error::AppError;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Claims carried by tokens minted by the auth collaborator.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Display name, echoed into created resources
    pub username: String,
    /// Expiry (seconds since epoch)
    pub exp: usize,
}

/// Shared validation state registered as app data.
#[derive(Clone)]
pub struct AuthState {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthState {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    fn decode(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))
    }
}

/// Authenticated caller, extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let state = req
        .app_data::<web::Data<AuthState>>()
        .ok_or_else(|| AppError::Internal("auth state not configured".into()))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

    let claims = state.decode(token)?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID".into()))?;

    Ok(CurrentUser {
        id,
        username: claims.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn mint(secret: &str, sub: &str, exp: usize) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            username: "tester".to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn decode_accepts_valid_token() {
        let state = AuthState::new("s3cret");
        let token = mint("s3cret", "4fe90cd2-87b4-4f10-9899-6e7cf8f0e1ab", 4_102_444_800);
        let claims = state.decode(&token).unwrap();
        assert_eq!(claims.username, "tester");
    }

    #[test]
    fn decode_rejects_wrong_secret() {
        let state = AuthState::new("s3cret");
        let token = mint("other", "4fe90cd2-87b4-4f10-9899-6e7cf8f0e1ab", 4_102_444_800);
        assert!(state.decode(&token).is_err());
    }

    #[test]
    fn decode_rejects_expired_token() {
        let state = AuthState::new("s3cret");
        let token = mint("s3cret", "4fe90cd2-87b4-4f10-9899-6e7cf8f0e1ab", 1_000);
        assert!(state.decode(&token).is_err());
    }
}
