/**
 * Session Tokens
 *
 * This module issues and verifies the signed, stateless session tokens
 * (JWT, HS256) handed out at signup and login.
 *
 * The server keeps no session table: a token stays valid until its `exp`
 * claim passes, and logout only discards the token on the client. Revoking
 * a leaked token requires rotating `JWT_SECRET`.
 */

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Token verification and signing failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and verifies session tokens with a server-held secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an issuer from the signing secret and token lifetime
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked to the second, matching the client's local check
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a user, valid for the configured TTL from now
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(user_id, unix_now())
    }

    /// Issue a token as if it had been created at `issued_at` (Unix seconds)
    pub fn issue_at(&self, user_id: Uuid, issued_at: u64) -> Result<String, TokenError> {
        let exp = issued_at
            .checked_add(self.ttl.as_secs())
            .ok_or_else(|| TokenError::Signing("token lifetime overflows the expiry".to_string()))?;
        let claims = Claims {
            user_id: user_id.to_string(),
            exp,
            iat: issued_at,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return the user ID it was issued for
    ///
    /// Fails on a bad signature, a malformed token, an expired token, or a
    /// subject that is not a UUID.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.decode_claims(token)?;
        Uuid::parse_str(&claims.user_id)
            .map_err(|e| TokenError::Invalid(format!("bad user id in token: {}", e)))
    }

    /// Verify a token and return its full claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
