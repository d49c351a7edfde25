use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token lifetime in seconds (15 minutes)
pub const ACCESS_TOKEN_TTL: i64 = 900;

/// Response header carrying a freshly issued token, and the preferred request header
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Absent in the token means not authorized
    #[serde(default)]
    pub authorized: bool,
    /// Identity the token is bound to (the username)
    pub user_id: String,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// HS256 token issuer and verifier sharing one secret.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is enforced to the second
        validation.leeway = 0;
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
            validation: Arc::new(validation),
        }
    }

    /// Issue an authorized token for `user_id` expiring [`ACCESS_TOKEN_TTL`] seconds from now
    pub fn issue_token(&self, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = JwtClaims {
            authorized: true,
            user_id: user_id.to_string(),
            exp: (Utc::now() + Duration::seconds(ACCESS_TOKEN_TTL)).timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &JwtClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        decode::<JwtClaims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

/// `Bearer <token>` header value
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}
