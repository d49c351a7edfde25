use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Stored user document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    /// PHC-format password hash
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: ObjectId::new(),
            username,
            password_hash,
        }
    }
}

/// Body of both the registration and the authentication request
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CredentialsRequest {
    #[validate(email)]
    #[schema(example = "a@b.com")]
    pub username: String,
    #[validate(length(min = 8, max = 30))]
    #[schema(example = "password1", min_length = 8, max_length = 30)]
    pub password: String,
}

/// Successful authentication body; the password hash is never echoed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub username: String,
}
