use axum_helpers::JwtAuth;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, CredentialsRequest, User};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;

/// Registration and credential checks; every success issues a fresh token
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, hasher: PasswordHasher, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
            jwt,
        }
    }

    /// Register a new user, returning its id and a token bound to the username
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: CredentialsRequest) -> UserResult<(ObjectId, String)> {
        input.validate()?;

        if self
            .repository
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(UserError::AlreadyExists(input.username));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let id = self
            .repository
            .insert(User::new(input.username.clone(), password_hash))
            .await?;

        let token = self.issue_token(&input.username)?;
        tracing::info!(user_id = %id, "User registered");
        Ok((id, token))
    }

    /// Check credentials. Unknown users and wrong passwords fail the same way.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn authenticate(
        &self,
        input: CredentialsRequest,
    ) -> UserResult<(AuthResponse, String)> {
        input.validate()?;

        let user = self
            .repository
            .find_by_username(&input.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.hasher.verify(&input.password, &user.password_hash)? {
            tracing::info!("Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let token = self.issue_token(&user.username)?;
        Ok((
            AuthResponse {
                username: user.username,
            },
            token,
        ))
    }

    fn issue_token(&self, username: &str) -> UserResult<String> {
        self.jwt
            .issue_token(username)
            .map_err(|e| UserError::Token(e.to_string()))
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: self.hasher.clone(),
            jwt: self.jwt.clone(),
        }
    }
}
