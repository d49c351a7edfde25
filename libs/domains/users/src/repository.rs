use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// Insert a new user. A username taken in the meantime surfaces as
    /// [`UserError::AlreadyExists`](crate::error::UserError::AlreadyExists).
    async fn insert(&self, user: User) -> UserResult<ObjectId>;
}
