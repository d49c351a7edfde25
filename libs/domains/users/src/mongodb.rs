//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::mongodb::ensure_unique_index;
use mongodb::{
    Collection, Database,
    bson::{Bson, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Create the unique index on `username`. Run once at startup.
    pub async fn init_indexes(&self) -> UserResult<()> {
        ensure_unique_index(&self.collection, "username").await?;
        Ok(())
    }

    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: User) -> UserResult<ObjectId> {
        let result = self
            .collection
            .insert_one(&user)
            .await
            .map_err(|e| UserError::from_write(e, &user.username))?;

        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(UserError::Database(format!(
                "unexpected inserted id type: {other}"
            ))),
        }
    }
}
