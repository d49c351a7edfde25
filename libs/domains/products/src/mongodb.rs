//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, oid::ObjectId, to_document},
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        filter
            .conditions
            .iter()
            .map(|(key, value)| (key.clone(), Bson::from(value.clone())))
            .collect()
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: Product) -> ProductResult<ObjectId> {
        let result = self.collection.insert_one(&product).await?;

        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(ProductError::Database(format!(
                "unexpected inserted id type: {other}"
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(Self::build_filter(&filter)).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn update(&self, product: Product) -> ProductResult<bool> {
        let mut fields = to_document(&product)?;
        fields.remove("_id");

        let result = self
            .collection
            .update_one(doc! { "_id": product.id }, doc! { "$set": fields })
            .await?;

        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}
