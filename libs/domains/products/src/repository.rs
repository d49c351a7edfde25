use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter};

/// Repository trait for Product persistence
///
/// One call maps to one document-store operation; existence checks and merging
/// happen in the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product carrying its own id, returning the stored id
    async fn insert(&self, product: Product) -> ProductResult<ObjectId>;

    /// All products matching every condition of the filter
    async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Write the whole product back. Returns false when no document has its id.
    async fn update(&self, product: Product) -> ProductResult<bool>;

    /// Delete by id, returning the number of deleted documents
    async fn delete(&self, id: ObjectId) -> ProductResult<u64>;
}
