//! Product Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductBatch, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate every item, then insert them one by one.
    ///
    /// Nothing is written if any item is invalid. There is no transaction around
    /// the inserts: if the store fails on item k, items before k stay inserted
    /// and the error is returned.
    #[instrument(skip(self, batch), fields(batch_size = batch.items.len()))]
    pub async fn create_products(&self, batch: ProductBatch) -> ProductResult<Vec<ObjectId>> {
        batch.validate()?;

        let total = batch.items.len();
        let mut ids = Vec::with_capacity(total);

        for input in batch.items {
            match self.repository.insert(Product::new(input)).await {
                Ok(id) => ids.push(id),
                Err(e) => {
                    tracing::warn!(
                        inserted = ids.len(),
                        total,
                        error = %e,
                        "Batch insert failed partway, earlier products remain stored"
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(count = ids.len(), "Products created");
        Ok(ids)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.find(filter).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Merge `update` onto the stored product, validate the result, and write it back
    #[instrument(skip(self, update))]
    pub async fn update_product(&self, id: ObjectId, update: UpdateProduct) -> ProductResult<Product> {
        update.validate()?;

        let mut product = self.get_product(id).await?;
        product.apply_update(update);
        product.validate()?;

        if !self.repository.update(product.clone()).await? {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Delete by id; a missing product is an error rather than a zero count
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<u64> {
        self.get_product(id).await?;

        let deleted = self.repository.delete(id).await?;
        if deleted == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(deleted)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
