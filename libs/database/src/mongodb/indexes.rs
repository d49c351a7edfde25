use mongodb::{Collection, IndexModel, bson::doc, options::IndexOptions};
use tracing::info;

use crate::common::DatabaseResult;

/// Create (or confirm) a unique ascending index on a single field.
///
/// Creating an index that already exists with identical options is a no-op on the server.
pub async fn ensure_unique_index<T>(collection: &Collection<T>, field: &str) -> DatabaseResult<()>
where
    T: Send + Sync,
{
    let name = format!("idx_{field}_unique");
    let index = IndexModel::builder()
        .keys(doc! { field: 1 })
        .options(IndexOptions::builder().unique(true).name(name.clone()).build())
        .build();

    collection.create_index(index).await?;
    info!(collection = collection.name(), index = %name, "Unique index ready");
    Ok(())
}
