//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let db = mongo.database(&builder.name("db", "main"));
//!     let username = builder.username("buyer");
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (seed is the hash of the name)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Email-shaped username unique to this builder
    pub fn username(&self, suffix: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, suffix)
    }

    /// Unique name for a resource, e.g. `test-product-12345-main`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// assert!(builder.name("product", "main").starts_with("test-product-"));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a string is a 24-digit hex ObjectId
    pub fn assert_object_id(value: &str, context: &str) {
        assert!(
            value.len() == 24 && value.chars().all(|c| c.is_ascii_hexdigit()),
            "{}: expected a hex ObjectId, got {:?}",
            context,
            value
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.username("a"), builder2.username("a"));
        assert_eq!(
            builder1.name("product", "test"),
            builder2.name("product", "test")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.username("a"), builder2.username("a"));
    }

    #[test]
    fn test_assert_object_id_accepts_hex() {
        assertions::assert_object_id("65f1c0a2e4b0a1b2c3d4e5f6", "id");
    }

    #[test]
    #[should_panic(expected = "expected a hex ObjectId")]
    fn test_assert_object_id_rejects_other() {
        assertions::assert_object_id("not-an-id", "id");
    }
}
