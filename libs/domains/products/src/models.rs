use mongodb::bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::EnumString;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Product document as stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub product_name: String,
    /// Minor currency units
    pub price: i64,
    pub currency: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    #[validate(length(min = 1, message = "vendor is required"))]
    pub vendor: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessories: Vec<String>,
    #[serde(default)]
    pub is_essential: bool,
}

impl Product {
    /// New document with a freshly generated id
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: ObjectId::new(),
            product_name: input.product_name,
            price: input.price,
            currency: input.currency,
            quantity: input.quantity,
            discount: input.discount,
            vendor: input.vendor,
            accessories: input.accessories,
            is_essential: input.is_essential,
        }
    }

    /// Overwrite the fields present in `update`, keeping the rest
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(product_name) = update.product_name {
            self.product_name = product_name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(discount) = update.discount {
            self.discount = Some(discount);
        }
        if let Some(vendor) = update.vendor {
            self.vendor = vendor;
        }
        if let Some(accessories) = update.accessories {
            self.accessories = accessories;
        }
        if let Some(is_essential) = update.is_essential {
            self.is_essential = is_essential;
        }
    }
}

/// Product as returned by the API, with `_id` as a hex string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    #[schema(example = "65f1c0a2e4b0a1b2c3d4e5f6")]
    pub id: String,
    #[schema(example = "laptop")]
    pub product_name: String,
    #[schema(example = 30000)]
    pub price: i64,
    #[schema(example = "USD")]
    pub currency: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    pub vendor: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessories: Vec<String>,
    pub is_essential: bool,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.to_hex(),
            product_name: p.product_name,
            price: p.price,
            currency: p.currency,
            quantity: p.quantity,
            discount: p.discount,
            vendor: p.vendor,
            accessories: p.accessories,
            is_essential: p.is_essential,
        }
    }
}

/// One element of a create request. Absent fields take their zero value;
/// only `vendor` is required.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateProduct {
    #[schema(example = "laptop")]
    pub product_name: String,
    #[schema(example = 30000)]
    pub price: i64,
    #[schema(example = "USD")]
    pub currency: String,
    pub quantity: i64,
    pub discount: Option<i64>,
    #[validate(length(min = 1, message = "vendor is required"))]
    #[schema(example = "acme")]
    pub vendor: String,
    pub accessories: Vec<String>,
    pub is_essential: bool,
}

/// Body of `POST /products`: a JSON array of products
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(transparent)]
pub struct ProductBatch {
    #[validate(nested)]
    pub items: Vec<CreateProduct>,
}

impl From<Vec<CreateProduct>> for ProductBatch {
    fn from(items: Vec<CreateProduct>) -> Self {
        Self { items }
    }
}

/// Partial update; `null` and absent fields leave the stored value unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub product_name: Option<String>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub quantity: Option<i64>,
    pub discount: Option<i64>,
    #[validate(length(min = 1, message = "vendor is required"))]
    pub vendor: Option<String>,
    pub accessories: Option<Vec<String>>,
    pub is_essential: Option<bool>,
}

/// Stored product fields whose query values are coerced before filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ProductField {
    #[strum(serialize = "_id")]
    Id,
    ProductName,
    Price,
    Currency,
    Quantity,
    Discount,
    Vendor,
    Accessories,
    IsEssential,
}

/// Typed right-hand side of an equality condition
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Id(ObjectId),
    Int(i64),
    Bool(bool),
    Text(String),
}

impl From<FilterValue> for Bson {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Id(id) => Bson::ObjectId(id),
            FilterValue::Int(n) => Bson::Int64(n),
            FilterValue::Bool(b) => Bson::Boolean(b),
            FilterValue::Text(s) => Bson::String(s),
        }
    }
}

/// Conjunction of equality conditions built from query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub conditions: Vec<(String, FilterValue)>,
}

impl ProductFilter {
    /// Build from raw query pairs.
    ///
    /// Only the first value of a repeated key is used. Numeric fields, `is_essential`
    /// and `_id` must parse as their stored type; any other key matches as a string.
    pub fn from_query(pairs: Vec<(String, String)>) -> ProductResult<Self> {
        let mut conditions: Vec<(String, FilterValue)> = Vec::with_capacity(pairs.len());

        for (key, raw) in pairs {
            if conditions.iter().any(|(k, _)| *k == key) {
                continue;
            }
            let value = Self::coerce(&key, raw)?;
            conditions.push((key, value));
        }

        Ok(Self { conditions })
    }

    fn coerce(key: &str, raw: String) -> ProductResult<FilterValue> {
        let invalid = |raw: &str| ProductError::InvalidFilter {
            key: key.to_string(),
            value: raw.to_string(),
        };

        let value = match ProductField::from_str(key) {
            Ok(ProductField::Id) => {
                FilterValue::Id(ObjectId::parse_str(&raw).map_err(|_| invalid(&raw))?)
            }
            Ok(ProductField::Price | ProductField::Quantity | ProductField::Discount) => {
                FilterValue::Int(raw.trim().parse().map_err(|_| invalid(&raw))?)
            }
            Ok(ProductField::IsEssential) => {
                FilterValue::Bool(raw.trim().parse().map_err(|_| invalid(&raw))?)
            }
            _ => FilterValue::Text(raw),
        };

        Ok(value)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample() -> Product {
        Product::new(CreateProduct {
            product_name: "laptop".into(),
            price: 30000,
            currency: "USD".into(),
            quantity: 344,
            discount: None,
            vendor: "m".into(),
            accessories: vec!["media".into(), "phone".into()],
            is_essential: true,
        })
    }

    #[test]
    fn test_create_product_defaults_missing_fields() {
        let input: CreateProduct = serde_json::from_str(r#"{"vendor":"acme"}"#).unwrap();
        assert_eq!(input.product_name, "");
        assert_eq!(input.price, 0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_requires_vendor() {
        let input: CreateProduct = serde_json::from_str(r#"{"product_name":"tv"}"#).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("vendor"));
    }

    #[test]
    fn test_create_product_rejects_wrong_types() {
        assert!(serde_json::from_str::<CreateProduct>(r#"{"price":"cheap"}"#).is_err());
    }

    #[test]
    fn test_batch_is_a_json_array() {
        let batch: ProductBatch =
            serde_json::from_str(r#"[{"vendor":"a"},{"vendor":"b"}]"#).unwrap();
        assert_eq!(batch.items.len(), 2);
        assert!(batch.validate().is_ok());
    }

    #[test]
    fn test_batch_fails_when_any_item_invalid() {
        let batch: ProductBatch =
            serde_json::from_str(r#"[{"vendor":"a"},{"vendor":""}]"#).unwrap();
        assert!(batch.validate().is_err());
    }

    #[test]
    fn test_apply_update_overwrites_only_present_fields() {
        let mut product = sample();
        let update: UpdateProduct =
            serde_json::from_str(r#"{"price":25000,"discount":500,"currency":null}"#).unwrap();

        product.apply_update(update);

        assert_eq!(product.price, 25000);
        assert_eq!(product.discount, Some(500));
        assert_eq!(product.currency, "USD");
        assert_eq!(product.product_name, "laptop");
        assert_eq!(product.accessories.len(), 2);
    }

    #[test]
    fn test_update_cannot_blank_vendor() {
        let mut product = sample();
        let update: UpdateProduct = serde_json::from_str(r#"{"vendor":""}"#).unwrap();
        assert!(update.validate().is_err());

        product.apply_update(update);
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_response_uses_hex_id_and_omits_empty_optionals() {
        let mut product = sample();
        product.accessories.clear();
        let hex = product.id.to_hex();

        let json = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert_eq!(json["_id"], hex);
        assert!(json.get("discount").is_none());
        assert!(json.get("accessories").is_none());
    }

    #[test]
    fn test_bson_document_omits_absent_discount() {
        let doc = mongodb::bson::to_document(&sample()).unwrap();
        assert!(doc.get_object_id("_id").is_ok());
        assert!(!doc.contains_key("discount"));
    }

    #[test]
    fn test_filter_coerces_known_fields() {
        let id = ObjectId::new();
        let filter = ProductFilter::from_query(pairs(&[
            ("price", "30000"),
            ("is_essential", "true"),
            ("_id", &id.to_hex()),
            ("product_name", "laptop"),
        ]))
        .unwrap();

        assert_eq!(
            filter.conditions,
            vec![
                ("price".to_string(), FilterValue::Int(30000)),
                ("is_essential".to_string(), FilterValue::Bool(true)),
                ("_id".to_string(), FilterValue::Id(id)),
                ("product_name".to_string(), FilterValue::Text("laptop".into())),
            ]
        );
    }

    #[test]
    fn test_filter_keeps_first_value_of_repeated_key() {
        let filter =
            ProductFilter::from_query(pairs(&[("vendor", "a"), ("vendor", "b")])).unwrap();
        assert_eq!(
            filter.conditions,
            vec![("vendor".to_string(), FilterValue::Text("a".into()))]
        );
    }

    #[test]
    fn test_filter_unknown_key_is_text() {
        let filter = ProductFilter::from_query(pairs(&[("color", "red")])).unwrap();
        assert_eq!(filter.conditions[0].1, FilterValue::Text("red".into()));
    }

    #[test]
    fn test_filter_rejects_bad_values() {
        for (key, value) in [("_id", "xyz"), ("price", "ten"), ("is_essential", "yes")] {
            let err = ProductFilter::from_query(pairs(&[(key, value)])).unwrap_err();
            assert!(matches!(err, ProductError::InvalidFilter { .. }), "{key}");
        }
    }

    #[test]
    fn test_empty_query_is_empty_filter() {
        assert!(ProductFilter::from_query(Vec::new()).unwrap().is_empty());
    }
}
