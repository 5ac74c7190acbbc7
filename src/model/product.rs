use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// A product as served by the catalog endpoints.
///
/// Products are owned by the remote catalog. Nothing in this crate mutates them;
/// the [Catalog actor](crate::catalog_actor) only ever swaps the
/// whole list it is displaying.
///
/// The wire format keeps the backend's field names (`_id`, `image`):
///
/// ```json
/// { "_id": "v4sLtEcMpzabRyfx", "name": "iPhone XR", "category": "Phones",
///   "cost": 100, "rating": 4, "image": "https://i.imgur.com/lulqWzW.jpg" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub cost: f64,
    /// Aggregate rating, an integer out of five.
    pub rating: u8,
    #[serde(rename = "image")]
    pub image_ref: String,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `name` - Product name
    /// * `category` - Category the product is listed under
    /// * `cost` - Unit price
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        cost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            cost,
            rating: 0,
            image_ref: String::new(),
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating.min(5);
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_uses_backend_field_names() {
        let raw = r#"{
            "name": "Basketball",
            "category": "Sports",
            "cost": 100,
            "rating": 5,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "upLK9JbQ4rMhTwt4"
        }"#;

        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.id, ProductId::from("upLK9JbQ4rMhTwt4"));
        assert_eq!(product.cost, 100.0);
        assert_eq!(product.image_ref, "https://i.imgur.com/lulqWzW.jpg");

        let encoded = serde_json::to_value(&product).unwrap();
        assert_eq!(encoded["_id"], "upLK9JbQ4rMhTwt4");
        assert_eq!(encoded["image"], "https://i.imgur.com/lulqWzW.jpg");
    }

    #[test]
    fn test_rating_is_capped_at_five() {
        let product = Product::new("p1", "Lamp", "Home", 12.5).with_rating(9);
        assert_eq!(product.rating, 5);
    }
}
