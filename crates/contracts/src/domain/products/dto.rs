use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::common::flexible_f64;

/// Physical dimensions of a product. The admin form collects these as a
/// single comma-separated string; the unit is always centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "Dimensions::default_unit")]
    pub unit: String,
}

impl Dimensions {
    fn default_unit() -> String {
        "cm".to_string()
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            length: 0.0,
            width: 0.0,
            height: 0.0,
            unit: Self::default_unit(),
        }
    }
}

/// Node-style byte buffer as the API serializes stored blobs:
/// `{ "type": "Buffer", "data": [60, 115, ...] }`. Only the payload matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBuffer {
    pub data: Vec<u8>,
}

/// A stored product image as returned by the API. `image_url` is a buffer
/// whose bytes UTF-8 decode to a `data:<mime>;base64,...` URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub image_url: ImageBuffer,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "flexible_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub cost_price: f64,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub min_stock_level: i64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub weight: f64,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Free-form characteristics: string, number, boolean, list of strings
    /// or a nested mapping, keyed by attribute name.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Buffer of the primary image's data URL, present on list responses.
    #[serde(default)]
    pub primary_image: Option<ImageBuffer>,
    #[serde(default)]
    pub is_active: bool,
}

/// Body of `POST /products` and `PUT /products/{id}`. Metadata only;
/// images travel separately through the image endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub cost_price: f64,
    pub sku: String,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
    pub weight: f64,
    pub dimensions: Dimensions,
    pub attributes: Map<String, Value>,
}

/// One image in the upload batch: a self-describing data URL plus its
/// position. The first entry of a batch is always the primary image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    pub image_url: String,
    pub alt_text: String,
    pub is_primary: bool,
    pub sort_order: i32,
}

/// Body of `POST /products/{id}/images`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadRequest {
    pub images: Vec<ImageUpload>,
}

/// Body of `GET /products/admin/all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsListResponse {
    pub products: Vec<Product>,
}

/// Body of `POST /products`; carries the server-assigned `product_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductResponse {
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_minimal() {
        let json = r#"{
            "product_id": 7,
            "name": "Cuttlebone",
            "price": 49.5,
            "is_active": true
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.product_id, 7);
        assert!(p.attributes.is_empty());
        assert!(p.images.is_empty());
        assert!(p.dimensions.is_none());
    }

    #[test]
    fn test_image_buffer_ignores_type_tag() {
        let json = r#"{"type": "Buffer", "data": [100, 97, 116, 97]}"#;
        let buf: ImageBuffer = serde_json::from_str(json).unwrap();
        assert_eq!(buf.data, b"data");
    }

    #[test]
    fn test_dimensions_default_unit() {
        let d: Dimensions = serde_json::from_str(r#"{"length": 10, "width": 4, "height": 2}"#).unwrap();
        assert_eq!(d.unit, "cm");
    }

    #[test]
    fn test_payload_serializes_attributes_verbatim() {
        let mut attributes = Map::new();
        attributes.insert("brand".into(), Value::String("Birdy".into()));
        attributes.insert("colors".into(), serde_json::json!(["red", "blue"]));
        let payload = ProductPayload {
            name: "Perch Swing".into(),
            description: String::new(),
            price: 150.0,
            cost_price: 90.0,
            sku: "PS".into(),
            stock_quantity: 12,
            min_stock_level: 2,
            weight: 0.3,
            dimensions: Dimensions::default(),
            attributes,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["attributes"]["brand"], "Birdy");
        assert_eq!(value["attributes"]["colors"][0], "red");
        assert_eq!(value["dimensions"]["unit"], "cm");
    }
}
