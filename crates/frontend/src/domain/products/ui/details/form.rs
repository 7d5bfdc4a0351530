//! Form-to-payload transformation for the product editor.
//!
//! Everything here is plain data in, plain data out: the view-model feeds
//! it the raw field strings and gets back either a validated
//! [`ProductPayload`] or the first violation to show the user.

use contracts::domain::products::{Dimensions, Product, ProductPayload};
use serde_json::{Map, Value};
use thiserror::Error;

/// Raw text of every fixed form field. Numeric fields stay strings until
/// payload build time so the inputs can hold partial values while typing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFormData {
    pub name: String,
    pub description: String,
    pub price: String,
    pub cost_price: String,
    pub stock_quantity: String,
    pub min_stock_level: String,
    pub weight: String,
    /// Single "length,width,height" string, unit fixed to centimeters.
    pub dimensions: String,
}

/// One editable key/value attribute row. Rows with an empty key or value
/// are dropped silently at submission time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRowInput {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),
    #[error("Price and cost price must be greater than 0.")]
    NonPositivePrice,
    #[error("Stock quantity cannot be negative.")]
    NegativeStock,
}

/// Infer the type of a free-text attribute value:
/// a comma makes it a list of trimmed strings, "true"/"false" (any case)
/// a boolean, a full numeric parse a number, anything else a string.
pub fn coerce_attribute_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.contains(',') {
        return Value::Array(
            trimmed
                .split(',')
                .map(|part| Value::String(part.trim().to_string()))
                .collect(),
        );
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(number) {
            return Value::Number(number);
        }
    }
    Value::String(trimmed.to_string())
}

/// Fold the attribute rows into the payload mapping.
pub fn collect_attributes(rows: &[AttributeRowInput]) -> Map<String, Value> {
    let mut attributes = Map::new();
    for row in rows {
        let key = row.key.trim();
        let value = row.value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        attributes.insert(key.to_string(), coerce_attribute_value(value));
    }
    attributes
}

/// Render a stored attribute value back into the row's text field.
pub fn attribute_display_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        // Nested mappings round-trip as compact JSON.
        other => other.to_string(),
    }
}

/// Parse "length,width,height"; any missing or unparsable component is 0.
pub fn parse_dimensions(raw: &str) -> Dimensions {
    let mut parts = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>().unwrap_or(0.0));
    Dimensions {
        length: parts.next().unwrap_or(0.0),
        width: parts.next().unwrap_or(0.0),
        height: parts.next().unwrap_or(0.0),
        unit: "cm".to_string(),
    }
}

/// SKU is the uppercased first letter of every word of the name.
pub fn derive_sku(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

fn parse_f64_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

fn parse_i64_or_zero(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// Validate the form and build the API payload. The first violation wins
/// and nothing is sent: name, price and cost price are required, both
/// prices must be strictly positive and stock cannot be negative.
pub fn build_payload(
    form: &ProductFormData,
    attribute_rows: &[AttributeRowInput],
) -> Result<ProductPayload, ValidationError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    let price = form
        .price
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::MissingField("price"))?;
    let cost_price = form
        .cost_price
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::MissingField("cost price"))?;
    if price <= 0.0 || cost_price <= 0.0 {
        return Err(ValidationError::NonPositivePrice);
    }
    let stock_quantity = parse_i64_or_zero(&form.stock_quantity);
    if stock_quantity < 0 {
        return Err(ValidationError::NegativeStock);
    }

    Ok(ProductPayload {
        name: name.to_string(),
        description: form.description.clone(),
        price,
        cost_price,
        sku: derive_sku(name),
        stock_quantity,
        min_stock_level: parse_i64_or_zero(&form.min_stock_level),
        weight: parse_f64_or_zero(&form.weight),
        dimensions: parse_dimensions(&form.dimensions),
        attributes: collect_attributes(attribute_rows),
    })
}

/// Populate the form fields from a fetched product, for the edit flow.
pub fn form_from_product(product: &Product) -> (ProductFormData, Vec<AttributeRowInput>) {
    let dimensions = product
        .dimensions
        .as_ref()
        .map(|d| format!("{},{},{}", d.length, d.width, d.height))
        .unwrap_or_default();

    let form = ProductFormData {
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price.to_string(),
        cost_price: product.cost_price.to_string(),
        stock_quantity: product.stock_quantity.to_string(),
        min_stock_level: product.min_stock_level.to_string(),
        weight: product.weight.to_string(),
        dimensions,
    };

    let mut rows: Vec<AttributeRowInput> = product
        .attributes
        .iter()
        .map(|(key, value)| AttributeRowInput {
            key: key.clone(),
            value: attribute_display_value(value),
        })
        .collect();
    // The editor always shows at least one row.
    if rows.is_empty() {
        rows.push(AttributeRowInput::default());
    }

    (form, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> ProductFormData {
        ProductFormData {
            name: "Bird Cage Large".into(),
            description: "Roomy cage".into(),
            price: "10".into(),
            cost_price: "5".into(),
            stock_quantity: "3".into(),
            min_stock_level: "1".into(),
            weight: "2.5".into(),
            dimensions: "10, 20".into(),
        }
    }

    #[test]
    fn test_coerce_comma_makes_list() {
        assert_eq!(
            coerce_attribute_value("a,b, c"),
            json!(["a", "b", "c"])
        );
    }

    #[test]
    fn test_coerce_booleans_any_case() {
        assert_eq!(coerce_attribute_value("true"), json!(true));
        assert_eq!(coerce_attribute_value("FALSE"), json!(false));
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce_attribute_value("42"), json!(42.0));
        assert_eq!(coerce_attribute_value("3.14"), json!(3.14));
    }

    #[test]
    fn test_coerce_plain_string() {
        assert_eq!(coerce_attribute_value("hello"), json!("hello"));
        // Partial numbers stay strings.
        assert_eq!(coerce_attribute_value("42kg"), json!("42kg"));
    }

    #[test]
    fn test_collect_drops_empty_key_or_value() {
        let rows = vec![
            AttributeRowInput {
                key: "brand".into(),
                value: "Birdy".into(),
            },
            AttributeRowInput {
                key: "".into(),
                value: "orphan".into(),
            },
            AttributeRowInput {
                key: "color".into(),
                value: "  ".into(),
            },
        ];
        let attributes = collect_attributes(&rows);
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes["brand"], json!("Birdy"));
    }

    #[test]
    fn test_attribute_display_round_trip() {
        assert_eq!(attribute_display_value(&json!(["iOS", "Android"])), "iOS, Android");
        assert_eq!(attribute_display_value(&json!(true)), "true");
        assert_eq!(attribute_display_value(&json!(2.5)), "2.5");
        assert_eq!(attribute_display_value(&json!("plain")), "plain");
    }

    #[test]
    fn test_parse_dimensions_pads_missing_components() {
        let d = parse_dimensions("10, 20");
        assert_eq!(d.length, 10.0);
        assert_eq!(d.width, 20.0);
        assert_eq!(d.height, 0.0);
        assert_eq!(d.unit, "cm");
    }

    #[test]
    fn test_parse_dimensions_defaults_unparsable_to_zero() {
        let d = parse_dimensions("x,4,5");
        assert_eq!(d.length, 0.0);
        assert_eq!(d.width, 4.0);
        assert_eq!(d.height, 5.0);
    }

    #[test]
    fn test_derive_sku() {
        assert_eq!(derive_sku("Bird Cage Large"), "BCL");
        assert_eq!(derive_sku("perch"), "P");
        assert_eq!(derive_sku("  double  spaced  "), "DS");
        assert_eq!(derive_sku(""), "");
    }

    #[test]
    fn test_build_payload_happy_path() {
        let payload = build_payload(&valid_form(), &[]).unwrap();
        assert_eq!(payload.sku, "BCL");
        assert_eq!(payload.price, 10.0);
        assert_eq!(payload.dimensions.height, 0.0);
        assert_eq!(payload.dimensions.unit, "cm");
        assert!(payload.attributes.is_empty());
    }

    #[test]
    fn test_zero_price_blocks_submission() {
        let mut form = valid_form();
        form.price = "0".into();
        assert_eq!(
            build_payload(&form, &[]),
            Err(ValidationError::NonPositivePrice)
        );
    }

    #[test]
    fn test_missing_name_names_the_field() {
        let mut form = valid_form();
        form.name = "  ".into();
        let err = build_payload(&form, &[]).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("name"));
        assert_eq!(err.to_string(), "Please fill in the name field.");
    }

    #[test]
    fn test_empty_price_counts_as_missing() {
        let mut form = valid_form();
        form.price = "".into();
        assert_eq!(
            build_payload(&form, &[]),
            Err(ValidationError::MissingField("price"))
        );
    }

    #[test]
    fn test_negative_stock_cites_stock() {
        let mut form = valid_form();
        form.stock_quantity = "-1".into();
        assert_eq!(
            build_payload(&form, &[]),
            Err(ValidationError::NegativeStock)
        );
    }

    #[test]
    fn test_form_from_product() {
        let product: Product = serde_json::from_value(json!({
            "product_id": 3,
            "name": "Perch Swing",
            "description": "Wooden",
            "price": 150.0,
            "cost_price": 90.0,
            "stock_quantity": 4,
            "min_stock_level": 1,
            "weight": 0.3,
            "dimensions": {"length": 12.0, "width": 3.0, "height": 3.0, "unit": "cm"},
            "attributes": {"brand": "Birdy", "colors": ["red", "blue"]},
            "is_active": true
        }))
        .unwrap();

        let (form, rows) = form_from_product(&product);
        assert_eq!(form.dimensions, "12,3,3");
        assert_eq!(form.price, "150");
        assert_eq!(rows.len(), 2);
        assert!(rows
            .iter()
            .any(|r| r.key == "colors" && r.value == "red, blue"));
    }

    #[test]
    fn test_form_from_product_without_attributes_keeps_one_row() {
        let product: Product = serde_json::from_value(json!({
            "product_id": 4,
            "name": "Bell",
            "price": 20.0,
            "cost_price": 8.0,
            "is_active": true
        }))
        .unwrap();
        let (_, rows) = form_from_product(&product);
        assert_eq!(rows, vec![AttributeRowInput::default()]);
    }
}
