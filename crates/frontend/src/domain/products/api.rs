use contracts::domain::products::{
    CreateProductResponse, ImageUpload, ImageUploadRequest, Product, ProductPayload,
    ProductsListResponse,
};
use serde_json::Value;

use crate::shared::api_client::{delete_json, get_json, patch_empty, post_json, put_json, ApiError};

pub async fn fetch_products() -> Result<ProductsListResponse, ApiError> {
    get_json("/products/admin/all?include_inactive=true", true).await
}

/// Single-product fetch used by the edit form. The storefront exposes this
/// endpoint anonymously, so no token is attached.
pub async fn fetch_product(product_id: i64) -> Result<Product, ApiError> {
    get_json(&format!("/products/{}", product_id), false).await
}

pub async fn create_product(payload: &ProductPayload) -> Result<CreateProductResponse, ApiError> {
    post_json("/products", payload, true).await
}

pub async fn update_product(product_id: i64, payload: &ProductPayload) -> Result<Value, ApiError> {
    put_json(&format!("/products/{}", product_id), payload, true).await
}

pub async fn delete_product(product_id: i64) -> Result<Value, ApiError> {
    delete_json(&format!("/products/{}", product_id), true).await
}

pub async fn flip_product_status(product_id: i64) -> Result<Value, ApiError> {
    patch_empty(&format!("/products/{}/flip-status", product_id), true).await
}

/// Attach the full ordered batch in one call.
pub async fn upload_images(product_id: i64, images: Vec<ImageUpload>) -> Result<Value, ApiError> {
    post_json(
        &format!("/products/{}/images", product_id),
        &ImageUploadRequest { images },
        true,
    )
    .await
}

/// Drop every stored image; the edit flow re-uploads the staged set after.
pub async fn delete_images(product_id: i64) -> Result<Value, ApiError> {
    delete_json(&format!("/products/{}/images", product_id), true).await
}
