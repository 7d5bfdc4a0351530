pub mod dto;

pub use dto::{
    CreateProductResponse, Dimensions, ImageBuffer, ImageUpload, ImageUploadRequest, Product,
    ProductImage, ProductPayload, ProductsListResponse,
};
