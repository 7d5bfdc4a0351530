//! Wire-format contracts between the admin frontend and the commerce API.
//!
//! Everything here mirrors the JSON the API actually sends, including its
//! quirks (camelCase token field on login, Node-style byte buffers for
//! stored images, decimal amounts that may arrive as strings).

pub mod domain;
pub mod system;
