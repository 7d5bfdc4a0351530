use contracts::system::auth::{ApiMessage, ChangePasswordRequest, LoginRequest, LoginResponse};

use crate::shared::api_client::{post_json, ApiError};

/// Login with username and password. The only call made without a token.
pub async fn login(username: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };
    post_json("/admin/login", &request, false).await
}

/// Change the admin password. The server validates the old password and
/// that the two new values match; the response carries its verdict in
/// `message` / `error`.
pub async fn change_password(request: &ChangePasswordRequest) -> Result<ApiMessage, ApiError> {
    post_json("/admin/change-password", request, true).await
}
