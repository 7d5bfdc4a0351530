use serde::{Deserialize, Serialize};

/// Body of `POST /admin/login`. The form labels the field "username" but
/// accepts an email address; the API does not care.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Sentinel message the API puts in a successful login response.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Admin login successful";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(rename = "adminToken")]
    pub admin_token: String,
    pub admin: AdminInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminInfo {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

/// Body of `POST /admin/change-password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Generic `{ "message": ... }` / `{ "error": ... }` body most admin
/// endpoints answer with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_field_names() {
        let json = r#"{
            "message": "Admin login successful",
            "adminToken": "tok-123",
            "admin": {"first_name": "Priya", "last_name": "Nair", "username": "priya"}
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.message, LOGIN_SUCCESS_MESSAGE);
        assert_eq!(resp.admin_token, "tok-123");
        assert_eq!(resp.admin.username, "priya");
    }

    #[test]
    fn test_change_password_is_camel_case() {
        let req = ChangePasswordRequest {
            old_password: "a".into(),
            new_password: "b".into(),
            confirm_password: "b".into(),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"oldPassword":"a","newPassword":"b","confirmPassword":"b"}"#
        );
    }
}
