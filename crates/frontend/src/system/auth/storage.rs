//! Session store adapter.
//!
//! The admin session lives in sessionStorage, scoped to the browser tab:
//! the bearer token plus the display fields shown in the header. Token
//! presence is the sole authentication signal; no expiry is tracked here.
//! A stale token is discovered reactively when an API call fails.

use contracts::system::auth::AdminInfo;
use web_sys::window;

const TOKEN_KEY: &str = "adminToken";
const FIRST_NAME_KEY: &str = "firstName";
const LAST_NAME_KEY: &str = "lastName";
const USERNAME_KEY: &str = "username";

fn get_session_storage() -> Option<web_sys::Storage> {
    window()?.session_storage().ok()?
}

fn get_item(key: &str) -> Option<String> {
    get_session_storage()?.get_item(key).ok()?
}

fn set_item(key: &str, value: &str) {
    if let Some(storage) = get_session_storage() {
        let _ = storage.set_item(key, value);
    }
}

/// Save the whole session after a successful login.
pub fn save_session(token: &str, admin: &AdminInfo) {
    set_item(TOKEN_KEY, token);
    set_item(FIRST_NAME_KEY, &admin.first_name);
    set_item(LAST_NAME_KEY, &admin.last_name);
    set_item(USERNAME_KEY, &admin.username);
}

/// Get the bearer token, if a session exists.
pub fn get_token() -> Option<String> {
    get_item(TOKEN_KEY)
}

/// Get the stored admin display fields, if a session exists.
pub fn get_admin() -> Option<AdminInfo> {
    Some(AdminInfo {
        first_name: get_item(FIRST_NAME_KEY)?,
        last_name: get_item(LAST_NAME_KEY)?,
        username: get_item(USERNAME_KEY)?,
    })
}

/// Drop the entire session (logout or forced re-authentication).
pub fn clear_session() {
    if let Some(storage) = get_session_storage() {
        let _ = storage.clear();
    }
}
