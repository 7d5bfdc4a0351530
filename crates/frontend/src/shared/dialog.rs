//! Blocking browser dialogs.
//!
//! Every user-facing failure notice and every destructive-action
//! confirmation goes through these two helpers. Outside a browser both
//! degrade to no-ops (`confirm` answers "no").

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    match web_sys::window() {
        Some(window) => window.confirm_with_message(message).unwrap_or(false),
        None => false,
    }
}
