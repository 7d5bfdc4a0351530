use contracts::system::auth::{ApiMessage, ChangePasswordRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_client::ApiError;
use crate::shared::dialog;
use crate::system::auth::api;

/// Modal form for the change-password endpoint. The server owns the
/// validation (old password check, new/confirm match); this form only
/// relays its verdict.
#[component]
pub fn ChangePasswordModal(on_close: Callback<()>) -> impl IntoView {
    let (old_password, set_old_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = ChangePasswordRequest {
            old_password: old_password.get(),
            new_password: new_password.get(),
            confirm_password: confirm_password.get(),
        };

        set_is_loading.set(true);

        spawn_local(async move {
            match api::change_password(&request).await {
                Ok(result) => {
                    dialog::alert(
                        result
                            .message
                            .as_deref()
                            .unwrap_or("Password changed successfully."),
                    );
                    on_close.run(());
                }
                Err(ApiError::Http { status, body }) => {
                    log::error!("Change password rejected: HTTP {} {}", status, body);
                    let server_error = serde_json::from_str::<ApiMessage>(&body)
                        .ok()
                        .and_then(|m| m.error);
                    dialog::alert(
                        server_error
                            .as_deref()
                            .unwrap_or("Failed to change password. Please try again."),
                    );
                }
                Err(e) => {
                    log::error!("Change password failed: {}", e);
                    dialog::alert("Failed to change password. Please try again.");
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="modal-overlay">
            <div class="modal-content">
                <h3>"Change Password"</h3>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="oldPassword">"Current password"</label>
                        <input
                            type="password"
                            id="oldPassword"
                            prop:value=move || old_password.get()
                            on:input=move |ev| set_old_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <div class="form-group">
                        <label for="newPassword">"New password"</label>
                        <input
                            type="password"
                            id="newPassword"
                            prop:value=move || new_password.get()
                            on:input=move |ev| set_new_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <div class="form-group">
                        <label for="reNewPassword">"Repeat new password"</label>
                        <input
                            type="password"
                            id="reNewPassword"
                            prop:value=move || confirm_password.get()
                            on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>
                    <div class="details-actions">
                        <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Saving..." } else { "Save" }}
                        </button>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            on:click=move |_| on_close.run(())
                        >
                            "Cancel"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
