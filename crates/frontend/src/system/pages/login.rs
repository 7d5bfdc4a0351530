use contracts::system::auth::LOGIN_SUCCESS_MESSAGE;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_client::ApiError;
use crate::system::auth::{api, context::use_auth, context::AuthState, storage};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();

        if username_val.is_empty() || password_val.is_empty() {
            set_error_message.set(Some(
                "Please enter both username and password.".to_string(),
            ));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(username_val, password_val).await {
                Ok(response) if response.message == LOGIN_SUCCESS_MESSAGE => {
                    storage::save_session(&response.admin_token, &response.admin);

                    // Flipping the auth state switches the shell to MainLayout
                    set_auth_state.set(AuthState {
                        token: Some(response.admin_token),
                        admin: Some(response.admin),
                    });

                    set_is_loading.set(false);
                }
                Ok(response) => {
                    log::warn!("Unexpected login response: {}", response.message);
                    set_error_message.set(Some(
                        "Login failed. Please check your credentials.".to_string(),
                    ));
                    set_is_loading.set(false);
                }
                Err(ApiError::Http { status, body }) => {
                    log::error!("Login rejected: HTTP {} {}", status, body);
                    set_error_message
                        .set(Some("Invalid credentials. Please try again.".to_string()));
                    set_is_loading.set(false);
                }
                Err(e) => {
                    log::error!("Login error: {}", e);
                    set_error_message.set(Some("Login failed. Please try again.".to_string()));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Storefront Admin"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="admin-username">"Username"</label>
                        <input
                            type="text"
                            id="admin-username"
                            placeholder="admin@example.com"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="admin-password">"Password"</label>
                        <input
                            type="password"
                            id="admin-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
