use leptos::prelude::*;

use crate::layout::global_context::{use_app_context, Page};
use crate::system::auth::{context::use_auth, context::AuthState, storage};
use crate::system::pages::change_password::ChangePasswordModal;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, set_auth_state) = use_auth();
    let (show_change_password, set_show_change_password) = signal(false);

    let admin_name = move || {
        auth_state
            .get()
            .admin
            .map(|a| format!("{} {}", a.first_name, a.last_name))
            .unwrap_or_default()
    };

    let nav_class = move |page: Page| {
        if ctx.page.get() == page {
            "nav-link active"
        } else {
            "nav-link"
        }
    };

    let logout = move |_| {
        storage::clear_session();
        set_auth_state.set(AuthState::default());
    };

    view! {
        <header class="app-header">
            <div class="brand">"Storefront Admin"</div>
            <nav class="app-nav">
                <button
                    class=move || nav_class(Page::Dashboard)
                    on:click=move |_| ctx.navigate(Page::Dashboard)
                >
                    "Dashboard"
                </button>
                <button
                    class=move || nav_class(Page::Orders)
                    on:click=move |_| ctx.navigate(Page::Orders)
                >
                    "Orders"
                </button>
                <button
                    class=move || nav_class(Page::Products)
                    on:click=move |_| ctx.navigate(Page::Products)
                >
                    "Products"
                </button>
            </nav>
            <div class="header-actions">
                <span class="admin-name">{admin_name}</span>
                <button
                    class="btn btn-secondary btn-sm"
                    on:click=move |_| set_show_change_password.set(true)
                >
                    "Change Password"
                </button>
                <button class="btn btn-secondary btn-sm" on:click=logout>
                    "Logout"
                </button>
            </div>

            {move || {
                if show_change_password.get() {
                    view! {
                        <ChangePasswordModal on_close=Callback::new(move |_| {
                            set_show_change_password.set(false)
                        }) />
                    }
                        .into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}
        </header>
    }
}
