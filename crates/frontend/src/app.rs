use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;

#[component]
pub fn App() -> impl IntoView {
    // Provide the shell context to the whole app.
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
