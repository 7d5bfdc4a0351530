use leptos::prelude::*;

use crate::dashboards::overview::DashboardPage;
use crate::domain::orders::ui::list::OrdersList;
use crate::domain::products::ui::details::ProductDetails;
use crate::domain::products::ui::list::ProductsList;
use crate::layout::global_context::{use_app_context, Page};
use crate::layout::header::Header;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Header />
        <main class="app-main">
            {move || match ctx.page.get() {
                Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                Page::Orders => view! { <OrdersList /> }.into_any(),
                Page::Products => view! { <ProductsList /> }.into_any(),
                Page::ProductCreate => view! { <ProductDetails id=None::<i64> /> }.into_any(),
                Page::ProductEdit(product_id) => {
                    view! { <ProductDetails id=Some(product_id) /> }.into_any()
                }
            }}
        </main>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().token.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
