use leptos::prelude::*;

/// The authenticated shell's pages. Switching is an explicit state change
/// on [`AppGlobalContext`]; there is no URL router behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Orders,
    Products,
    ProductCreate,
    ProductEdit(i64),
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub page: RwSignal<Page>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(Page::Dashboard),
        }
    }

    pub fn navigate(&self, page: Page) {
        self.page.set(page);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access the shell context.
pub fn use_app_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found in component tree")
}
