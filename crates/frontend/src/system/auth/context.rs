use contracts::system::auth::AdminInfo;
use leptos::prelude::*;

use super::storage;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub admin: Option<AdminInfo>,
}

impl AuthState {
    /// Rebuild the state from whatever the session store currently holds.
    /// Presence of the token is the only thing that matters; the server is
    /// trusted to reject a stale one when it is eventually used.
    fn restore() -> Self {
        match storage::get_token() {
            Some(token) => Self {
                token: Some(token),
                admin: storage::get_admin(),
            },
            None => Self::default(),
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::restore());

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}
