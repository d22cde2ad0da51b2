//! Landing page for logged-in users.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::{self, AuthState};
use crate::state::storage::DefaultStore;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<DefaultStore>();
    let navigate = use_navigate();

    let username = move || auth.with(|state| state.user().map(|u| u.username.clone()).unwrap_or_default());
    let on_logout = move |_| session::logout(auth, &store, navigate.clone());

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>"Welcome, " {username}</h1>
                <button class="btn" on:click=on_logout>
                    "Log out"
                </button>
            </header>
            <nav class="home-page__nav">
                <a href="/products">"Browse products"</a>
                <a href="/products/create">"Add a product"</a>
            </nav>
        </div>
    }
}
