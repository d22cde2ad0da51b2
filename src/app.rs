//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::AppConfig;
use crate::net::client::ApiClient;
use crate::pages::{
    home::HomePage,
    login::LoginPage,
    product_form::ProductFormPage,
    products::{ProductDetailPage, ProductsPage},
    register::RegisterPage,
};
use crate::router::guard::RouteGuard;
use crate::state::session::AuthState;
use crate::state::storage::DefaultStore;

/// Root application component.
///
/// Restores the session from storage, provides the session signal, the
/// shared API client, and the credential store as contexts, and mounts the
/// guarded routes.
#[component]
pub fn App(#[prop(optional)] config: Option<AppConfig>) -> impl IntoView {
    provide_meta_context();

    let config = config.unwrap_or_else(AppConfig::from_build_env);
    let store = DefaultStore::default();
    let auth = RwSignal::new(AuthState::initialize(&store));
    let client = ApiClient::from_config(&config);

    provide_context(auth);
    provide_context(client);
    provide_context(store);

    view! {
        <Title text="Catalog"/>

        <Router>
            <RouteGuard>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("products") view=ProductsPage/>
                    <Route path=(StaticSegment("products"), StaticSegment("create")) view=ProductFormPage/>
                    <Route path=(StaticSegment("products"), ParamSegment("id")) view=ProductDetailPage/>
                    <Route
                        path=(StaticSegment("products"), ParamSegment("id"), StaticSegment("edit"))
                        view=ProductFormPage
                    />
                </Routes>
            </RouteGuard>
        </Router>
    }
}
