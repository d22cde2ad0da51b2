//! Product list and detail pages.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::types::{Product, ProductId};
use crate::state::session::AuthState;

fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Parse the `:id` route segment.
pub(crate) fn parse_product_id(raw: Option<&str>) -> Option<ProductId> {
    raw?.trim().parse().ok()
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();

    let products = LocalResource::new(move || {
        let client = client.clone();
        let session = auth.with(|state| state.session().clone());
        async move { api::list_products(&client, &session).await }
    });

    view! {
        <div class="products-page">
            <header class="products-page__header">
                <h1>"Products"</h1>
                <a href="/products/create" class="btn btn--primary">
                    "+ New Product"
                </a>
            </header>
            <Suspense fallback=move || view! { <p>"Loading products..."</p> }>
                {move || {
                    products
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => view! { <p>"No products yet."</p> }.into_any(),
                            Ok(list) => {
                                view! {
                                    <ul class="product-list">
                                        {list
                                            .into_iter()
                                            .map(|product| view! { <ProductRow product=product/> })
                                            .collect::<Vec<_>>()}
                                    </ul>
                                }
                                    .into_any()
                            }
                            Err(e) => {
                                view! { <p class="error">{format!("Could not load products: {e}")}</p> }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn ProductRow(product: Product) -> impl IntoView {
    let href = format!("/products/{}", product.id);
    view! {
        <li class="product-list__item">
            <a href=href>{product.name}</a>
            <span class="product-list__price">{format_price(product.price)}</span>
        </li>
    }
}

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();
    let params = use_params_map();
    let navigate = use_navigate();
    let error = RwSignal::new(None::<String>);

    let id = Memo::new(move |_| params.with(|p| parse_product_id(p.get("id").as_deref())));

    let product = LocalResource::new({
        let client = client.clone();
        move || {
            let client = client.clone();
            let session = auth.with(|state| state.session().clone());
            let id = id.get();
            async move {
                match id {
                    Some(id) => Some(api::fetch_product(&client, &session, id).await),
                    None => None,
                }
            }
        }
    });

    let on_delete = move |_| {
        let Some(product_id) = id.get_untracked() else {
            return;
        };
        let client = client.clone();
        let navigate = navigate.clone();
        let session = auth.with_untracked(|state| state.session().clone());
        leptos::task::spawn_local(async move {
            match api::delete_product(&client, &session, product_id).await {
                Ok(()) => navigate("/products", NavigateOptions::default()),
                Err(e) => error.set(Some(format!("Delete failed: {e}"))),
            }
        });
    };

    view! {
        <div class="product-page">
            <a href="/products">"< All products"</a>
            <Suspense fallback=move || view! { <p>"Loading product..."</p> }>
                {move || {
                    product
                        .get()
                        .map(|result| match result {
                            None => view! { <p class="error">"Unknown product."</p> }.into_any(),
                            Some(Ok(product)) => {
                                let edit_href = format!("/products/{}/edit", product.id);
                                let owner = product.user.map(|u| u.username);
                                view! {
                                    <article class="product-card">
                                        <img class="product-card__image" src=product.image alt=product.name.clone()/>
                                        <h1>{product.name}</h1>
                                        <p class="product-card__price">{format_price(product.price)}</p>
                                        <p>{product.description}</p>
                                        {owner
                                            .map(|name| {
                                                view! { <p class="product-card__owner">"Listed by " {name}</p> }
                                            })}
                                        <a href=edit_href class="btn">
                                            "Edit"
                                        </a>
                                    </article>
                                }
                                    .into_any()
                            }
                            Some(Err(e)) => {
                                view! { <p class="error">{format!("Could not load product: {e}")}</p> }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
            <button class="btn btn--danger" on:click=on_delete>
                "Delete"
            </button>
            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
