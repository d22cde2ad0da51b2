//! Create and edit form for products.
//!
//! Mounted at `/products/create` (no `:id`) and `/products/:id/edit`.

#[cfg(test)]
#[path = "product_form_test.rs"]
mod product_form_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use super::products::parse_product_id;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::types::ProductInput;
use crate::state::session::AuthState;

fn validate_product_input(
    name: &str,
    description: &str,
    price: &str,
    image: &str,
) -> Result<ProductInput, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required.");
    }
    let price: f64 = price.trim().parse().map_err(|_| "Price must be a number.")?;
    if !price.is_finite() || price < 0.0 {
        return Err("Price must be zero or more.");
    }
    Ok(ProductInput {
        name: name.to_owned(),
        description: description.trim().to_owned(),
        price,
        image: image.trim().to_owned(),
    })
}

#[component]
pub fn ProductFormPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();
    let params = use_params_map();
    let navigate = use_navigate();

    let editing = Memo::new(move |_| params.with(|p| parse_product_id(p.get("id").as_deref())));

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let image = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Prefill when editing an existing product.
    Effect::new({
        let client = client.clone();
        move || {
            let Some(id) = editing.get() else {
                return;
            };
            let client = client.clone();
            let session = auth.with_untracked(|state| state.session().clone());
            leptos::task::spawn_local(async move {
                match api::fetch_product(&client, &session, id).await {
                    Ok(product) => {
                        let input = ProductInput::from(&product);
                        name.set(input.name);
                        description.set(input.description);
                        price.set(input.price.to_string());
                        image.set(input.image);
                    }
                    Err(e) => error.set(Some(format!("Could not load product: {e}"))),
                }
            });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = match validate_product_input(&name.get(), &description.get(), &price.get(), &image.get()) {
            Ok(input) => input,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        let client = client.clone();
        let navigate = navigate.clone();
        let session = auth.with_untracked(|state| state.session().clone());
        let target = editing.get_untracked();
        leptos::task::spawn_local(async move {
            let result = match target {
                Some(id) => api::update_product(&client, &session, id, &input).await,
                None => api::create_product(&client, &session, &input).await,
            };
            busy.set(false);
            match result {
                Ok(product) => navigate(&format!("/products/{}", product.id), NavigateOptions::default()),
                Err(e) => error.set(Some(format!("Save failed: {e}"))),
            }
        });
    };

    let title = move || if editing.get().is_some() { "Edit Product" } else { "New Product" };

    view! {
        <div class="product-form-page">
            <h1>{title}</h1>
            <form class="product-form" on:submit=on_submit>
                <label class="product-form__label">
                    "Name"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="product-form__label">
                    "Description"
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label class="product-form__label">
                    "Price"
                    <input
                        type="number"
                        step="0.01"
                        prop:value=move || price.get()
                        on:input=move |ev| price.set(event_target_value(&ev))
                    />
                </label>
                <label class="product-form__label">
                    "Image"
                    <input
                        type="text"
                        prop:value=move || image.get()
                        on:input=move |ev| image.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
            </form>
            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
