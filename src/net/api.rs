//! REST endpoints of the catalog backend.
//!
//! Every call takes the caller's `Session` so the shared client can attach
//! the bearer token.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::client::{ApiClient, ApiError, Method, Transport};
use super::types::{LoginCredentials, LoginResponse, Product, ProductId, ProductInput};
use crate::state::session::Session;

pub const LOGIN_ENDPOINT: &str = "/login";
pub const PRODUCTS_ENDPOINT: &str = "/products";

fn product_endpoint(id: ProductId) -> String {
    format!("{PRODUCTS_ENDPOINT}/{id}")
}

/// `POST /login`.
///
/// # Errors
///
/// Any transport, status, or decode failure is returned unchanged.
pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    credentials: &LoginCredentials,
) -> Result<LoginResponse, ApiError> {
    client.send_json(Method::POST, LOGIN_ENDPOINT, session, credentials).await
}

/// `GET /products`.
///
/// # Errors
///
/// Any transport, status, or decode failure is returned unchanged.
pub async fn list_products<T: Transport>(client: &ApiClient<T>, session: &Session) -> Result<Vec<Product>, ApiError> {
    client.get_json(PRODUCTS_ENDPOINT, session).await
}

/// `GET /products/{id}`.
///
/// # Errors
///
/// Any transport, status, or decode failure is returned unchanged.
pub async fn fetch_product<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    id: ProductId,
) -> Result<Product, ApiError> {
    client.get_json(&product_endpoint(id), session).await
}

/// `POST /products`.
///
/// # Errors
///
/// Any transport, status, or decode failure is returned unchanged.
pub async fn create_product<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    input: &ProductInput,
) -> Result<Product, ApiError> {
    client.send_json(Method::POST, PRODUCTS_ENDPOINT, session, input).await
}

/// `PUT /products/{id}`.
///
/// # Errors
///
/// Any transport, status, or decode failure is returned unchanged.
pub async fn update_product<T: Transport>(
    client: &ApiClient<T>,
    session: &Session,
    id: ProductId,
    input: &ProductInput,
) -> Result<Product, ApiError> {
    client.send_json(Method::PUT, &product_endpoint(id), session, input).await
}

/// `DELETE /products/{id}`.
///
/// # Errors
///
/// Any transport or status failure is returned unchanged.
pub async fn delete_product<T: Transport>(client: &ApiClient<T>, session: &Session, id: ProductId) -> Result<(), ApiError> {
    client.send_empty(Method::DELETE, &product_endpoint(id), session).await
}
