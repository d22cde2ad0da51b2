//! Networking modules for the catalog REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` holds the shared client and its auth policy, `api` the endpoint
//! calls, and `types` the wire schema.

pub mod api;
pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
