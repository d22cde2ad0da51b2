//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it pulls the session, client,
//! and store from context and keeps rendering minimal.

pub mod home;
pub mod login;
pub mod product_form;
pub mod products;
pub mod register;
