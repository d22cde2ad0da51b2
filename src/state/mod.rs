//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the in-memory source of truth for who is logged in;
//! `storage` is its durable mirror.

pub mod session;
pub mod storage;
