//! Client-side routing: the route table and the navigation guard.

pub mod guard;
pub mod table;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
