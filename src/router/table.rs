//! Route table with per-route auth requirements.
//!
//! The Leptos `<Routes>` tree in `app` mounts the pages; this table is the
//! single place auth metadata lives, and the guard resolves paths against it.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    /// Path pattern; `:name` segments match any single non-empty segment.
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef { path: "/", name: "Home", requires_auth: true },
    RouteDef { path: "/login", name: "Login", requires_auth: false },
    RouteDef { path: "/register", name: "Register", requires_auth: false },
    RouteDef { path: "/products", name: "products", requires_auth: true },
    RouteDef { path: "/products/:id", name: "product-detail", requires_auth: true },
    RouteDef { path: "/products/create", name: "create-product", requires_auth: true },
    RouteDef { path: "/products/:id/edit", name: "edit-product", requires_auth: true },
];

/// Strip query and fragment, and any trailing slash except on the root.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Resolve a concrete path to its route definition.
///
/// When several patterns match, the one with more static segments wins.
pub fn find_route(path: &str) -> Option<&'static RouteDef> {
    let path = normalize_path(path);
    ROUTES
        .iter()
        .filter_map(|route| match_score(route.path, path).map(|score| (score, route)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, route)| route)
}

fn match_score(pattern: &str, path: &str) -> Option<usize> {
    let pattern_segments: Vec<&str> = pattern.trim_start_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut static_segments = 0;
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if expected.starts_with(':') {
            if actual.is_empty() {
                return None;
            }
        } else if expected == actual {
            static_segments += 1;
        } else {
            return None;
        }
    }
    Some(static_segments)
}
