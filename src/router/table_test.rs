use super::*;

fn name_of(path: &str) -> Option<&'static str> {
    find_route(path).map(|route| route.name)
}

// =============================================================
// normalize_path
// =============================================================

#[test]
fn normalize_strips_query_fragment_and_trailing_slash() {
    assert_eq!(normalize_path("/products/?page=2"), "/products");
    assert_eq!(normalize_path("/login#top"), "/login");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("//"), "/");
}

// =============================================================
// find_route
// =============================================================

#[test]
fn resolves_every_declared_route() {
    assert_eq!(name_of("/"), Some("Home"));
    assert_eq!(name_of("/login"), Some("Login"));
    assert_eq!(name_of("/register"), Some("Register"));
    assert_eq!(name_of("/products"), Some("products"));
    assert_eq!(name_of("/products/7"), Some("product-detail"));
    assert_eq!(name_of("/products/7/edit"), Some("edit-product"));
}

#[test]
fn static_segment_beats_param_segment() {
    assert_eq!(name_of("/products/create"), Some("create-product"));
}

#[test]
fn unknown_paths_have_no_route() {
    assert_eq!(name_of("/about"), None);
    assert_eq!(name_of("/products/7/delete"), None);
}

#[test]
fn empty_param_segment_does_not_match() {
    assert_eq!(name_of("/products//edit"), None);
}

#[test]
fn every_route_except_login_and_register_requires_auth() {
    for route in ROUTES {
        let public = matches!(route.path, "/login" | "/register");
        assert_eq!(route.requires_auth, !public, "{}", route.path);
    }
}
