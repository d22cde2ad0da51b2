use super::*;

fn alice() -> User {
    User { id: 1, username: "alice".to_owned(), email: Some("a@x.com".to_owned()) }
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_get_set_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    store.remove("k").unwrap();
    assert!(!store.contains("k"));
}

#[test]
fn memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(other.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
}

#[test]
fn removing_missing_key_is_ok() {
    let store = MemoryStore::new();
    assert!(store.remove("missing").is_ok());
}

// =============================================================
// Credential record
// =============================================================

#[test]
fn write_credentials_stores_user_json_and_raw_token() {
    let store = MemoryStore::new();
    write_credentials(&store, &alice(), "abc123").unwrap();

    let user_json = store.get(USER_KEY).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&user_json).unwrap();
    assert_eq!(parsed, serde_json::json!({"id": 1, "username": "alice", "email": "a@x.com"}));
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
}

#[test]
fn clear_credentials_removes_both_keys_only() {
    let store = MemoryStore::with_entries([(USER_KEY, "{}"), (TOKEN_KEY, "t"), ("theme", "dark")]);
    clear_credentials(&store).unwrap();
    assert!(!store.contains(USER_KEY));
    assert!(!store.contains(TOKEN_KEY));
    assert!(store.contains("theme"));
}
