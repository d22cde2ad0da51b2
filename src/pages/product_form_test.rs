use super::*;

#[test]
fn validate_product_input_trims_fields() {
    let input = validate_product_input("  Lamp ", " Desk lamp ", " 19.50 ", " lamp.png ").unwrap();
    assert_eq!(
        input,
        ProductInput {
            name: "Lamp".to_owned(),
            description: "Desk lamp".to_owned(),
            price: 19.5,
            image: "lamp.png".to_owned(),
        }
    );
}

#[test]
fn validate_product_input_requires_name() {
    assert_eq!(validate_product_input("  ", "", "1", ""), Err("Name is required."));
}

#[test]
fn validate_product_input_rejects_bad_prices() {
    assert_eq!(validate_product_input("Lamp", "", "cheap", ""), Err("Price must be a number."));
    assert_eq!(validate_product_input("Lamp", "", "-1", ""), Err("Price must be zero or more."));
    assert_eq!(validate_product_input("Lamp", "", "NaN", ""), Err("Price must be zero or more."));
}

#[test]
fn validate_product_input_allows_free_items() {
    assert!(validate_product_input("Sticker", "", "0", "").is_ok());
}
