use super::*;

#[test]
fn format_price_uses_two_decimals() {
    assert_eq!(format_price(19.5), "$19.50");
    assert_eq!(format_price(0.0), "$0.00");
}

#[test]
fn parse_product_id_accepts_numeric_segment() {
    assert_eq!(parse_product_id(Some("42")), Some(42));
    assert_eq!(parse_product_id(Some(" 7 ")), Some(7));
}

#[test]
fn parse_product_id_rejects_missing_or_non_numeric() {
    assert_eq!(parse_product_id(None), None);
    assert_eq!(parse_product_id(Some("create")), None);
    assert_eq!(parse_product_id(Some("")), None);
}
