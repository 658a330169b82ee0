use super::*;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn european_format() {
    assert_eq!(normalize_price("1.234,56"), Some(dec("1234.56")));
}

#[test]
fn plain_decimal_format() {
    assert_eq!(normalize_price("1234.56"), Some(dec("1234.56")));
}

#[test]
fn currency_symbol_prefix() {
    assert_eq!(normalize_price("₺1.234,56"), Some(dec("1234.56")));
}

#[test]
fn currency_label_suffix_with_trailing_dot() {
    assert_eq!(normalize_price("1.299,00 TL."), Some(dec("1299.00")));
}

#[test]
fn us_thousands_format() {
    assert_eq!(normalize_price("$1,234.56"), Some(dec("1234.56")));
}

#[test]
fn comma_decimal_only() {
    assert_eq!(normalize_price("23,99 €"), Some(dec("23.99")));
}

#[test]
fn dot_followed_by_three_digits_is_thousands() {
    assert_eq!(normalize_price("1.234 TL"), Some(dec("1234")));
}

#[test]
fn multiple_dots_are_thousands() {
    assert_eq!(normalize_price("1.234.567"), Some(dec("1234567")));
}

#[test]
fn multiple_commas_are_thousands() {
    assert_eq!(normalize_price("1,234,567"), Some(dec("1234567")));
}

#[test]
fn short_fraction_is_decimal() {
    assert_eq!(normalize_price("199.9"), Some(dec("199.9")));
    assert_eq!(normalize_price("199.90"), Some(dec("199.90")));
}

#[test]
fn integer_price() {
    assert_eq!(normalize_price("Fiyat: 450 TL"), Some(dec("450")));
}

#[test]
fn empty_input_is_absent() {
    assert!(normalize_price("").is_none());
}

#[test]
fn non_numeric_input_is_absent() {
    assert!(normalize_price("Fiyat bilgisi yok").is_none());
    assert!(normalize_price(".,.").is_none());
}
