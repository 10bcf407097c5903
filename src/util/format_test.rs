use super::*;

#[test]
fn format_price_two_decimals() {
    assert_eq!(format_price(12.5), "$12.50");
    assert_eq!(format_price(0.0), "$0.00");
    assert_eq!(format_price(f64::NAN), "$0.00");
}

#[test]
fn format_plain_number_drops_integer_fraction() {
    assert_eq!(format_plain_number(30.0), "30");
    assert_eq!(format_plain_number(30.5), "30.5");
}

#[test]
fn parse_amount_rejects_garbage() {
    assert_eq!(parse_amount(" 50 "), Some(50.0));
    assert_eq!(parse_amount("12.75"), Some(12.75));
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("inf"), None);
}

#[test]
fn parse_timestamp_accepts_offset_and_naive_forms() {
    let with_offset = parse_timestamp("2024-03-05T10:30:00Z").unwrap();
    let naive = parse_timestamp("2024-03-05T10:30:00").unwrap();
    assert_eq!(with_offset, naive);
    assert!(parse_timestamp("yesterday").is_none());
}

#[test]
fn format_date_styles() {
    let raw = "2024-03-05T14:07:00Z";
    assert_eq!(format_date(raw, DateStyle::Long), "March 5, 2024");
    assert_eq!(format_date(raw, DateStyle::Short), "Mar 5, 2024");
    assert_eq!(format_date(raw, DateStyle::ShortWithTime), "Mar 5, 2024, 2:07 PM");
}

#[test]
fn format_date_passes_through_unparseable_input() {
    assert_eq!(format_date("soon", DateStyle::Long), "soon");
}

#[test]
fn progress_percent_caps_and_guards() {
    assert!((progress_percent(250.0, 1000.0) - 25.0).abs() < f64::EPSILON);
    assert!((progress_percent(1500.0, 1000.0) - 100.0).abs() < f64::EPSILON);
    assert!(progress_percent(10.0, 0.0).abs() < f64::EPSILON);
}
