//! Property-based tests for quote-api
//!
//! Tests the API models and validation logic using proptest.

use proptest::prelude::*;

// ============================================================
// Quote Number Validation
// ============================================================

/// Quote numbers follow the QUO-YYYY-NNNN convention
fn quote_number() -> impl Strategy<Value = String> {
    (2020u32..2035, 0u32..10000).prop_map(|(year, seq)| format!("QUO-{year}-{seq:04}"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Quote Number Tests
    // ============================================================

    #[test]
    fn quote_numbers_match_the_convention(number in quote_number()) {
        let pattern = regex::Regex::new(r"^QUO-\d{4}-\d{4}$").unwrap();
        prop_assert!(pattern.is_match(&number));
    }

    // ============================================================
    // Totals Arithmetic Tests
    // ============================================================

    #[test]
    fn line_totals_scale_linearly(quantity in 1u32..1000, unit_price in 0.0f64..10_000.0) {
        let total = f64::from(quantity) * unit_price;
        prop_assert!(total >= 0.0);
        prop_assert!((total - f64::from(quantity) * unit_price).abs() < 1e-9);
    }

    #[test]
    fn percentage_discount_never_exceeds_subtotal_for_sane_rates(
        subtotal in 0.0f64..100_000.0,
        rate in 0.0f64..=100.0
    ) {
        let discount = subtotal * rate / 100.0;
        prop_assert!(discount >= 0.0);
        prop_assert!(discount <= subtotal + 1e-9);
        prop_assert!(subtotal - discount >= -1e-9);
    }

    #[test]
    fn fixed_discount_can_push_totals_negative(
        subtotal in 0.0f64..1000.0,
        discount in 0.0f64..2000.0
    ) {
        // Oversized fixed discounts are passed through, not clamped
        let total = subtotal - discount;
        prop_assert!((subtotal - total - discount).abs() < 1e-9);
    }

    // ============================================================
    // Status Tests
    // ============================================================

    #[test]
    fn quote_status_values_are_valid(
        status in prop_oneof![
            Just("draft"),
            Just("sent"),
            Just("accepted"),
            Just("rejected"),
            Just("expired")
        ]
    ) {
        prop_assert!(!status.is_empty());
        prop_assert!(status.chars().all(|c| c.is_ascii_lowercase()));

        let valid_statuses = ["draft", "sent", "accepted", "rejected", "expired"];
        prop_assert!(valid_statuses.contains(&status));
    }

    #[test]
    fn request_status_values_are_valid(
        status in prop_oneof![
            Just("new"),
            Just("contacted"),
            Just("quoted"),
            Just("converted")
        ]
    ) {
        let valid_statuses = ["new", "contacted", "quoted", "converted"];
        prop_assert!(valid_statuses.contains(&status));
    }

    // ============================================================
    // Identifier Tests
    // ============================================================

    #[test]
    fn row_ids_are_uuid_shaped(
        id in "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
    ) {
        prop_assert_eq!(id.len(), 36);
        prop_assert!(id.chars().all(|c| c.is_ascii_hexdigit() || c == '-'));
    }

    // ============================================================
    // Export Filename Tests
    // ============================================================

    #[test]
    fn export_filenames_stay_header_safe(
        number in quote_number(),
        name in "[A-Za-z '&.]{1,40}"
    ) {
        // Same sanitization the exporter applies: anything outside
        // [A-Za-z0-9.-] becomes an underscore
        let safe_name: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        let filename = format!("Quote-{number}-{safe_name}.pdf");

        prop_assert!(filename.ends_with(".pdf"));
        prop_assert!(!filename.contains(' '));
        prop_assert!(!filename.contains('"'));
        prop_assert!(filename
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')));
    }

    // ============================================================
    // Pagination Geometry Tests
    // ============================================================

    #[test]
    fn page_counts_cover_the_image(width in 100u32..5000, height in 100u32..50_000) {
        // A4 portrait at a 210mm-wide image
        let image_height_mm = 210.0 * f64::from(height) / f64::from(width);
        let pages = (image_height_mm / 297.0).ceil().max(1.0) as u32;

        prop_assert!(pages >= 1);
        prop_assert!(f64::from(pages) * 297.0 >= image_height_mm - 1e-6);
        prop_assert!(f64::from(pages - 1) * 297.0 < image_height_mm || pages == 1);
    }

    // ============================================================
    // PDF Data Tests
    // ============================================================

    #[test]
    fn pdf_magic_bytes_check(rest in proptest::collection::vec(any::<u8>(), 0..100)) {
        let mut pdf_data = vec![0x25, 0x50, 0x44, 0x46, 0x2D]; // %PDF-
        pdf_data.extend(rest);

        prop_assert!(pdf_data.len() >= 5);
        prop_assert_eq!(&pdf_data[0..5], b"%PDF-");
    }

    #[test]
    fn base64_attachment_roundtrip(data in proptest::collection::vec(any::<u8>(), 10..500)) {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let encoded = STANDARD.encode(&data);
        let decoded = STANDARD.decode(&encoded).unwrap();

        prop_assert_eq!(data, decoded);
    }

    // ============================================================
    // Error Response Tests
    // ============================================================

    #[test]
    fn http_status_codes_are_valid(
        status in prop_oneof![
            Just(200u16), // OK
            Just(201u16), // Created
            Just(204u16), // No Content
            Just(400u16), // Bad Request
            Just(401u16), // Unauthorized
            Just(404u16), // Not Found
            Just(429u16), // Too Many Requests
            Just(500u16), // Internal Server Error
            Just(502u16), // Bad Gateway (email provider)
            Just(503u16), // Service Unavailable (no mailer)
            Just(504u16), // Gateway Timeout (slow export)
        ]
    ) {
        prop_assert!(status >= 100 && status < 600);
    }

    // ============================================================
    // Timestamp Tests
    // ============================================================

    #[test]
    fn rfc3339_timestamps_collate_chronologically(
        year_a in 2020i32..2030,
        year_b in 2020i32..2030,
        month in 1u32..13,
        day in 1u32..29
    ) {
        let a = format!("{year_a:04}-{month:02}-{day:02}T00:00:00Z");
        let b = format!("{year_b:04}-{month:02}-{day:02}T00:00:00Z");

        // String order matches time order, which the store relies on
        prop_assert_eq!(a < b, year_a < year_b);
    }
}

// ============================================================
// Unit Tests (non-property)
// ============================================================

#[cfg(test)]
mod unit_tests {
    #[test]
    fn test_quote_status_variants() {
        let statuses = ["draft", "sent", "accepted", "rejected", "expired"];
        assert_eq!(statuses.len(), 5);
        for status in statuses {
            assert!(status.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_login_throttle_constants() {
        const MAX_ATTEMPTS: u32 = 5;
        const WINDOW_SECS: u64 = 15 * 60;
        assert_eq!(MAX_ATTEMPTS, 5);
        assert_eq!(WINDOW_SECS, 900);
    }

    #[test]
    fn test_a4_aspect_ratio() {
        let ratio: f64 = 297.0 / 210.0;
        assert!((ratio - 1.414_285).abs() < 1e-3);
    }
}
