//! Download filename derivation

/// Build a filesystem-safe filename for an exported quote.
///
/// Every character outside `[A-Za-z0-9.-]` is replaced with an underscore so
/// the name survives any operating system's download path. An empty customer
/// name falls back to "Customer".
pub fn quote_filename(quote_number: &str, customer_name: &str) -> String {
    let customer = if customer_name.is_empty() {
        "Customer"
    } else {
        customer_name
    };
    format!("Quote-{}-{}.pdf", quote_number, customer)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_unsafe_characters() {
        let name = quote_filename("QUO-2025-0007", "Jane O'Brien & Co.");
        assert!(name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'));
        assert!(name.contains("QUO-2025-0007"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(name, "Quote-QUO-2025-0007-Jane_O_Brien___Co..pdf");
    }

    #[test]
    fn empty_customer_falls_back() {
        assert_eq!(quote_filename("QUO-2025-0001", ""), "Quote-QUO-2025-0001-Customer.pdf");
    }

    #[test]
    fn unicode_is_flattened() {
        let name = quote_filename("QUO-1", "Åsa Lindqvist");
        assert!(name.is_ascii());
        assert!(!name.contains('Å'));
    }
}
