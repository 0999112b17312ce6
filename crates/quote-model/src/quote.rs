//! Quote, line item, and totals arithmetic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Billing details of the person receiving the quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub postcode: String,
}

/// One priced row on a quote
///
/// `total` is a stored value, recomputed whenever quantity or unit price
/// change. Once a quote has been exported the items are treated as frozen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    /// Unit label shown under the name, e.g. "per room"
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: u32,
        unit_price: f64,
    ) -> Self {
        let mut item = Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            quantity,
            unit_price,
            total: 0.0,
        };
        item.total = item.line_total();
        item
    }

    /// quantity x unit price
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// How the discount field is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

impl Default for DiscountKind {
    fn default() -> Self {
        DiscountKind::Percentage
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountKind::Percentage => write!(f, "percentage"),
            DiscountKind::Fixed => write!(f, "fixed"),
        }
    }
}

impl std::str::FromStr for DiscountKind {
    type Err = UnknownDiscountKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountKind::Percentage),
            "fixed" => Ok(DiscountKind::Fixed),
            other => Err(UnknownDiscountKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown discount type: {0}")]
pub struct UnknownDiscountKind(pub String);

/// Lifecycle status of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Draft => write!(f, "draft"),
            QuoteStatus::Sent => write!(f, "sent"),
            QuoteStatus::Accepted => write!(f, "accepted"),
            QuoteStatus::Rejected => write!(f, "rejected"),
            QuoteStatus::Expired => write!(f, "expired"),
        }
    }
}

impl std::str::FromStr for QuoteStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(QuoteStatus::Draft),
            "sent" => Ok(QuoteStatus::Sent),
            "accepted" => Ok(QuoteStatus::Accepted),
            "rejected" => Ok(QuoteStatus::Rejected),
            "expired" => Ok(QuoteStatus::Expired),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown quote status: {0}")]
pub struct UnknownStatus(pub String);

/// Derived money amounts for a set of line items plus a discount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub total: f64,
}

impl Totals {
    /// Compute subtotal, discount amount, and total.
    ///
    /// A discount larger than the subtotal produces a negative total; the
    /// value is passed through unchanged, matching the upstream behavior.
    pub fn compute(items: &[LineItem], discount: f64, kind: DiscountKind) -> Self {
        let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
        let discount_amount = match kind {
            DiscountKind::Percentage => subtotal * discount / 100.0,
            DiscountKind::Fixed => discount,
        };
        Self {
            subtotal,
            discount_amount,
            total: subtotal - discount_amount,
        }
    }
}

/// A priced proposal with a validity window and lifecycle status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Store-assigned row id; None before the first save
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub quote_number: String,
    pub date: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub discount: f64,
    pub discount_type: DiscountKind,
    pub total: f64,
    pub notes: String,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
}

impl Quote {
    /// Create a draft quote valid for 30 days, with totals derived from the
    /// items and discount.
    pub fn draft(
        quote_number: impl Into<String>,
        customer: Customer,
        items: Vec<LineItem>,
        discount: f64,
        discount_type: DiscountKind,
        notes: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let mut quote = Self {
            id: None,
            quote_number: quote_number.into(),
            date: now,
            valid_until: now + chrono::Duration::days(30),
            customer,
            items,
            subtotal: 0.0,
            discount,
            discount_type,
            total: 0.0,
            notes: notes.into(),
            status: QuoteStatus::Draft,
            created_at: now,
            updated_at: now,
            sent_at: None,
            accepted_at: None,
            rejected_at: None,
        };
        quote.recalculate();
        quote
    }

    /// Recompute per-line totals, subtotal, and total in place.
    pub fn recalculate(&mut self) {
        for item in &mut self.items {
            item.total = item.line_total();
        }
        let totals = self.totals();
        self.subtotal = totals.subtotal;
        self.total = totals.total;
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.items, self.discount, self.discount_type)
    }

    pub fn discount_amount(&self) -> f64 {
        self.totals().discount_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_items() -> Vec<LineItem> {
        vec![
            LineItem::new("skimming-single-room", "Skimming - Single Room", "per room", 2, 150.0),
            LineItem::new("painting-interior-single", "Interior Painting", "per room", 1, 300.0),
        ]
    }

    #[test]
    fn line_total_is_quantity_times_price() {
        let item = LineItem::new("x", "X", "per room", 3, 150.0);
        assert_eq!(item.total, 450.0);
        assert_eq!(item.line_total(), 450.0);
    }

    #[test]
    fn percentage_discount() {
        let totals = Totals::compute(&two_items(), 10.0, DiscountKind::Percentage);
        assert_eq!(totals.subtotal, 600.0);
        assert_eq!(totals.discount_amount, 60.0);
        assert_eq!(totals.total, 540.0);
    }

    #[test]
    fn fixed_discount() {
        let totals = Totals::compute(&two_items(), 50.0, DiscountKind::Fixed);
        assert_eq!(totals.subtotal, 600.0);
        assert_eq!(totals.discount_amount, 50.0);
        assert_eq!(totals.total, 550.0);
    }

    #[test]
    fn discount_exceeding_subtotal_goes_negative() {
        let items = vec![LineItem::new("a", "A", "per room", 1, 100.0)];
        let totals = Totals::compute(&items, 150.0, DiscountKind::Fixed);
        assert_eq!(totals.total, -50.0);

        let totals = Totals::compute(&items, 200.0, DiscountKind::Percentage);
        assert_eq!(totals.total, -100.0);
    }

    #[test]
    fn zero_items_total_zero() {
        let totals = Totals::compute(&[], 0.0, DiscountKind::Percentage);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn spec_scenario_quo_2025_0001() {
        let items = vec![LineItem::new("s", "Service", "per room", 2, 150.0)];
        let totals = Totals::compute(&items, 10.0, DiscountKind::Percentage);
        assert_eq!(totals.subtotal, 300.0);
        assert_eq!(totals.discount_amount, 30.0);
        assert_eq!(totals.total, 270.0);
    }

    #[test]
    fn draft_recalculates_totals() {
        let quote = Quote::draft(
            "QUO-2025-0001",
            Customer::default(),
            two_items(),
            10.0,
            DiscountKind::Percentage,
            "",
        );
        assert_eq!(quote.subtotal, 600.0);
        assert_eq!(quote.total, 540.0);
        assert_eq!(quote.status, QuoteStatus::Draft);
        assert_eq!(quote.valid_until - quote.date, chrono::Duration::days(30));
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            QuoteStatus::Draft,
            QuoteStatus::Sent,
            QuoteStatus::Accepted,
            QuoteStatus::Rejected,
            QuoteStatus::Expired,
        ] {
            let parsed: QuoteStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("bogus".parse::<QuoteStatus>().is_err());
    }
}
