//! Quote pipeline roll-ups
//!
//! Pure aggregation over a loaded set of quotes; the API layer decides which
//! quotes to feed in (e.g. a date window).

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::quote::{Quote, QuoteStatus};

/// Count and value for one calendar month, keyed "YYYY-MM"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub count: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_quotes: u32,
    pub total_value: f64,
    pub accepted_quotes: u32,
    pub rejected_quotes: u32,
    /// Draft or sent
    pub pending_quotes: u32,
    /// accepted / total, in percent; 0 when there are no quotes
    pub conversion_rate: f64,
    pub average_quote_value: f64,
    pub quotes_by_status: BTreeMap<String, u32>,
    pub quotes_by_service: BTreeMap<String, u32>,
    pub quotes_by_month: Vec<MonthBucket>,
}

impl Analytics {
    pub fn compute(quotes: &[Quote]) -> Self {
        let total_quotes = quotes.len() as u32;
        let total_value: f64 = quotes.iter().map(|q| q.total).sum();
        let accepted_quotes =
            quotes.iter().filter(|q| q.status == QuoteStatus::Accepted).count() as u32;
        let rejected_quotes =
            quotes.iter().filter(|q| q.status == QuoteStatus::Rejected).count() as u32;
        let pending_quotes = quotes
            .iter()
            .filter(|q| matches!(q.status, QuoteStatus::Draft | QuoteStatus::Sent))
            .count() as u32;

        let mut quotes_by_status = BTreeMap::new();
        let mut quotes_by_service = BTreeMap::new();
        let mut months: BTreeMap<String, (u32, f64)> = BTreeMap::new();

        for quote in quotes {
            *quotes_by_status.entry(quote.status.to_string()).or_insert(0) += 1;
            for item in &quote.items {
                *quotes_by_service.entry(item.name.clone()).or_insert(0) += 1;
            }
            let key = format!("{:04}-{:02}", quote.created_at.year(), quote.created_at.month());
            let bucket = months.entry(key).or_insert((0, 0.0));
            bucket.0 += 1;
            bucket.1 += quote.total;
        }

        let quotes_by_month = months
            .into_iter()
            .map(|(month, (count, value))| MonthBucket { month, count, value })
            .collect();

        Self {
            total_quotes,
            total_value,
            accepted_quotes,
            rejected_quotes,
            pending_quotes,
            conversion_rate: if total_quotes > 0 {
                f64::from(accepted_quotes) / f64::from(total_quotes) * 100.0
            } else {
                0.0
            },
            average_quote_value: if total_quotes > 0 {
                total_value / f64::from(total_quotes)
            } else {
                0.0
            },
            quotes_by_status,
            quotes_by_service,
            quotes_by_month,
        }
    }
}
