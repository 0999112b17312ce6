//! Wire models for the quote API

use chrono::{DateTime, Utc};
use quote_model::{Customer, DiscountKind, LineItem, Quote, QuoteRequest, QuoteStatus, RequestStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
}

/// Line item as submitted by the builder UI; the stored total is always
/// recomputed server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLineItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl NewLineItem {
    fn into_item(self) -> LineItem {
        let id = self
            .id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        LineItem::new(id, self.name, self.description, self.quantity, self.unit_price)
    }
}

/// Payload for creating or replacing a quote.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotePayload {
    pub quote_number: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<NewLineItem>,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub discount_type: DiscountKind,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: Option<QuoteStatus>,
}

impl QuotePayload {
    /// Build a domain quote with recomputed totals. Dates default to now and
    /// now + 30 days.
    pub fn into_quote(self) -> Quote {
        let items = self.items.into_iter().map(NewLineItem::into_item).collect();
        let mut quote = Quote::draft(
            self.quote_number,
            self.customer,
            items,
            self.discount,
            self.discount_type,
            self.notes,
        );
        if let Some(date) = self.date {
            quote.date = date;
        }
        if let Some(valid_until) = self.valid_until {
            quote.valid_until = valid_until;
        }
        if let Some(status) = self.status {
            quote.status = status;
        }
        quote
    }
}

/// Query filters for quote listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteFilter {
    pub status: Option<QuoteStatus>,
    pub customer_email: Option<String>,
}

/// Date window for analytics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
}

/// Booking form submission from the public site.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuoteRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
    pub service: String,
    #[serde(default)]
    pub preferred_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferred_time: String,
    #[serde(default)]
    pub description: String,
}

impl NewQuoteRequest {
    pub fn into_request(self) -> QuoteRequest {
        QuoteRequest {
            id: None,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            postcode: self.postcode,
            service: self.service,
            preferred_date: self.preferred_date,
            preferred_time: self.preferred_time,
            description: self.description,
            status: RequestStatus::New,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestStatusUpdate {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailSendResponse {
    pub success: bool,
    /// Provider message id
    pub id: String,
}
