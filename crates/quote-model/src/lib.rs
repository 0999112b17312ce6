//! Domain value objects for the quoting back office
//!
//! This crate holds the pure data model: quotes and their line items,
//! clients, incoming quote requests, the fixed service price list, and the
//! arithmetic that derives totals from them. Nothing here touches storage,
//! rendering, or the network.

pub mod analytics;
pub mod catalog;
pub mod client;
pub mod company;
pub mod filename;
pub mod quote;

pub use analytics::{Analytics, MonthBucket};
pub use catalog::{service_catalog, ServiceDef};
pub use client::{Client, QuoteRequest, RequestStatus};
pub use company::CompanyInfo;
pub use filename::quote_filename;
pub use quote::{Customer, DiscountKind, LineItem, Quote, QuoteStatus, Totals};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
