//! Clients and incoming quote requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer record with rolled-up quote statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub postcode: String,
    pub total_quotes: u32,
    pub accepted_quotes: u32,
    pub total_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pipeline status of a quote request from the public booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    New,
    Contacted,
    Quoted,
    Converted,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::New => write!(f, "new"),
            RequestStatus::Contacted => write!(f, "contacted"),
            RequestStatus::Quoted => write!(f, "quoted"),
            RequestStatus::Converted => write!(f, "converted"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(RequestStatus::New),
            "contacted" => Ok(RequestStatus::Contacted),
            "quoted" => Ok(RequestStatus::Quoted),
            "converted" => Ok(RequestStatus::Converted),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// A booking submitted through the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub postcode: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<DateTime<Utc>>,
    pub preferred_time: String,
    pub description: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_status_roundtrip() {
        for status in [
            RequestStatus::New,
            RequestStatus::Contacted,
            RequestStatus::Quoted,
            RequestStatus::Converted,
        ] {
            let parsed: RequestStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }
}
