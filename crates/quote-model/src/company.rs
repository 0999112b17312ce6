//! Issuer identity printed on quotes and emails

use serde::{Deserialize, Serialize};

/// The business issuing quotes. Defaults match the production deployment;
/// every field can be overridden from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub country: String,
    pub phone: String,
    pub email: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "AK Home Renovation".to_string(),
            tagline: "Professional House Refurbishment Services".to_string(),
            address: "55 Colmore Row, Birmingham B3 2AA".to_string(),
            country: "United Kingdom".to_string(),
            phone: "+44 7466 113917".to_string(),
            email: "info@akhomerenovation.co.uk".to_string(),
        }
    }
}

impl CompanyInfo {
    /// Load from environment variables, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: std::env::var("COMPANY_NAME").unwrap_or(defaults.name),
            tagline: std::env::var("COMPANY_TAGLINE").unwrap_or(defaults.tagline),
            address: std::env::var("COMPANY_ADDRESS").unwrap_or(defaults.address),
            country: std::env::var("COMPANY_COUNTRY").unwrap_or(defaults.country),
            phone: std::env::var("COMPANY_PHONE").unwrap_or(defaults.phone),
            email: std::env::var("COMPANY_EMAIL").unwrap_or(defaults.email),
        }
    }

    /// Display form used in email `From:` headers, e.g.
    /// `AK Home Renovation <info@akhomerenovation.co.uk>`.
    pub fn from_address(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}
