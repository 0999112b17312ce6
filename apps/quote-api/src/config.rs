//! Server configuration from environment variables

use quote_mail::MailConfig;
use quote_model::CompanyInfo;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Login is disabled until this is set.
    pub admin_password: Option<String>,
    pub export_timeout_ms: u64,
    pub mail: MailConfig,
    pub company: CompanyInfo,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:quotekit.db?mode=rwc".to_string());

        let export_timeout_ms = std::env::var("EXPORT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(quote_export::DEFAULT_EXPORT_TIMEOUT_MS);

        Self {
            port,
            database_url,
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            export_timeout_ms,
            mail: MailConfig::from_env(),
            company: CompanyInfo::from_env(),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            admin_password: Some("letmein".to_string()),
            export_timeout_ms: quote_export::DEFAULT_EXPORT_TIMEOUT_MS,
            mail: MailConfig::default(),
            company: CompanyInfo::default(),
        }
    }
}
