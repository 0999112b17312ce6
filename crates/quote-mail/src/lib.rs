//! Quote email delivery
//!
//! Resend-compatible request types, the quote email template, and the
//! [`EmailSender`] trait with the production HTTP implementation.

pub mod sender;
pub mod template;
pub mod types;

pub use sender::{EmailSender, ResendSender, SendError};
pub use template::QuoteEmail;
pub use types::{Attachment, EmailHeader, SendEmailRequest, SendReceipt, ValidationError};

/// Delivery configuration. Email is optional: without an API key the server
/// runs with exports only and email endpoints report delivery as unavailable.
#[derive(Debug, Clone, Default)]
pub struct MailConfig {
    pub api_key: Option<String>,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("RESEND_API_KEY").ok().filter(|k| !k.is_empty()),
        }
    }

    pub fn sender(&self) -> Option<ResendSender> {
        self.api_key.as_deref().map(ResendSender::new)
    }
}
