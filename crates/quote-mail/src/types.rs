//! Email types and request/response structures
//!
//! Resend-compatible API structures: the request serializes directly into
//! the provider's JSON body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email send request - Resend-compatible API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailRequest {
    /// Sender address, optionally with a display name
    pub from: String,

    /// Recipient email addresses
    pub to: Vec<String>,

    /// Reply-to address (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,

    /// Email subject
    pub subject: String,

    /// HTML body (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Plain text body (optional, but recommended for deliverability)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Custom headers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<EmailHeader>,

    /// Attachments (optional)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl SendEmailRequest {
    /// Create a simple email request
    pub fn simple(from: &str, to: &str, subject: &str, html: &str) -> Self {
        Self {
            from: from.to_string(),
            to: vec![to.to_string()],
            reply_to: None,
            subject: subject.to_string(),
            html: Some(html.to_string()),
            text: None,
            headers: vec![],
            attachments: vec![],
        }
    }

    /// Add plain text version
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Validate the request before handing it to a provider
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from.is_empty() {
            return Err(ValidationError::MissingField("from"));
        }
        if !is_valid_email(&self.from) {
            return Err(ValidationError::InvalidEmail(self.from.clone()));
        }

        if self.to.is_empty() {
            return Err(ValidationError::MissingField("to"));
        }
        for email in &self.to {
            if !is_valid_email(email) {
                return Err(ValidationError::InvalidEmail(email.clone()));
            }
        }

        if self.subject.is_empty() {
            return Err(ValidationError::MissingField("subject"));
        }

        if self.html.is_none() && self.text.is_none() {
            return Err(ValidationError::MissingContent);
        }

        Ok(())
    }
}

/// Custom email header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailHeader {
    pub name: String,
    pub value: String,
}

/// Email attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Filename for the attachment
    pub filename: String,

    /// Base64-encoded content
    pub content: String,

    /// MIME type
    #[serde(default = "default_mime_type")]
    pub content_type: String,
}

impl Attachment {
    pub fn pdf(filename: impl Into<String>, base64_content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: base64_content.into(),
            content_type: "application/pdf".to_string(),
        }
    }
}

fn default_mime_type() -> String {
    "application/octet-stream".to_string()
}

/// Provider acknowledgement of a queued email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Provider message ID
    pub id: String,

    /// When the email was accepted for delivery
    pub queued_at: DateTime<Utc>,
}

/// Validation error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Email must have either html or text content")]
    MissingContent,
}

/// Check whether an address is valid, accepting the
/// `Name <email@domain.com>` display form.
fn is_valid_email(email: &str) -> bool {
    let bare = match (email.find('<'), email.rfind('>')) {
        (Some(start), Some(end)) if start < end => &email[start + 1..end],
        _ => email,
    };
    email_address::EmailAddress::is_valid(bare)
}
