//! Quote email template

use chrono::{DateTime, Datelike, Utc};
use quote_model::CompanyInfo;

use crate::types::{EmailHeader, SendEmailRequest};

/// Everything the quote email needs, extracted from a quote at the call
/// site so the template stays decoupled from storage types.
#[derive(Debug, Clone)]
pub struct QuoteEmail {
    pub to: String,
    pub quote_number: String,
    pub customer_name: String,
    pub quote_date: DateTime<Utc>,
    pub total: f64,
    pub valid_until: DateTime<Utc>,
}

impl QuoteEmail {
    /// Build the send request. The PDF attachment is added by the caller.
    pub fn into_request(self, company: &CompanyInfo) -> SendEmailRequest {
        let subject = format!("Quote {} - {}", self.quote_number, company.name);
        let date = long_date(&self.quote_date);
        let valid_until = long_date(&self.valid_until);
        let total = money(self.total);
        let year = Utc::now().year();

        let html = format!(
            r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Quote {quote_number}</title>
  </head>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background-color: #202845; color: white; padding: 20px; text-align: center; border-radius: 8px 8px 0 0;">
      <h1 style="margin: 0; font-size: 24px;">{company_name}</h1>
      <p style="margin: 5px 0 0 0; font-size: 14px; opacity: 0.9;">{tagline}</p>
    </div>

    <div style="background-color: #f9fafb; padding: 30px; border: 1px solid #e5e7eb; border-top: none; border-radius: 0 0 8px 8px;">
      <h2 style="color: #202845; margin-top: 0;">Quote {quote_number}</h2>

      <p>Dear {customer_name},</p>

      <p>Thank you for your interest in our services. Please find attached your detailed quote.</p>

      <div style="background-color: white; padding: 20px; border-radius: 8px; margin: 20px 0; border-left: 4px solid #202845;">
        <p style="margin: 0 0 10px 0;"><strong>Quote Number:</strong> {quote_number}</p>
        <p style="margin: 0 0 10px 0;"><strong>Date:</strong> {date}</p>
        <p style="margin: 0 0 10px 0;"><strong>Valid Until:</strong> {valid_until}</p>
        <p style="margin: 0; font-size: 20px; color: #202845;"><strong>Total: {total}</strong></p>
      </div>

      <p>This quote is valid for 30 days from the date of issue. If you have any questions or would like to discuss the quote, please don't hesitate to contact us.</p>

      <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #e5e7eb;">
        <p style="margin: 5px 0;"><strong>Contact Information:</strong></p>
        <p style="margin: 5px 0;">Phone: <a href="tel:{phone}" style="color: #202845;">{phone}</a></p>
        <p style="margin: 5px 0;">Email: <a href="mailto:{email}" style="color: #202845;">{email}</a></p>
        <p style="margin: 5px 0;">Address: {address}</p>
      </div>

      <p style="margin-top: 30px; font-size: 12px; color: #6b7280;">
        Best regards,<br>
        <strong>{company_name} Team</strong>
      </p>
    </div>

    <div style="text-align: center; margin-top: 20px; padding: 20px; background-color: #f9fafb; border-radius: 8px;">
      <p style="margin: 0; font-size: 12px; color: #6b7280;">
        &copy; {year} {company_name}. All rights reserved.
      </p>
    </div>
  </body>
</html>"#,
            quote_number = self.quote_number,
            company_name = company.name,
            tagline = company.tagline,
            customer_name = self.customer_name,
            date = date,
            valid_until = valid_until,
            total = total,
            phone = company.phone,
            email = company.email,
            address = company.address,
            year = year,
        );

        let text = format!(
            "Dear {customer_name},\n\n\
            Thank you for your interest in our services. Please find attached your detailed quote.\n\n\
            Quote Number: {quote_number}\n\
            Date: {date}\n\
            Valid Until: {valid_until}\n\
            Total: {total}\n\n\
            This quote is valid for 30 days from the date of issue. If you have any questions \
            or would like to discuss the quote, please don't hesitate to contact us.\n\n\
            Phone: {phone}\n\
            Email: {email}\n\n\
            Best regards,\n\
            {company_name} Team",
            customer_name = self.customer_name,
            quote_number = self.quote_number,
            date = date,
            valid_until = valid_until,
            total = total,
            phone = company.phone,
            email = company.email,
            company_name = company.name,
        );

        SendEmailRequest {
            from: company.from_address(),
            to: vec![self.to],
            reply_to: None,
            subject,
            html: Some(html),
            text: Some(text),
            headers: vec![EmailHeader {
                name: "X-Entity-Ref-ID".to_string(),
                value: uuid::Uuid::new_v4().to_string(),
            }],
            attachments: vec![],
        }
    }
}

/// en-GB long date, e.g. "1 June 2025"
fn long_date(date: &DateTime<Utc>) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Pounds with thousands grouping, e.g. "£12,345.67"
fn money(amount: f64) -> String {
    let negative = amount < 0.0;
    let formatted = format!("{:.2}", amount.abs());
    let (whole, frac) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}£{grouped}.{frac}")
}
