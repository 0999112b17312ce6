//! SQLite-backed persistence
//!
//! Quotes keep their customer and line items as JSON columns next to the
//! scalar fields the API filters on. Timestamps are RFC 3339 TEXT, which
//! collates chronologically.

use chrono::{DateTime, Utc};
use quote_model::{Client, Customer, LineItem, Quote, QuoteRequest, QuoteStatus, RequestStatus};
use sqlx::{FromRow, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewClient, QuoteFilter};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt row: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub struct Store {
    pool: SqlitePool,
}

#[derive(Debug, FromRow)]
struct DbQuote {
    id: String,
    quote_number: String,
    date: DateTime<Utc>,
    valid_until: DateTime<Utc>,
    customer_json: String,
    items_json: String,
    subtotal: f64,
    discount: f64,
    discount_type: String,
    total: f64,
    notes: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    sent_at: Option<DateTime<Utc>>,
    accepted_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
}

impl DbQuote {
    fn into_quote(self) -> Result<Quote, StoreError> {
        let customer: Customer = serde_json::from_str(&self.customer_json)?;
        let items: Vec<LineItem> = serde_json::from_str(&self.items_json)?;
        Ok(Quote {
            id: Some(self.id),
            quote_number: self.quote_number,
            date: self.date,
            valid_until: self.valid_until,
            customer,
            items,
            subtotal: self.subtotal,
            discount: self.discount,
            discount_type: self.discount_type.parse().unwrap_or_default(),
            total: self.total,
            notes: self.notes,
            status: self.status.parse().unwrap_or(QuoteStatus::Draft),
            created_at: self.created_at,
            updated_at: self.updated_at,
            sent_at: self.sent_at,
            accepted_at: self.accepted_at,
            rejected_at: self.rejected_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct DbClient {
    id: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    postcode: String,
    total_quotes: i64,
    accepted_quotes: i64,
    total_value: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DbClient {
    fn into_client(self) -> Client {
        Client {
            id: Some(self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            postcode: self.postcode,
            total_quotes: self.total_quotes as u32,
            accepted_quotes: self.accepted_quotes as u32,
            total_value: self.total_value,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct DbRequest {
    id: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    postcode: String,
    service: String,
    preferred_date: Option<DateTime<Utc>>,
    preferred_time: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl DbRequest {
    fn into_request(self) -> QuoteRequest {
        QuoteRequest {
            id: Some(self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            postcode: self.postcode,
            service: self.service,
            preferred_date: self.preferred_date,
            preferred_time: self.preferred_time,
            description: self.description,
            status: self.status.parse().unwrap_or(RequestStatus::New),
            created_at: self.created_at,
        }
    }
}

const QUOTE_COLUMNS: &str = "id, quote_number, date, valid_until, customer_json, items_json, \
     subtotal, discount, discount_type, total, notes, status, \
     created_at, updated_at, sent_at, accepted_at, rejected_at";

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotes (
                id TEXT PRIMARY KEY,
                quote_number TEXT NOT NULL,
                date TEXT NOT NULL,
                valid_until TEXT NOT NULL,
                customer_json TEXT NOT NULL,
                customer_email TEXT NOT NULL,
                items_json TEXT NOT NULL,
                subtotal REAL NOT NULL,
                discount REAL NOT NULL DEFAULT 0,
                discount_type TEXT NOT NULL DEFAULT 'percentage',
                total REAL NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'draft',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                sent_at TEXT,
                accepted_at TEXT,
                rejected_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_quotes_status ON quotes(status)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_quotes_customer_email ON quotes(customer_email)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone TEXT NOT NULL DEFAULT '',
                address TEXT NOT NULL DEFAULT '',
                postcode TEXT NOT NULL DEFAULT '',
                total_quotes INTEGER NOT NULL DEFAULT 0,
                accepted_quotes INTEGER NOT NULL DEFAULT 0,
                total_value REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quote_requests (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                address TEXT NOT NULL DEFAULT '',
                postcode TEXT NOT NULL DEFAULT '',
                service TEXT NOT NULL,
                preferred_date TEXT,
                preferred_time TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'new',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    // --- quotes ---

    /// Insert a quote, assigning an id. A quote created directly in Sent
    /// status gets its sent_at stamped immediately.
    pub async fn create_quote(&self, mut quote: Quote) -> Result<Quote, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        quote.id = Some(id.clone());
        quote.created_at = now;
        quote.updated_at = now;
        if quote.status == QuoteStatus::Sent && quote.sent_at.is_none() {
            quote.sent_at = Some(now);
        }

        sqlx::query(
            r#"
            INSERT INTO quotes (id, quote_number, date, valid_until, customer_json, customer_email,
                items_json, subtotal, discount, discount_type, total, notes, status,
                created_at, updated_at, sent_at, accepted_at, rejected_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&quote.quote_number)
        .bind(quote.date.to_rfc3339())
        .bind(quote.valid_until.to_rfc3339())
        .bind(serde_json::to_string(&quote.customer)?)
        .bind(&quote.customer.email)
        .bind(serde_json::to_string(&quote.items)?)
        .bind(quote.subtotal)
        .bind(quote.discount)
        .bind(quote.discount_type.to_string())
        .bind(quote.total)
        .bind(&quote.notes)
        .bind(quote.status.to_string())
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .bind(quote.sent_at.map(|t| t.to_rfc3339()))
        .bind(quote.accepted_at.map(|t| t.to_rfc3339()))
        .bind(quote.rejected_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        tracing::info!(quote_number = %quote.quote_number, id = %id, "created quote");
        Ok(quote)
    }

    pub async fn list_quotes(&self, filter: &QuoteFilter) -> Result<Vec<Quote>, StoreError> {
        let rows: Vec<DbQuote> = sqlx::query_as(&format!(
            r#"
            SELECT {QUOTE_COLUMNS} FROM quotes
            WHERE (?1 IS NULL OR status = ?1)
              AND (?2 IS NULL OR customer_email = ?2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.status.map(|s| s.to_string()))
        .bind(filter.customer_email.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DbQuote::into_quote).collect()
    }

    /// Quotes created inside the (optional) window, for analytics.
    pub async fn quotes_between(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Quote>, StoreError> {
        let rows: Vec<DbQuote> = sqlx::query_as(&format!(
            r#"
            SELECT {QUOTE_COLUMNS} FROM quotes
            WHERE (?1 IS NULL OR created_at >= ?1)
              AND (?2 IS NULL OR created_at <= ?2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(start.map(|t| t.to_rfc3339()))
        .bind(end.map(|t| t.to_rfc3339()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DbQuote::into_quote).collect()
    }

    pub async fn get_quote(&self, id: &str) -> Result<Option<Quote>, StoreError> {
        let row: Option<DbQuote> =
            sqlx::query_as(&format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(DbQuote::into_quote).transpose()
    }

    /// Replace a quote's content, stamping updated_at and the
    /// status-specific timestamps on transition (first transition wins).
    pub async fn update_quote(
        &self,
        id: &str,
        mut quote: Quote,
    ) -> Result<Option<Quote>, StoreError> {
        let existing = match self.get_quote(id).await? {
            Some(q) => q,
            None => return Ok(None),
        };

        let now = Utc::now();
        quote.id = Some(id.to_string());
        quote.created_at = existing.created_at;
        quote.updated_at = now;
        quote.sent_at = existing.sent_at;
        quote.accepted_at = existing.accepted_at;
        quote.rejected_at = existing.rejected_at;

        match quote.status {
            QuoteStatus::Sent if quote.sent_at.is_none() => quote.sent_at = Some(now),
            QuoteStatus::Accepted if quote.accepted_at.is_none() => quote.accepted_at = Some(now),
            QuoteStatus::Rejected if quote.rejected_at.is_none() => quote.rejected_at = Some(now),
            _ => {}
        }

        sqlx::query(
            r#"
            UPDATE quotes
            SET quote_number = ?, date = ?, valid_until = ?, customer_json = ?,
                customer_email = ?, items_json = ?, subtotal = ?, discount = ?,
                discount_type = ?, total = ?, notes = ?, status = ?,
                updated_at = ?, sent_at = ?, accepted_at = ?, rejected_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&quote.quote_number)
        .bind(quote.date.to_rfc3339())
        .bind(quote.valid_until.to_rfc3339())
        .bind(serde_json::to_string(&quote.customer)?)
        .bind(&quote.customer.email)
        .bind(serde_json::to_string(&quote.items)?)
        .bind(quote.subtotal)
        .bind(quote.discount)
        .bind(quote.discount_type.to_string())
        .bind(quote.total)
        .bind(&quote.notes)
        .bind(quote.status.to_string())
        .bind(now.to_rfc3339())
        .bind(quote.sent_at.map(|t| t.to_rfc3339()))
        .bind(quote.accepted_at.map(|t| t.to_rfc3339()))
        .bind(quote.rejected_at.map(|t| t.to_rfc3339()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(quote))
    }

    /// Transition a quote to Sent after a successful email, stamping sent_at
    /// on the first transition only.
    pub async fn mark_sent(&self, id: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            UPDATE quotes
            SET status = 'sent',
                sent_at = COALESCE(sent_at, ?),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_quote(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- clients ---

    /// Insert or update a client, keyed by email.
    pub async fn upsert_client(&self, client: NewClient) -> Result<Client, StoreError> {
        let now = Utc::now();

        let existing: Option<DbClient> = sqlx::query_as(
            "SELECT id, name, email, phone, address, postcode, total_quotes, accepted_quotes, \
             total_value, created_at, updated_at FROM clients WHERE email = ?",
        )
        .bind(&client.email)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = existing {
            sqlx::query(
                "UPDATE clients SET name = ?, phone = ?, address = ?, postcode = ?, updated_at = ? \
                 WHERE id = ?",
            )
            .bind(&client.name)
            .bind(&client.phone)
            .bind(&client.address)
            .bind(&client.postcode)
            .bind(now.to_rfc3339())
            .bind(&row.id)
            .execute(&self.pool)
            .await?;

            let mut updated = row.into_client();
            updated.name = client.name;
            updated.phone = client.phone;
            updated.address = client.address;
            updated.postcode = client.postcode;
            updated.updated_at = now;
            return Ok(updated);
        }

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO clients (id, name, email, phone, address, postcode,
                total_quotes, accepted_quotes, total_value, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 0, 0, 0, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.postcode)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Client {
            id: Some(id),
            name: client.name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            postcode: client.postcode,
            total_quotes: 0,
            accepted_quotes: 0,
            total_value: 0.0,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        let rows: Vec<DbClient> = sqlx::query_as(
            "SELECT id, name, email, phone, address, postcode, total_quotes, accepted_quotes, \
             total_value, created_at, updated_at FROM clients ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbClient::into_client).collect())
    }

    pub async fn get_client(&self, id: &str) -> Result<Option<Client>, StoreError> {
        let row: Option<DbClient> = sqlx::query_as(
            "SELECT id, name, email, phone, address, postcode, total_quotes, accepted_quotes, \
             total_value, created_at, updated_at FROM clients WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DbClient::into_client))
    }

    // --- quote requests ---

    pub async fn create_request(&self, mut request: QuoteRequest) -> Result<QuoteRequest, StoreError> {
        let id = Uuid::new_v4().to_string();
        request.id = Some(id.clone());

        sqlx::query(
            r#"
            INSERT INTO quote_requests (id, name, email, phone, address, postcode, service,
                preferred_date, preferred_time, description, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.postcode)
        .bind(&request.service)
        .bind(request.preferred_date.map(|t| t.to_rfc3339()))
        .bind(&request.preferred_time)
        .bind(&request.description)
        .bind(request.status.to_string())
        .bind(request.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        tracing::info!(service = %request.service, id = %id, "created quote request");
        Ok(request)
    }

    pub async fn list_requests(&self) -> Result<Vec<QuoteRequest>, StoreError> {
        let rows: Vec<DbRequest> = sqlx::query_as(
            "SELECT id, name, email, phone, address, postcode, service, preferred_date, \
             preferred_time, description, status, created_at \
             FROM quote_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbRequest::into_request).collect())
    }

    pub async fn update_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE quote_requests SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_request(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM quote_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
