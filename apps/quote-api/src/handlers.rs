//! HTTP handlers for the quote API

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use quote_export::export_with_timeout;
use quote_mail::QuoteEmail;
use quote_model::{service_catalog, Analytics, Client, Quote, QuoteRequest, QuoteStatus};
use std::sync::Arc;

use crate::auth::{clear_session_cookie, session_cookie, token_from_cookie_header, RequireAuth};
use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

// --- auth ---

fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<([(&'static str, String); 1], Json<LoginResponse>), ApiError> {
    if !state.throttle.check(&client_key(&headers)) {
        return Err(ApiError::Throttled);
    }

    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("Password is required".into()))?;

    let expected = state
        .config
        .admin_password
        .as_deref()
        .ok_or(ApiError::Misconfigured("ADMIN_PASSWORD is not set"))?;

    if password != expected {
        return Err(ApiError::InvalidPassword);
    }

    let token = state.sessions.create();
    tracing::info!("admin login succeeded");

    Ok((
        [("Set-Cookie", session_cookie(&token))],
        Json(LoginResponse { success: true }),
    ))
}

pub async fn auth_check(_auth: RequireAuth) -> Json<LoginResponse> {
    Json(LoginResponse { success: true })
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ([(&'static str, String); 1], Json<LoginResponse>) {
    if let Some(token) = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header)
    {
        state.sessions.revoke(token);
    }

    (
        [("Set-Cookie", clear_session_cookie())],
        Json(LoginResponse { success: true }),
    )
}

// --- quotes ---

pub async fn list_quotes(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<QuoteFilter>,
) -> Result<Json<Vec<Quote>>, ApiError> {
    Ok(Json(state.store.list_quotes(&filter).await?))
}

pub async fn create_quote(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<QuotePayload>,
) -> Result<(StatusCode, Json<Quote>), ApiError> {
    let quote = state.store.create_quote(payload.into_quote()).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

pub async fn get_quote(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Quote>, ApiError> {
    let quote = state
        .store
        .get_quote(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quote {id}")))?;
    Ok(Json(quote))
}

pub async fn update_quote(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<QuotePayload>,
) -> Result<Json<Quote>, ApiError> {
    let quote = state
        .store
        .update_quote(&id, payload.into_quote())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quote {id}")))?;
    Ok(Json(quote))
}

pub async fn delete_quote(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_quote(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("quote {id}")))
    }
}

/// Export a quote and stream it back as a PDF download.
pub async fn quote_pdf(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let quote = state
        .store
        .get_quote(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quote {id}")))?;

    let exported = export_with_timeout(
        state.exporter.clone(),
        quote,
        state.config.export_timeout_ms,
    )
    .await?;

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{}\"", exported.filename),
            ),
        ],
        exported.bytes,
    ))
}

/// Export a quote and email it to the customer with the PDF attached.
/// A draft quote transitions to Sent on successful delivery.
pub async fn email_quote(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EmailSendResponse>, ApiError> {
    let quote = state
        .store
        .get_quote(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quote {id}")))?;

    let mailer = state.mailer.clone().ok_or(ApiError::EmailUnavailable)?;

    let exported = export_with_timeout(
        state.exporter.clone(),
        quote.clone(),
        state.config.export_timeout_ms,
    )
    .await?;

    let request = QuoteEmail {
        to: quote.customer.email.clone(),
        quote_number: quote.quote_number.clone(),
        customer_name: quote.customer.name.clone(),
        quote_date: quote.date,
        total: quote.total,
        valid_until: quote.valid_until,
    }
    .into_request(&state.config.company)
    .with_attachment(exported.attachment());

    let receipt = mailer
        .send(request)
        .await
        .map_err(|e| ApiError::EmailDelivery(e.to_string()))?;

    if quote.status == QuoteStatus::Draft {
        state.store.mark_sent(&id).await?;
    }

    tracing::info!(quote_number = %quote.quote_number, message_id = %receipt.id, "quote emailed");
    Ok(Json(EmailSendResponse {
        success: true,
        id: receipt.id,
    }))
}

// --- clients ---

pub async fn list_clients(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(state.store.list_clients().await?))
}

pub async fn get_client(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    let client = state
        .store
        .get_client(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("client {id}")))?;
    Ok(Json(client))
}

pub async fn upsert_client(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Json(client): Json<NewClient>,
) -> Result<Json<Client>, ApiError> {
    if client.email.is_empty() {
        return Err(ApiError::InvalidRequest("Client email is required".into()));
    }
    Ok(Json(state.store.upsert_client(client).await?))
}

// --- quote requests ---

/// Public booking-form submission
pub async fn create_quote_request(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteRequest>), ApiError> {
    if req.name.is_empty() || req.email.is_empty() {
        return Err(ApiError::InvalidRequest("Name and email are required".into()));
    }
    let stored = state.store.create_request(req.into_request()).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_quote_requests(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuoteRequest>>, ApiError> {
    Ok(Json(state.store.list_requests().await?))
}

pub async fn update_quote_request_status(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<RequestStatusUpdate>,
) -> Result<Json<LoginResponse>, ApiError> {
    if state.store.update_request_status(&id, update.status).await? {
        Ok(Json(LoginResponse { success: true }))
    } else {
        Err(ApiError::NotFound(format!("quote request {id}")))
    }
}

pub async fn delete_quote_request(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_request(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("quote request {id}")))
    }
}

// --- analytics & catalog ---

pub async fn analytics(
    _auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    Query(window): Query<AnalyticsQuery>,
) -> Result<Json<Analytics>, ApiError> {
    let quotes = state.store.quotes_between(window.start, window.end).await?;
    Ok(Json(Analytics::compute(&quotes)))
}

pub async fn services(_auth: RequireAuth) -> Json<&'static [quote_model::ServiceDef]> {
    Json(service_catalog())
}
