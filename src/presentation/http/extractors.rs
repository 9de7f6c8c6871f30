//! Custom Extractors
//!
//! Axum extractors for request parsing.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::HeaderMap,
};
use serde::de::DeserializeOwned;

use crate::shared::error::AppError;

/// JSON body that tolerates a missing body and content type.
///
/// An empty body yields `T::default()` so field-level checks decide what
/// is missing. Malformed JSON is a validation error.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))
    }
}

/// Read a header as trimmed text. Header names are case-insensitive.
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Parse an id-carrying header; absent is `Ok(None)`, garbage is an error.
pub fn id_header(headers: &HeaderMap, name: &str, label: &str) -> Result<Option<i64>, AppError> {
    match header_value(headers, name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {}", label))),
    }
}
