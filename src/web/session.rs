//! Signed session cookie.
//!
//! # Cookie Format
//!
//! ```text
//! Cookie: tinylinks_session=<base64url(json)>.<base64url(hmac-sha256)>
//! ```
//!
//! The payload is the serialized [`SessionData`]. It is signed with the first
//! configured key and accepted if any configured key verifies it, so keys can
//! be rotated by prepending a new one. A missing, tampered or undecodable
//! cookie reads as an empty session.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::domain::entities::SessionData;
use crate::error::AppError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "tinylinks_session";

/// Response header pair that stores or clears the session cookie.
pub type SetCookie = [(HeaderName, HeaderValue); 1];

/// Encodes, signs and verifies session cookies.
#[derive(Clone)]
pub struct SessionCodec {
    keys: Vec<Vec<u8>>,
    ttl_seconds: u64,
    secure: bool,
}

impl SessionCodec {
    /// Creates a codec signing with `keys[0]`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if `keys` is empty.
    pub fn new(keys: Vec<Vec<u8>>, ttl_seconds: u64, secure: bool) -> Result<Self, AppError> {
        if keys.is_empty() {
            return Err(AppError::internal(
                "At least one session key is required",
                json!({}),
            ));
        }

        Ok(Self {
            keys,
            ttl_seconds,
            secure,
        })
    }

    fn mac(key: &[u8]) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(key)
            .map_err(|e| AppError::internal("Invalid session key", json!({ "reason": e.to_string() })))
    }

    /// Serializes and signs the session into a cookie value.
    pub fn encode(&self, data: &SessionData) -> Result<String, AppError> {
        let payload = serde_json::to_vec(data).map_err(|e| {
            AppError::internal("Session serialization failed", json!({ "reason": e.to_string() }))
        })?;
        let payload = URL_SAFE_NO_PAD.encode(payload);

        let mut mac = Self::mac(&self.keys[0])?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    /// Verifies and deserializes a cookie value.
    ///
    /// Returns `None` for anything that was not produced by [`Self::encode`]
    /// with one of the configured keys.
    pub fn decode(&self, value: &str) -> Option<SessionData> {
        let (payload, signature) = value.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let verified = self.keys.iter().any(|key| {
            Self::mac(key).is_ok_and(|mut mac| {
                mac.update(payload.as_bytes());
                mac.verify_slice(&signature).is_ok()
            })
        });

        if !verified {
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Reads the session from the request's `Cookie` headers.
    pub fn read(&self, headers: &HeaderMap) -> SessionData {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|cookie_header| cookie_header.to_str().ok())
            .flat_map(|cookie_str| cookie_str.split(';'))
            .find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(SESSION_COOKIE), Some(value)) => Some(value),
                    _ => None,
                }
            })
            .and_then(|value| self.decode(value))
            .unwrap_or_default()
    }

    /// Builds the `Set-Cookie` header storing `data`.
    pub fn save(&self, data: &SessionData) -> Result<SetCookie, AppError> {
        let value = self.encode(data)?;
        let header = self.cookie_header(&value, self.ttl_seconds)?;
        Ok([(SET_COOKIE, header)])
    }

    /// Builds the `Set-Cookie` header that removes the cookie.
    pub fn clear(&self) -> Result<SetCookie, AppError> {
        let header = self.cookie_header("", 0)?;
        Ok([(SET_COOKIE, header)])
    }

    fn cookie_header(&self, value: &str, max_age: u64) -> Result<HeaderValue, AppError> {
        let secure = if self.secure { "; Secure" } else { "" };
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}{secure}"
        ))
        .map_err(|e| AppError::internal("Invalid cookie header", json!({ "reason": e.to_string() })))
    }
}

impl FromRequestParts<AppState> for SessionData {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(state.sessions.read(&parts.headers))
    }
}
