// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! HTTP client shared by the record store and the auth provider.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const API_KEY_HEADER: &str = "apikey";

/// Base URL, project key and a client with the outbound timeout applied.
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteEndpoint {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request with the project key attached. Without a session token the
    /// key doubles as the bearer credential.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let bearer = token.unwrap_or(&self.api_key);
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header(API_KEY_HEADER, self.api_key.as_str());
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", bearer)) {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Human readable reason for a failed answer.
///
/// Record store bodies use `message` (with optional `details`/`hint`); auth
/// bodies use `msg`, `error_description` or `error`. Anything else falls back
/// to the status line.
pub fn error_reason(status: StatusCode, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let primary = parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .filter(|text| !text.trim().is_empty());

    match primary {
        Some(message) => match parsed.details.or(parsed.hint) {
            Some(extra) if !extra.trim().is_empty() => format!("{} ({})", message, extra),
            _ => message,
        },
        None => {
            let trimmed = body.trim();
            if trimmed.is_empty() || trimmed.len() > 200 {
                status.to_string()
            } else {
                format!("{}: {}", status, trimmed)
            }
        }
    }
}

/// Reason text for a transport level failure.
pub fn transport_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "could not connect to backend".to_string()
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_prefers_store_message_with_details() {
        let body = r#"{"code":"23502","message":"null value in column \"title\"","details":"Failing row contains (...)","hint":null}"#;
        assert_eq!(
            error_reason(StatusCode::BAD_REQUEST, body),
            "null value in column \"title\" (Failing row contains (...))"
        );
    }

    #[test]
    fn reason_reads_auth_error_shapes() {
        assert_eq!(
            error_reason(StatusCode::BAD_REQUEST, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            error_reason(StatusCode::UNAUTHORIZED, r#"{"code":401,"msg":"JWT expired"}"#),
            "JWT expired"
        );
    }

    #[test]
    fn reason_falls_back_to_status() {
        assert_eq!(
            error_reason(StatusCode::BAD_GATEWAY, ""),
            "502 Bad Gateway"
        );
        assert_eq!(
            error_reason(StatusCode::SERVICE_UNAVAILABLE, "upstream down"),
            "503 Service Unavailable: upstream down"
        );
    }

    #[test]
    fn url_joins_without_double_slash() {
        let endpoint =
            RemoteEndpoint::new("https://demo.supabase.co/", "anon", Duration::from_secs(1))
                .expect("client");
        assert_eq!(endpoint.base_url(), "https://demo.supabase.co");
        assert_eq!(
            endpoint.url("/rest/v1/projects"),
            "https://demo.supabase.co/rest/v1/projects"
        );
    }
}
