// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::{AuthError, AuthProvider, Session};
use crate::remote::{RemoteEndpoint, error_reason, transport_reason};

const USER_PATH: &str = "/auth/v1/user";
const TOKEN_PATH: &str = "/auth/v1/token?grant_type=password";
const LOGOUT_PATH: &str = "/auth/v1/logout";

#[derive(Debug, Deserialize)]
struct UserBody {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    user: Option<UserBody>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

/// GoTrue backed auth provider.
pub struct RestAuth {
    endpoint: RemoteEndpoint,
}

impl RestAuth {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

fn unavailable(err: &reqwest::Error) -> AuthError {
    let reason = transport_reason(err);
    warn!("Auth request failed: {}", reason);
    AuthError::Unavailable(reason)
}

#[async_trait]
impl AuthProvider for RestAuth {
    async fn current_session(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let response = self
            .endpoint
            .request(Method::GET, USER_PATH, Some(token))
            .send()
            .await
            .map_err(|err| unavailable(&err))?;

        match response.status() {
            status if status.is_success() => {
                let user: UserBody = response
                    .json()
                    .await
                    .map_err(|err| AuthError::Unavailable(err.to_string()))?;
                Ok(Some(Session::new(token, user.email)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Auth provider reports no active session");
                Ok(None)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Unavailable(error_reason(status, &body)))
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .endpoint
            .request(Method::POST, TOKEN_PATH, None)
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(|err| unavailable(&err))?;

        let status = response.status();
        if status.is_success() {
            let body: TokenBody = response
                .json()
                .await
                .map_err(|err| AuthError::Unavailable(err.to_string()))?;
            let user_email = body
                .user
                .and_then(|user| user.email)
                .or_else(|| Some(email.to_string()));
            return Ok(Session::new(body.access_token, user_email));
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            debug!("Sign-in refused: {}", error_reason(status, &body));
            Err(AuthError::InvalidCredentials)
        } else {
            Err(AuthError::Unavailable(error_reason(status, &body)))
        }
    }

    async fn end_session(&self, token: &str) {
        match self
            .endpoint
            .request(Method::POST, LOGOUT_PATH, Some(token))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                debug!("Auth session ended");
            }
            Ok(response) => {
                debug!("Sign-out answered {}; ignoring", response.status());
            }
            Err(err) => {
                warn!("Sign-out request failed: {}", transport_reason(&err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_auth() -> RestAuth {
        let endpoint = RemoteEndpoint::new("http://127.0.0.1:9", "anon", Duration::from_millis(500))
            .expect("client");
        RestAuth::new(endpoint)
    }

    #[actix_web::test]
    async fn session_lookup_against_dead_backend_is_unavailable() {
        let auth = unreachable_auth();
        let err = auth
            .current_session("token")
            .await
            .expect_err("nothing listens on the discard port");
        assert_eq!(err.code(), "auth_unavailable");
    }

    #[actix_web::test]
    async fn sign_out_never_fails() {
        unreachable_auth().end_session("token").await;
    }

    #[test]
    fn token_body_decodes_user_email() {
        let body: TokenBody = serde_json::from_str(
            r#"{"access_token":"jwt","token_type":"bearer","expires_in":3600,"user":{"id":"u1","email":"me@example.com"}}"#,
        )
        .expect("decode");
        assert_eq!(body.access_token, "jwt");
        assert_eq!(body.user.and_then(|user| user.email).as_deref(), Some("me@example.com"));
    }
}
