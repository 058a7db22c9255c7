// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Auth collaborator: session lookup, password sign-in and sign-out.

use async_trait::async_trait;
use serde::Serialize;

mod memory;
mod rest;

pub use memory::{AuthCalls, StaticAuth};
pub use rest::RestAuth;

/// An authenticated session as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    #[serde(skip_serializing)]
    pub access_token: String,
    pub user_email: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, user_email: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    Unavailable(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Unavailable(_) => "auth_unavailable",
        }
    }

    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid email or password".to_string(),
            AuthError::Unavailable(reason) => {
                format!("Authentication service unavailable: {}", reason)
            }
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for AuthError {}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Ok(None)` when the token does not belong to an active session.
    async fn current_session(&self, token: &str) -> Result<Option<Session>, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Best effort. Failures are logged and otherwise ignored.
    async fn end_session(&self, token: &str);
}
