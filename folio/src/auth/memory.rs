// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

use super::{AuthError, AuthProvider, Session};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthCalls {
    pub current_session: usize,
    pub sign_in: usize,
    pub end_session: usize,
}

/// In-process auth provider with a fixed account list.
#[derive(Default)]
pub struct StaticAuth {
    accounts: HashMap<String, String>,
    sessions: RwLock<HashMap<String, String>>,
    unavailable: AtomicBool,
    current_session_calls: AtomicUsize,
    sign_in_calls: AtomicUsize,
    end_session_calls: AtomicUsize,
}

impl StaticAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts
            .insert(email.to_ascii_lowercase(), password.to_string());
        self
    }

    /// Opens a session directly and returns its token.
    pub fn issue_session(&self, email: &str) -> String {
        let token = Uuid::new_v4().to_string();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(token.clone(), email.to_ascii_lowercase());
        }
        token
    }

    pub fn is_active(&self, token: &str) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(token))
            .unwrap_or(false)
    }

    /// Simulates an unreachable provider for every following call.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    pub fn calls(&self) -> AuthCalls {
        AuthCalls {
            current_session: self.current_session_calls.load(Ordering::Relaxed),
            sign_in: self.sign_in_calls.load(Ordering::Relaxed),
            end_session: self.end_session_calls.load(Ordering::Relaxed),
        }
    }

    fn check_available(&self) -> Result<(), AuthError> {
        if self.unavailable.load(Ordering::Relaxed) {
            Err(AuthError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_session(&self, token: &str) -> Result<Option<Session>, AuthError> {
        self.current_session_calls.fetch_add(1, Ordering::Relaxed);
        self.check_available()?;
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AuthError::Unavailable("session table poisoned".to_string()))?;
        Ok(sessions
            .get(token)
            .map(|email| Session::new(token, Some(email.clone()))))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.sign_in_calls.fetch_add(1, Ordering::Relaxed);
        self.check_available()?;
        let email = email.trim().to_ascii_lowercase();
        match self.accounts.get(&email) {
            Some(expected) if expected == password => {
                let token = self.issue_session(&email);
                Ok(Session::new(token, Some(email)))
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn end_session(&self, token: &str) {
        self.end_session_calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.remove(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn sign_in_opens_a_session_that_ends_on_sign_out() {
        let auth = StaticAuth::new().with_account("Owner@Example.com", "hunter2");
        let session = auth
            .sign_in("owner@example.com", "hunter2")
            .await
            .expect("valid credentials");
        assert_eq!(session.user_email.as_deref(), Some("owner@example.com"));

        let found = auth
            .current_session(&session.access_token)
            .await
            .expect("lookup");
        assert_eq!(found, Some(session.clone()));

        auth.end_session(&session.access_token).await;
        assert!(!auth.is_active(&session.access_token));
        assert_eq!(
            auth.calls(),
            AuthCalls {
                current_session: 1,
                sign_in: 1,
                end_session: 1
            }
        );
    }

    #[actix_web::test]
    async fn wrong_password_is_rejected() {
        let auth = StaticAuth::new().with_account("owner@example.com", "hunter2");
        let err = auth
            .sign_in("owner@example.com", "nope")
            .await
            .expect_err("bad password");
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[actix_web::test]
    async fn unavailable_provider_reports_error() {
        let auth = StaticAuth::new();
        auth.set_unavailable(true);
        assert!(matches!(
            auth.current_session("anything").await,
            Err(AuthError::Unavailable(_))
        ));
    }
}
