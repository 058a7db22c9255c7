// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, error};
use log::{debug, warn};
use std::future::{Ready, ready};

use crate::auth::{AuthProvider, Session};
use crate::config::ValidatedConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Admit(Session),
    /// Location of the login page, carrying the admin path to come back to.
    Redirect(String),
}

pub fn login_redirect(login_path: &str, return_path: &str) -> String {
    format!(
        "{}?return_path={}",
        login_path,
        urlencoding::encode(return_path)
    )
}

/// Decides whether an admin view entry may proceed.
///
/// Without a token the auth provider is not consulted. A provider failure
/// counts as "no session".
pub async fn check_entry(
    auth: &dyn AuthProvider,
    token: Option<&str>,
    config: &ValidatedConfig,
) -> GateDecision {
    let redirect = || GateDecision::Redirect(login_redirect(&config.login.path, &config.admin.path));

    let Some(token) = token else {
        debug!("Admin entry without session cookie");
        return redirect();
    };

    match auth.current_session(token).await {
        Ok(Some(session)) => GateDecision::Admit(session),
        Ok(None) => {
            debug!("Admin entry with inactive session");
            redirect()
        }
        Err(err) => {
            warn!("Session check failed, treating as signed out: {}", err);
            redirect()
        }
    }
}

/// The session admitted by the gate for this request.
impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Session>()
                .cloned()
                .ok_or_else(|| error::ErrorUnauthorized("session required")),
        )
    }
}
