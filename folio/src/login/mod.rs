// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::ValidatedConfig;
use actix_web::web;

pub mod cookie;
mod handlers;
pub mod types;

pub use cookie::{SessionToken, read_session_token, removal_cookie, session_cookie};

/// Password sign-in under the configured login path. The login page itself
/// belongs to the front end.
pub fn configure(cfg: &mut web::ServiceConfig, config: &ValidatedConfig) {
    cfg.service(
        web::scope(&config.login.path)
            .route("/api/session", web::post().to(handlers::password_login)),
    );
}
