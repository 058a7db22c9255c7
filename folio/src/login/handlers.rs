// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result, web};
use log::{info, warn};

use super::cookie::session_cookie;
use super::types::{LoginErrorResponse, LoginSuccessResponse, PasswordLoginRequest};
use crate::app_state::AppState;
use crate::auth::AuthError;
use crate::config::ValidatedConfig;
use crate::security::sanitize_return_path;

pub(super) fn login_error_response(code: &str, message: &str, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(LoginErrorResponse {
        code: code.to_string(),
        message: message.to_string(),
    })
}

pub(super) async fn password_login(
    payload: web::Json<PasswordLoginRequest>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Ok(login_error_response(
            "invalid_request",
            "Email and password are required.",
            StatusCode::BAD_REQUEST,
        ));
    }

    let session = match app_state
        .auth
        .sign_in(request.email.trim(), &request.password)
        .await
    {
        Ok(session) => session,
        Err(err @ AuthError::InvalidCredentials) => {
            info!("Sign-in refused for {}", request.email.trim());
            return Ok(login_error_response(
                err.code(),
                &err.message(),
                StatusCode::UNAUTHORIZED,
            ));
        }
        Err(err) => {
            warn!("Sign-in failed: {}", err);
            return Ok(login_error_response(
                err.code(),
                &err.message(),
                StatusCode::BAD_GATEWAY,
            ));
        }
    };

    let return_path = request
        .return_path
        .as_deref()
        .and_then(sanitize_return_path)
        .unwrap_or_else(|| config.admin.path.clone());

    info!(
        "Operator signed in: {}",
        session.user_email.as_deref().unwrap_or("unknown")
    );

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&config, &session.access_token))
        .json(LoginSuccessResponse { return_path }))
}
