// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::flow::{ContentManager, CreateOutcome};
use crate::admin::middleware;
use crate::app_state::AppState;
use crate::auth::Session;
use crate::catalog::{ContentDraft, ContentItem};
use crate::config::ValidatedConfig;
use crate::contact::ContactMessage;
use crate::feedback::Notice;
use crate::login::{SessionToken, read_session_token, removal_cookie};
use crate::store::{Access, StoreError, StoreErrorKind};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use serde::Serialize;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, admin_path: &str, config: &Arc<ValidatedConfig>) {
    // Only the view entry is gated; actions rely on the store to refuse stale tokens.
    cfg.service(
        web::resource(admin_path)
            .wrap(middleware::RequireSessionMiddleware::new(config.clone()))
            .route(web::get().to(admin_view)),
    )
    .service(
        web::scope(&format!("{}/api", admin_path))
            .route("/items", web::get().to(list_items))
            .route("/items", web::post().to(create_item))
            .route("/messages", web::get().to(list_messages)),
    )
    .route(&format!("{}/logout", admin_path), web::post().to(logout));
}

#[derive(Serialize)]
struct AdminViewResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [ContentItem]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<&'a [ContactMessage]>,
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct ItemsResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [ContentItem]>,
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct MessagesResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<&'a [ContactMessage]>,
    notices: Vec<Notice>,
}

#[derive(Serialize)]
struct CreateItemResponse<'a> {
    draft: &'a ContentDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [ContentItem]>,
    notices: Vec<Notice>,
}

fn store_failure_status(err: &StoreError) -> StatusCode {
    match err.kind() {
        StoreErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_GATEWAY,
    }
}

async fn admin_view(session: Session, app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let access = Access::bearer(session.access_token.clone());
    let mut manager = ContentManager::new();
    let report = manager.initialize(app_state.store.as_ref(), &access).await;
    let notices = manager.take_notices();

    Ok(HttpResponse::Ok().json(AdminViewResponse {
        user_email: session.user_email.as_deref(),
        items: report.items_loaded.then_some(manager.items()),
        messages: report.messages_loaded.then_some(manager.messages()),
        notices,
    }))
}

async fn list_items(token: SessionToken, app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let access = Access::bearer(token.0);
    let mut manager = ContentManager::new();
    let result = manager.refresh_items(app_state.store.as_ref(), &access).await;
    let notices = manager.take_notices();

    Ok(match result {
        Ok(()) => HttpResponse::Ok().json(ItemsResponse {
            items: Some(manager.items()),
            notices,
        }),
        Err(err) => HttpResponse::build(store_failure_status(&err)).json(ItemsResponse {
            items: None,
            notices,
        }),
    })
}

async fn list_messages(
    token: SessionToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let access = Access::bearer(token.0);
    let mut manager = ContentManager::new();
    let result = manager
        .refresh_messages(app_state.store.as_ref(), &access)
        .await;
    let notices = manager.take_notices();

    Ok(match result {
        Ok(()) => HttpResponse::Ok().json(MessagesResponse {
            messages: Some(manager.messages()),
            notices,
        }),
        Err(err) => HttpResponse::build(store_failure_status(&err)).json(MessagesResponse {
            messages: None,
            notices,
        }),
    })
}

async fn create_item(
    token: SessionToken,
    payload: web::Json<ContentDraft>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let access = Access::bearer(token.0);
    let mut manager = ContentManager::with_draft(payload.into_inner());
    let outcome = manager.create_item(app_state.store.as_ref(), &access).await;
    let notices = manager.take_notices();

    let (status, refreshed) = match &outcome {
        CreateOutcome::Created { refreshed } => (StatusCode::CREATED, *refreshed),
        CreateOutcome::Invalid(_) => (StatusCode::UNPROCESSABLE_ENTITY, false),
        CreateOutcome::Failed(err) => (store_failure_status(err), false),
    };

    Ok(HttpResponse::build(status).json(CreateItemResponse {
        draft: manager.draft(),
        items: refreshed.then_some(manager.items()),
        notices,
    }))
}

/// Ends the session unconditionally and sends the browser to the login page.
async fn logout(
    req: HttpRequest,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Some(token) = read_session_token(&req, &config) {
        app_state.auth.end_session(&token).await;
    }
    log::info!("Operator signed out");

    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, config.login.path.clone()))
        .cookie(removal_cookie(&config))
        .finish())
}
