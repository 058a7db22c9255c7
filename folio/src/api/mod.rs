// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

mod catalog;
mod contact;
mod profile;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/catalog", web::get().to(catalog::get_catalog))
            .route("/profile", web::get().to(profile::get_profile))
            .route("/contact", web::post().to(contact::submit_contact))
            .default_service(web::to(api_not_found)),
    );
}

pub async fn api_not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "code": "not_found",
        "message": format!("No route for {} {}", req.method(), req.path()),
    }))
}
