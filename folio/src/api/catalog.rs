// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpResponse, Result, web};
use log::warn;
use serde::Deserialize;
use serde_json::json;

use crate::app_state::AppState;
use crate::catalog::{CatalogSnapshot, FilterState, parse_tag_list};
use crate::feedback::Notice;
use crate::store::Access;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    q: String,
    /// Comma separated tag labels.
    #[serde(default)]
    tags: String,
}

impl CatalogQuery {
    fn filter_state(&self) -> FilterState {
        FilterState::new(self.q.clone(), parse_tag_list(&self.tags))
    }
}

pub async fn get_catalog(
    query: web::Query<CatalogQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let items = match app_state.store.list_content_items(&Access::Anonymous).await {
        Ok(items) => items,
        Err(err) => {
            warn!("Public catalog unavailable: {}", err);
            return Ok(HttpResponse::BadGateway().json(json!({
                "notices": [Notice::error(format!("Error fetching projects: {}", err.message()))],
            })));
        }
    };

    let snapshot = CatalogSnapshot::new(items);
    Ok(HttpResponse::Ok().json(snapshot.query(&query.filter_state())))
}
