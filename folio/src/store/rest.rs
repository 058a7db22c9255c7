// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Access, RecordStore, StoreError, StoreErrorKind};
use crate::catalog::{ContentItem, NewContentItem};
use crate::contact::{ContactMessage, NewContactMessage};
use crate::remote::{RemoteEndpoint, error_reason, transport_reason};

const REST_PREFIX: &str = "/rest/v1/";
const SELECT_NEWEST_FIRST: &str = "select=*&order=created_at.desc";

/// PostgREST backed record store.
pub struct RestStore {
    endpoint: RemoteEndpoint,
    items_table: String,
    messages_table: String,
}

impl RestStore {
    pub fn new(endpoint: RemoteEndpoint, items_table: &str, messages_table: &str) -> Self {
        Self {
            endpoint,
            items_table: items_table.to_string(),
            messages_table: messages_table.to_string(),
        }
    }

    fn table_path(table: &str) -> String {
        format!("{}{}", REST_PREFIX, urlencoding::encode(table))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        access: &Access,
        table: &str,
    ) -> Result<Vec<T>, StoreError> {
        let path = format!("{}?{}", Self::table_path(table), SELECT_NEWEST_FIRST);
        debug!("Store select from {}", table);
        let response = self
            .endpoint
            .request(Method::GET, &path, access.token())
            .send()
            .await
            .map_err(|err| log_transport(table, &err))?;
        let response = ensure_success(table, response).await?;
        let body = response
            .text()
            .await
            .map_err(|err| log_transport(table, &err))?;
        serde_json::from_str(&body).map_err(|err| {
            warn!("Store answer from {} could not be decoded: {}", table, err);
            StoreError::decode(format!("unexpected response from {}: {}", table, err))
        })
    }

    async fn insert<T: Serialize + Sync>(
        &self,
        access: &Access,
        table: &str,
        record: &T,
    ) -> Result<(), StoreError> {
        debug!("Store insert into {}", table);
        let response = self
            .endpoint
            .request(Method::POST, &Self::table_path(table), access.token())
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(|err| log_transport(table, &err))?;
        ensure_success(table, response).await?;
        Ok(())
    }
}

fn log_transport(table: &str, err: &reqwest::Error) -> StoreError {
    let reason = transport_reason(err);
    warn!("Store request for {} failed: {}", table, reason);
    StoreError::unavailable(reason)
}

fn classify(status: StatusCode) -> StoreErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreErrorKind::Unauthorized,
        status if status.is_server_error() => StoreErrorKind::Unavailable,
        _ => StoreErrorKind::Rejected,
    }
}

async fn ensure_success(table: &str, response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let reason = error_reason(status, &body);
    warn!("Store answered {} for {}: {}", status.as_u16(), table, reason);
    Err(StoreError::new(classify(status), reason))
}

#[async_trait]
impl RecordStore for RestStore {
    async fn list_content_items(&self, access: &Access) -> Result<Vec<ContentItem>, StoreError> {
        self.select(access, &self.items_table).await
    }

    async fn insert_content_item(
        &self,
        access: &Access,
        item: &NewContentItem,
    ) -> Result<(), StoreError> {
        self.insert(access, &self.items_table, item).await
    }

    async fn list_contact_messages(
        &self,
        access: &Access,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        self.select(access, &self.messages_table).await
    }

    async fn insert_contact_message(
        &self,
        access: &Access,
        message: &NewContactMessage,
    ) -> Result<(), StoreError> {
        self.insert(access, &self.messages_table, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_unauthorized() {
        assert_eq!(classify(StatusCode::UNAUTHORIZED), StoreErrorKind::Unauthorized);
        assert_eq!(classify(StatusCode::FORBIDDEN), StoreErrorKind::Unauthorized);
    }

    #[test]
    fn server_errors_are_unavailable_and_client_errors_rejected() {
        assert_eq!(classify(StatusCode::BAD_GATEWAY), StoreErrorKind::Unavailable);
        assert_eq!(classify(StatusCode::BAD_REQUEST), StoreErrorKind::Rejected);
        assert_eq!(classify(StatusCode::CONFLICT), StoreErrorKind::Rejected);
    }

    #[test]
    fn table_path_is_encoded() {
        assert_eq!(RestStore::table_path("projects"), "/rest/v1/projects");
        assert_eq!(RestStore::table_path("my table"), "/rest/v1/my%20table");
    }

    #[actix_web::test]
    async fn unreachable_backend_is_unavailable() {
        let endpoint = RemoteEndpoint::new(
            "http://127.0.0.1:9",
            "anon",
            std::time::Duration::from_millis(500),
        )
        .expect("client");
        let store = RestStore::new(endpoint, "projects", "contacts");
        let err = store
            .list_content_items(&Access::Anonymous)
            .await
            .expect_err("nothing listens on the discard port");
        assert_eq!(err.kind(), StoreErrorKind::Unavailable);
    }
}
