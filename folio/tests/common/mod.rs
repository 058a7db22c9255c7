// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};
use folio::admin;
use folio::api;
use folio::app_state::AppState;
use folio::auth::StaticAuth;
use folio::catalog::ContentItem;
use folio::config::ValidatedConfig;
use folio::contact::ContactMessage;
use folio::login;
use folio::store::MemoryStore;
use folio::util::TestConfigBuilder;
use serde_json::Value;
use std::sync::Arc;

pub const ADMIN_EMAIL: &str = "owner@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub struct TestHarness {
    pub config: Arc<ValidatedConfig>,
    pub store: Arc<MemoryStore>,
    pub auth: Arc<StaticAuth>,
    pub app_state: Arc<AppState>,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::with_config(TestConfigBuilder::new().with_contact_interval_ms(0).build()).await
    }

    /// The contact throttle spawns its task on the current runtime.
    pub async fn with_config(config: ValidatedConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let auth = Arc::new(StaticAuth::new().with_account(ADMIN_EMAIL, ADMIN_PASSWORD));
        let app_state = Arc::new(AppState::new(store.clone(), auth.clone()));
        Self {
            config: Arc::new(config),
            store,
            auth,
            app_state,
        }
    }

    pub fn seed_catalog(&self) {
        for item in sample_catalog() {
            self.store.seed_item(item);
        }
    }

    /// Cookie for a freshly opened operator session.
    pub fn admin_cookie(&self) -> Cookie<'static> {
        let token = self.auth.issue_session(ADMIN_EMAIL);
        Cookie::new(self.config.auth.cookie_name.clone(), token)
    }
}

pub fn build_test_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let admin_path = harness.config.admin.path.clone();
    let config_for_admin = harness.config.clone();
    let config_for_login = harness.config.clone();

    App::new()
        .app_data(web::Data::from(harness.config.clone()))
        .app_data(web::Data::from(harness.app_state.clone()))
        .configure(move |cfg| admin::configure(cfg, &admin_path, &config_for_admin))
        .configure(move |cfg| login::configure(cfg, &config_for_login))
        .configure(api::configure)
        .default_service(web::to(api::api_not_found))
}

pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("json body")
}

pub fn notice_messages(json: &Value) -> Vec<String> {
    json.get("notices")
        .and_then(Value::as_array)
        .map(|notices| {
            notices
                .iter()
                .filter_map(|notice| notice.get("message").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub fn item_ids(json: &Value) -> Vec<String> {
    json.get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn catalog_item(id: &str, day: u32, title: &str, description: &str, tags: &[&str]) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        live_url: None,
        github_url: Some(format!("https://github.com/example/{}", id)),
        image_url: None,
        created_at: Utc
            .with_ymd_and_hms(2025, 3, day, 9, 0, 0)
            .single()
            .expect("valid date"),
    }
}

/// Three items, newest first once listed: 1, 2, 3.
pub fn sample_catalog() -> Vec<ContentItem> {
    vec![
        catalog_item(
            "1",
            3,
            "Kanban Board",
            "Drag-and-drop task board",
            &["React", "Vite"],
        ),
        catalog_item(
            "2",
            2,
            "Deploy Kit",
            "Containerised preview environments",
            &["React", "Docker"],
        ),
        catalog_item(
            "3",
            1,
            "Inventory Service",
            "REST backend written with FastAPI",
            &["FastAPI"],
        ),
    ]
}

pub fn sample_message(id: &str, day: u32) -> ContactMessage {
    ContactMessage {
        id: id.to_string(),
        name: "Visitor".to_string(),
        email: "visitor@example.com".to_string(),
        message: format!("Hello #{}", id),
        created_at: Utc
            .with_ymd_and_hms(2025, 4, day, 9, 0, 0)
            .single()
            .expect("valid date"),
    }
}
