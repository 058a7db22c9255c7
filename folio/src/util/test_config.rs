// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use std::collections::BTreeMap;

use crate::config::{
    AdminConfig, AppConfig, AuthConfig, ContactConfig, LoggingConfig, LoginConfig,
    ProfileConfig, SecurityConfig, ServerConfig, SkillCategory, ValidatedConfig,
    ValidatedStoreConfig,
};

#[derive(Debug, Clone)]
pub struct TestConfigBuilder {
    config: ValidatedConfig,
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ValidatedConfig {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 7080,
                    workers: 1,
                },
                app: AppConfig {
                    name: "Test Folio".to_string(),
                    description: "Test Description".to_string(),
                },
                admin: AdminConfig {
                    path: "/admin".to_string(),
                },
                login: LoginConfig {
                    path: "/login".to_string(),
                },
                store: ValidatedStoreConfig {
                    url: "http://127.0.0.1:9".to_string(),
                    api_key: "test-anon-key".to_string(),
                    items_table: "projects".to_string(),
                    messages_table: "contacts".to_string(),
                    timeout_seconds: 1,
                    uses_placeholder: false,
                },
                auth: AuthConfig {
                    cookie_name: "folio_session".to_string(),
                    cookie_secure: false,
                },
                contact: ContactConfig {
                    min_interval_ms: 2000,
                },
                logging: LoggingConfig {
                    level: "info".to_string(),
                },
                security: SecurityConfig {
                    use_forwarded_for: false,
                },
                profile: build_test_profile(),
                skills: vec![SkillCategory {
                    name: "Languages".to_string(),
                    skills: vec!["Rust".to_string(), "TypeScript".to_string()],
                }],
            },
        }
    }

    pub fn with_admin_path(mut self, path: &str) -> Self {
        self.config.admin.path = path.to_string();
        self
    }

    pub fn with_login_path(mut self, path: &str) -> Self {
        self.config.login.path = path.to_string();
        self
    }

    pub fn with_forwarded_for(mut self, enabled: bool) -> Self {
        self.config.security.use_forwarded_for = enabled;
        self
    }

    pub fn with_contact_interval_ms(mut self, interval_ms: u64) -> Self {
        self.config.contact.min_interval_ms = interval_ms;
        self
    }

    pub fn with_secure_cookie(mut self, secure: bool) -> Self {
        self.config.auth.cookie_secure = secure;
        self
    }

    pub fn build(self) -> ValidatedConfig {
        self.config
    }
}

pub fn test_config() -> ValidatedConfig {
    TestConfigBuilder::new().build()
}

fn build_test_profile() -> ProfileConfig {
    let mut social = BTreeMap::new();
    social.insert(
        "github".to_string(),
        "https://github.com/example".to_string(),
    );
    ProfileConfig {
        name: "Test Owner".to_string(),
        title: "Developer".to_string(),
        email: "owner@example.com".to_string(),
        location: "Nowhere".to_string(),
        bio: "Builds things.".to_string(),
        social,
    }
}
