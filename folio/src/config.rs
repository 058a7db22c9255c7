// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const STORE_URL_ENV: &str = "FOLIO_STORE_URL";
pub const STORE_KEY_ENV: &str = "FOLIO_STORE_KEY";
pub const PLACEHOLDER_STORE_URL: &str = "https://placeholder.supabase.co";
pub const PLACEHOLDER_STORE_KEY: &str = "placeholder-key";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "default_admin_path")]
    pub path: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            path: default_admin_path(),
        }
    }
}

fn default_admin_path() -> String {
    "/admin".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoginConfig {
    #[serde(default = "default_login_path")]
    pub path: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            path: default_login_path(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_items_table")]
    pub items_table: String,
    #[serde(default = "default_messages_table")]
    pub messages_table: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            items_table: default_items_table(),
            messages_table: default_messages_table(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_items_table() -> String {
    "projects".to_string()
}

fn default_messages_table() -> String {
    "contacts".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

/// Store settings after environment overrides and the placeholder fallback.
#[derive(Debug, Clone)]
pub struct ValidatedStoreConfig {
    pub url: String,
    pub api_key: String,
    pub items_table: String,
    pub messages_table: String,
    pub timeout_seconds: u64,
    pub uses_placeholder: bool,
}

impl ValidatedStoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Host part of the endpoint, for log lines that must not carry the key.
    pub fn host(&self) -> &str {
        let without_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        without_scheme.split('/').next().unwrap_or(without_scheme)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }
}

fn default_cookie_name() -> String {
    "folio_session".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ContactConfig {
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl ContactConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

fn default_min_interval_ms() -> u64 {
    2000
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SecurityConfig {
    #[serde(default)]
    pub use_forwarded_for: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProfileConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    /// Network name to profile URL.
    #[serde(default)]
    pub social: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub admin: AdminConfig,
    pub login: LoginConfig,
    pub store: ValidatedStoreConfig,
    pub auth: AuthConfig,
    pub contact: ContactConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub profile: ProfileConfig,
    pub skills: Vec<SkillCategory>,
}

impl ValidatedConfig {
    pub fn listen_address(&self) -> (&str, u16) {
        (self.server.host.as_str(), self.server.port)
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        serde_yaml::from_str(&config_content).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to parse config file '{}': {}",
                config_path.display(),
                e
            ))
        })
    }

    /// Loads and validates configuration at startup. If validation fails, the application should not start.
    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        Self::load_and_validate_with_env(root, |key| std::env::var(key).ok())
    }

    pub fn load_and_validate_with_env<F>(root: &Path, env: F) -> Result<ValidatedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load(root)?.validate(env)
    }

    pub fn validate<F>(self, env: F) -> Result<ValidatedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        Self::validate_route_path("admin.path", &self.admin.path)?;
        Self::validate_route_path("login.path", &self.login.path)?;
        if self.admin.path == self.login.path {
            return Err(ConfigError::ValidationError(format!(
                "admin.path and login.path must differ, both are '{}'",
                self.admin.path
            )));
        }

        Self::validate_logging(&self.logging)?;
        Self::validate_cookie_name(&self.auth.cookie_name)?;
        let store = Self::resolve_store(self.store, env)?;

        Ok(ValidatedConfig {
            server: self.server,
            app: self.app,
            admin: self.admin,
            login: self.login,
            store,
            auth: self.auth,
            contact: self.contact,
            logging: self.logging,
            security: self.security,
            profile: self.profile,
            skills: self.skills,
        })
    }

    fn validate_route_path(field: &str, path: &str) -> Result<(), ConfigError> {
        if !path.starts_with('/') || path.len() < 2 {
            return Err(ConfigError::ValidationError(format!(
                "{} must start with '/' and name a route, got: '{}'",
                field, path
            )));
        }
        if path.ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "{} must not end with '/', got: '{}'",
                field, path
            )));
        }
        if path.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
            return Err(ConfigError::ValidationError(format!(
                "{} contains characters not allowed in a route: '{}'",
                field, path
            )));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let level = logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Logging level must be one of {}, got: {}",
                LOG_LEVELS.join("|"),
                logging.level
            )));
        }
        Ok(())
    }

    fn validate_cookie_name(name: &str) -> Result<(), ConfigError> {
        let is_token_char =
            |c: char| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c);
        if name.is_empty() || !name.chars().all(is_token_char) {
            return Err(ConfigError::ValidationError(format!(
                "auth.cookie_name must be a non-empty cookie token, got: '{}'",
                name
            )));
        }
        Ok(())
    }

    fn resolve_store<F>(store: StoreConfig, env: F) -> Result<ValidatedStoreConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if store.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "store.timeout_seconds must be greater than 0".to_string(),
            ));
        }
        for (field, table) in [
            ("store.items_table", &store.items_table),
            ("store.messages_table", &store.messages_table),
        ] {
            if table.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }

        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let url = non_blank(env(STORE_URL_ENV)).or_else(|| non_blank(store.url));
        let api_key = non_blank(env(STORE_KEY_ENV)).or_else(|| non_blank(store.api_key));

        if let Some(url) = &url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "store.url must start with http:// or https://, got: {}",
                url
            )));
        }

        let (url, api_key, uses_placeholder) = match (url, api_key) {
            (Some(url), Some(api_key)) => (url, api_key, false),
            _ => {
                warn!(
                    "Record store credentials missing; set {} and {}. Falling back to {}",
                    STORE_URL_ENV, STORE_KEY_ENV, PLACEHOLDER_STORE_URL
                );
                (
                    PLACEHOLDER_STORE_URL.to_string(),
                    PLACEHOLDER_STORE_KEY.to_string(),
                    true,
                )
            }
        };

        Ok(ValidatedStoreConfig {
            url,
            api_key,
            items_table: store.items_table,
            messages_table: store.messages_table,
            timeout_seconds: store.timeout_seconds,
            uses_placeholder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = "server:\n  host: \"127.0.0.1\"\n  port: 5466\napp:\n  name: \"Folio\"\n  description: \"Portfolio\"\n";

    fn write_config(contents: &str) -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("config.yaml"), contents).expect("write config");
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let dir = write_config(MINIMAL);
        let config = Config::load_and_validate_with_env(dir.path(), no_env).expect("valid");
        assert_eq!(config.admin.path, "/admin");
        assert_eq!(config.login.path, "/login");
        assert_eq!(config.store.items_table, "projects");
        assert_eq!(config.store.messages_table, "contacts");
        assert_eq!(config.store.timeout_seconds, 10);
        assert_eq!(config.contact.min_interval_ms, 2000);
        assert_eq!(config.auth.cookie_name, "folio_session");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.workers, 4);
        assert!(!config.security.use_forwarded_for);
    }

    #[test]
    fn missing_credentials_fall_back_to_placeholder() {
        let dir = write_config(MINIMAL);
        let config = Config::load_and_validate_with_env(dir.path(), no_env).expect("valid");
        assert!(config.store.uses_placeholder);
        assert_eq!(config.store.url, PLACEHOLDER_STORE_URL);
        assert_eq!(config.store.host(), "placeholder.supabase.co");
    }

    #[test]
    fn environment_overrides_file_values() {
        let dir = write_config(&format!(
            "{}store:\n  url: \"https://file.supabase.co\"\n  api_key: \"file-key\"\n",
            MINIMAL
        ));
        let env = |key: &str| match key {
            STORE_URL_ENV => Some("https://env.supabase.co/".to_string()),
            STORE_KEY_ENV => Some("env-key".to_string()),
            _ => None,
        };
        let config = Config::load_and_validate_with_env(dir.path(), env).expect("valid");
        assert!(!config.store.uses_placeholder);
        assert_eq!(config.store.url, "https://env.supabase.co/");
        assert_eq!(config.store.api_key, "env-key");
    }

    #[test]
    fn file_credentials_are_used_without_env() {
        let dir = write_config(&format!(
            "{}store:\n  url: \"https://file.supabase.co\"\n  api_key: \"file-key\"\n",
            MINIMAL
        ));
        let config = Config::load_and_validate_with_env(dir.path(), no_env).expect("valid");
        assert_eq!(config.store.url, "https://file.supabase.co");
        assert_eq!(config.store.api_key, "file-key");
    }

    #[test]
    fn rejects_non_http_store_url() {
        let dir = write_config(&format!(
            "{}store:\n  url: \"ftp://example.com\"\n  api_key: \"k\"\n",
            MINIMAL
        ));
        let err = Config::load_and_validate_with_env(dir.path(), no_env).expect_err("bad url");
        assert!(err.to_string().contains("store.url"));
    }

    #[test]
    fn rejects_bad_admin_paths() {
        for path in ["admin", "/admin/", "/", "/ad min"] {
            let dir = write_config(&format!("{}admin:\n  path: \"{}\"\n", MINIMAL, path));
            assert!(
                Config::load_and_validate_with_env(dir.path(), no_env).is_err(),
                "{} should be rejected",
                path
            );
        }
    }

    #[test]
    fn rejects_matching_admin_and_login_paths() {
        let dir = write_config(&format!(
            "{}admin:\n  path: \"/login\"\n",
            MINIMAL
        ));
        let err = Config::load_and_validate_with_env(dir.path(), no_env).expect_err("clash");
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn rejects_unknown_log_level_and_zero_values() {
        let dir = write_config(&format!("{}logging:\n  level: \"loud\"\n", MINIMAL));
        assert!(Config::load_and_validate_with_env(dir.path(), no_env).is_err());

        let dir = write_config(&format!("{}store:\n  timeout_seconds: 0\n", MINIMAL));
        assert!(Config::load_and_validate_with_env(dir.path(), no_env).is_err());

        let dir = write_config(
            "server:\n  host: \"127.0.0.1\"\n  port: 1\n  workers: 0\napp:\n  name: a\n  description: b\n",
        );
        assert!(Config::load_and_validate_with_env(dir.path(), no_env).is_err());
    }

    #[test]
    fn rejects_cookie_name_with_separators() {
        let dir = write_config(&format!("{}auth:\n  cookie_name: \"my cookie\"\n", MINIMAL));
        let err = Config::load_and_validate_with_env(dir.path(), no_env).expect_err("bad cookie");
        assert!(err.to_string().contains("cookie_name"));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = TempDir::new().expect("temp dir");
        let err = Config::load(dir.path()).expect_err("no config");
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn profile_and_skills_are_parsed() {
        let dir = write_config(&format!(
            "{}profile:\n  name: \"Ada\"\n  social:\n    github: \"https://github.com/ada\"\nskills:\n  - name: \"Languages\"\n    skills: [\"Rust\", \"Go\"]\n",
            MINIMAL
        ));
        let config = Config::load_and_validate_with_env(dir.path(), no_env).expect("valid");
        assert_eq!(config.profile.name, "Ada");
        assert_eq!(
            config.profile.social.get("github").map(String::as_str),
            Some("https://github.com/ada")
        );
        assert_eq!(config.skills[0].skills, vec!["Rust", "Go"]);
    }
}
