// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 7080;
const DEFAULT_WORKERS: u16 = 4;

const DEFAULT_CONFIG_TEMPLATE: &str = r#"server:
  host: "0.0.0.0"
  port: {port}
  workers: {workers}

app:
  name: "Folio"
  description: "Personal portfolio"

admin:
  path: "/admin"

login:
  path: "/login"

# url and api_key may also come from FOLIO_STORE_URL / FOLIO_STORE_KEY
store:
  items_table: "projects"
  messages_table: "contacts"
  timeout_seconds: 10

auth:
  cookie_name: "folio_session"
  cookie_secure: false

contact:
  min_interval_ms: 2000

logging:
  level: "info"

security:
  use_forwarded_for: false

profile:
  name: "Your Name"
  title: "Web Developer"
  email: "you@example.com"
  location: ""
  bio: "A short introduction."
  social:
    github: "https://github.com/"
    linkedin: "https://linkedin.com/"

skills:
  - name: "Languages"
    skills: ["JavaScript", "TypeScript", "Python", "Go"]
  - name: "Frameworks"
    skills: ["React", "Vite", "FastAPI"]
  - name: "Tools & Platforms"
    skills: ["Git", "Docker", "Linux"]
  - name: "AI & Automation"
    skills: ["n8n", "Workflow Automation"]
"#;

/// Writes a default `config.yaml` when none exists. Returns the runtime root
/// and whether a file was written.
pub fn ensure_config(root: &Path) -> Result<(PathBuf, bool), BootstrapError> {
    let root_path = normalize_root(root)?;
    let config_path = root_path.join("config.yaml");

    if config_path.exists() {
        return Ok((root_path, false));
    }

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&config_path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok((root_path, false)),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(default_config_yaml().as_bytes())?;
    file.sync_all()?;

    log_action(format!(
        "created config.yaml (http {}, store credentials from environment)",
        DEFAULT_PORT
    ));

    Ok((root_path, true))
}

fn normalize_root(root: &Path) -> Result<PathBuf, BootstrapError> {
    let root_path = if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root.to_path_buf()
    };

    if root_path.exists() {
        if !root_path.is_dir() {
            return Err(BootstrapError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Runtime root is not a directory: {}", root_path.display()),
            )));
        }
        return Ok(root_path);
    }

    fs::create_dir_all(&root_path)?;
    log_action(format!(
        "created runtime root directory {}",
        root_path.display()
    ));
    Ok(root_path)
}

fn default_config_yaml() -> String {
    DEFAULT_CONFIG_TEMPLATE
        .replace("{port}", &DEFAULT_PORT.to_string())
        .replace("{workers}", &DEFAULT_WORKERS.to_string())
}
