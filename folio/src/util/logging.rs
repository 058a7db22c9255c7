// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use env_logger::Logger;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

/// Rewrites records from targets starting with `prefix` at level `from` to level `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRule {
    pub prefix: String,
    pub from: Level,
    pub to: Level,
}

impl LevelRule {
    pub fn new(prefix: &str, from: Level, to: Level) -> Self {
        Self {
            prefix: prefix.to_string(),
            from,
            to,
        }
    }
}

/// Connection chatter from the outbound HTTP stack is demoted below debug.
pub fn default_rules() -> Vec<LevelRule> {
    vec![
        LevelRule::new("reqwest", Level::Debug, Level::Trace),
        LevelRule::new("hyper", Level::Debug, Level::Trace),
        LevelRule::new("hyper_util", Level::Debug, Level::Trace),
        LevelRule::new("rustls", Level::Debug, Level::Trace),
    ]
}

struct LevelModifierLogger {
    inner: Logger,
    rules: Vec<LevelRule>,
}

impl LevelModifierLogger {
    fn new(inner: Logger, rules: Vec<LevelRule>) -> Self {
        LevelModifierLogger { inner, rules }
    }

    fn get_new_level(&self, target: &str, original_level: Level) -> Level {
        rewrite_level(&self.rules, target, original_level)
    }
}

fn rewrite_level(rules: &[LevelRule], target: &str, original_level: Level) -> Level {
    rules
        .iter()
        .find(|rule| target.starts_with(&rule.prefix) && rule.from == original_level)
        .map(|rule| rule.to)
        .unwrap_or(original_level)
}

impl Log for LevelModifierLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let new_level = self.get_new_level(metadata.target(), metadata.level());
        let new_metadata = Metadata::builder()
            .level(new_level)
            .target(metadata.target())
            .build();
        self.inner.enabled(&new_metadata)
    }

    fn log(&self, record: &Record) {
        let new_level = self.get_new_level(record.target(), record.level());
        let new_record = Record::builder()
            .level(new_level)
            .target(record.target())
            .args(*record.args())
            .module_path(record.module_path())
            .file(record.file())
            .line(record.line())
            .build();
        self.inner.log(&new_record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Unknown names fall back to info; config validation rejects them earlier.
pub fn parse_level_filter(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Stdout logger with `RUST_LOG` directives layered over the configured level.
pub fn build_logger(level: &str) -> Logger {
    env_logger::Builder::new()
        .filter_level(parse_level_filter(level))
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .build()
}

pub fn init_logger(rules: Vec<LevelRule>, logger: Logger) -> Result<(), SetLoggerError> {
    let custom_logger = LevelModifierLogger::new(logger, rules);
    log::set_boxed_logger(Box::new(custom_logger))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
