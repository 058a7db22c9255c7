// This file is part of the product Folio.
// SPDX-FileCopyrightText: 2025-2026 The Folio Authors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{info, warn};
use std::sync::Arc;

use folio::app_state::AppState;
use folio::config::ValidatedConfig;
use folio::{admin, api, bootstrap, login, util};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if matches!(parsed_args.mode, RunMode::Help) {
        print_usage();
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    let system = System::new();
    match system.block_on(run_server(bootstrap)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

async fn run_server(bootstrap: bootstrap::BootstrapResult) -> std::io::Result<()> {
    let validated_config = Arc::new(bootstrap.validated_config);

    let logger = util::build_logger(&validated_config.logging.level);
    util::init_logger(util::default_rules(), logger).map_err(|error| {
        eprintln!("❌ Failed to initialize logger: {}", error);
        std::io::Error::other(error.to_string())
    })?;

    log_startup_info(&validated_config, bootstrap.created_config);

    let app_state = match AppState::from_config(&validated_config) {
        Ok(state) => Arc::new(state),
        Err(error) => {
            eprintln!("❌ Failed to initialize backend client: {}", error);
            return Err(std::io::Error::other(error.to_string()));
        }
    };

    let bind_address = validated_config.listen_address();
    let bind_address = (bind_address.0.to_string(), bind_address.1);
    let workers = validated_config.server.workers;

    let app_factory = {
        let config = validated_config.clone();
        let app_state = app_state.clone();

        move || {
            let admin_path = config.admin.path.clone();
            let config_for_admin = config.clone();
            let config_for_login = config.clone();

            App::new()
                .app_data(web::Data::from(config.clone()))
                .app_data(web::Data::from(app_state.clone()))
                .wrap(Logger::new(
                    r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
                ))
                .configure(move |cfg| admin::configure(cfg, &admin_path, &config_for_admin))
                .configure(move |cfg| login::configure(cfg, &config_for_login))
                .configure(api::configure)
                .default_service(web::to(api::api_not_found))
        }
    };

    info!("Listening on http://{}:{}", bind_address.0, bind_address.1);
    HttpServer::new(app_factory)
        .workers(workers)
        .bind(bind_address)?
        .run()
        .await
}

fn log_startup_info(config: &ValidatedConfig, created_config: bool) {
    info!("Starting {} ({})", config.app.name, env!("CARGO_PKG_VERSION"));
    if created_config {
        info!("Wrote default config.yaml");
    }
    info!("Admin path: {}", config.admin.path);
    info!("Login path: {}", config.login.path);
    info!(
        "Record store: {} (tables {}, {})",
        config.store.host(),
        config.store.items_table,
        config.store.messages_table
    );
    if config.store.uses_placeholder {
        warn!("Record store credentials are placeholders; every store call will fail");
    }
    info!(
        "Contact throttle: {} ms per client",
        config.contact.min_interval_ms
    );

    if let Ok(current_dir) = std::env::current_dir() {
        info!("Working directory: {}", current_dir.display());
    }
}

fn print_usage() {
    println!("Usage: folio [-C <root>]");
    println!();
    println!("  -C <root>    runtime directory holding config.yaml (default: .)");
    println!("  -h, --help   show this help");
    println!();
    println!("Environment: FOLIO_STORE_URL, FOLIO_STORE_KEY, RUST_LOG");
}

enum RunMode {
    Serve,
    Help,
}

struct ParsedArgs {
    runtime_root: std::path::PathBuf,
    mode: RunMode,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.iter().any(|arg| is_help_flag(arg)) {
        return Ok(ParsedArgs {
            runtime_root: std::path::PathBuf::from("."),
            mode: RunMode::Help,
        });
    }

    let mut args = args.into_iter();
    let mut runtime_root = std::path::PathBuf::from(".");

    while let Some(arg) = args.next() {
        if arg == "--" {
            continue;
        } else if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = std::path::PathBuf::from(value);
        } else {
            return Err(format!("Unexpected argument '{}'", arg));
        }
    }

    let runtime_root = make_runtime_root_absolute(runtime_root)?;
    Ok(ParsedArgs {
        runtime_root,
        mode: RunMode::Serve,
    })
}

fn is_help_flag(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn make_runtime_root_absolute(
    runtime_root: std::path::PathBuf,
) -> Result<std::path::PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root);
    }

    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}

#[cfg(test)]
mod tests {
    use super::{RunMode, parse_args_from};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_args_defaults_to_serving_from_current_dir() {
        let parsed = parse_args_from(Vec::new()).expect("parse args");
        assert!(matches!(parsed.mode, RunMode::Serve));
        assert!(parsed.runtime_root.is_absolute());
    }

    #[test]
    fn parse_args_accepts_runtime_root() {
        let parsed = parse_args_from(args(&["-C", "runtime"])).expect("parse args");
        assert!(parsed.runtime_root.ends_with("runtime"));
    }

    #[test]
    fn parse_args_ignores_double_dash() {
        let parsed = parse_args_from(args(&["--", "-C", "runtime"])).expect("parse args");
        assert!(parsed.runtime_root.ends_with("runtime"));
    }

    #[test]
    fn parse_args_requires_value_for_root() {
        match parse_args_from(args(&["-C"])) {
            Err(error) => assert!(error.contains("-C")),
            Ok(_) => panic!("expected missing value error"),
        }
    }

    #[test]
    fn parse_args_rejects_unknown_arguments() {
        assert!(parse_args_from(args(&["serve"])).is_err());
    }

    #[test]
    fn help_flag_wins() {
        let parsed = parse_args_from(args(&["-C", "x", "--help"])).expect("parse args");
        assert!(matches!(parsed.mode, RunMode::Help));
    }
}
