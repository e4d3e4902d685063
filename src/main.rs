//! knots - todo API server
//!
//! ```text
//! knots [--env dev|prod] [--port N]
//! ```
//!
//! Reads `config/{env}.yaml`; `DATABASE_URL`, `JWT_SECRET` and `PORT`
//! override the file. Without a PostgreSQL URL the server keeps all data
//! in memory.

use std::sync::Arc;

use knots::config::AppConfig;
use knots::db::Database;
use knots::gateway::{run_server, state::AppState};
use knots::user_auth::{PasswordService, TokenService};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() {
    let env = get_env();
    let app_config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    let _log_guard = knots::logging::init_logging(&app_config);

    tracing::info!("Starting knots in {} mode", env);

    if let Err(e) = run(app_config).await {
        tracing::error!("Fatal: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(app_config: AppConfig) -> anyhow::Result<()> {
    let tokens = Arc::new(TokenService::from_config(&app_config.auth)?);
    let passwords = PasswordService::from_config(&app_config.auth)?;
    let cookie_name = app_config.auth.cookie_name.clone();

    let port = get_port_override().unwrap_or(app_config.gateway.port);

    let (state, db) = match app_config.postgres_url.as_deref() {
        Some(url) => {
            tracing::info!("[DB] Connecting to PostgreSQL...");
            let db = Arc::new(Database::connect(url, &app_config.database).await?);
            db.init_schema().await?;
            tracing::info!("[DB] PostgreSQL connected and schema initialized");
            let state = AppState::with_postgres(db.clone(), passwords, tokens, cookie_name);
            (state, Some(db))
        }
        None => {
            tracing::warn!("[DB] No postgres_url configured; data is kept in memory only");
            (AppState::in_memory(passwords, tokens, cookie_name), None)
        }
    };

    let result = run_server(&app_config.gateway.host, port, Arc::new(state)).await;

    if let Some(db) = db {
        db.close().await;
        tracing::info!("[DB] PostgreSQL pool closed");
    }
    result
}
