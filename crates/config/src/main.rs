//! `config` CLI entry point.
//!
//! Initializes logging, connects to CONFIG_DB (or the in-memory mock in
//! unit-testing mode), and runs exactly one command before exiting.

use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sonic_utils_common::db::{ConfigDb, MockConfigDb, RedisConfigDb, CONFIG_DB_URL};
use sonic_utils_common::env;

/// Initialize tracing/logging. The CLI stays quiet unless RUST_LOG says
/// otherwise.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let argv: Vec<String> = std::env::args().collect();

    let db: Box<dyn ConfigDb> = if env::unit_testing_mode() {
        Box::new(MockConfigDb::new())
    } else {
        match RedisConfigDb::connect(CONFIG_DB_URL).await {
            Ok(db) => Box::new(db),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    };

    match sonic_config_cli::run(argv, db.as_ref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
