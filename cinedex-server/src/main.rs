//! # Cinedex Server
//!
//! Serves the movie catalog over HTTP. `cinedex-server db migrate` applies
//! the schema, `cinedex-server db check` probes the database, and with no
//! subcommand the API is served until Ctrl-C or SIGTERM.

use std::{future::IntoFuture, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use cinedex_config::{
    Config, ConfigLoad, ConfigLoader, Environment, validation,
};
use cinedex_core::{PoolSettings, PostgresDatabase};
use cinedex_server::{
    AppState, create_app,
    infra::{
        shutdown::{SHUTDOWN_GRACE, shutdown_signal},
        telemetry::init_tracing,
    },
};
use tokio::sync::Notify;
use tracing::{info, warn};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinedex-server", version)]
#[command(about = "Read-only HTTP API over a PostgreSQL movie catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Port that the server will listen on (overrides config)
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Host to bind (overrides config)
    #[arg(long, global = true)]
    host: Option<String>,

    /// development|production (overrides config)
    #[arg(short, long, global = true)]
    environment: Option<Environment>,

    /// PostgreSQL connection string (overrides config)
    #[arg(long, global = true)]
    dsn: Option<String>,

    /// Path to a cinedex.toml configuration file
    #[arg(long, env = "CINEDEX_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Path to a .env file to load before reading the environment
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
    /// Verify the database answers the liveness probe and exit
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(&cli.serve)?;

    match cli.command {
        Some(Command::Db(DbCommand::Migrate)) => run_db_migrate(&config).await,
        Some(Command::Db(DbCommand::Check)) => run_db_check(&config).await,
        None => run_server(config).await,
    }
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    init_tracing();

    let ConfigLoad { config, warnings } = resolve_config(args)?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    Ok(config)
}

/// Loads the layered configuration and applies command-line overrides.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        mut warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if let Some(environment) = args.environment {
        config.environment = environment;
    }
    if let Some(dsn) = args.dsn.clone() {
        config.database.url = dsn;
    }
    // Overrides bypass the loader's checks.
    let override_warnings = validation::apply_guard_rails(&config)
        .context("invalid command-line override")?;
    warnings.extend(override_warnings);

    Ok(ConfigLoad { config, warnings })
}

fn pool_settings(config: &Config) -> PoolSettings {
    PoolSettings {
        max_connections: config.database.max_connections,
        connect_timeout: config.database.connect_timeout,
        query_timeout: config.database.query_timeout,
    }
}

async fn connect(config: &Config) -> anyhow::Result<PostgresDatabase> {
    PostgresDatabase::connect(&config.database.url, &pool_settings(config))
        .await
        .context("failed to connect to PostgreSQL")
}

async fn run_db_migrate(config: &Config) -> anyhow::Result<()> {
    let db = connect(config).await?;
    db.initialize_schema()
        .await
        .context("database migration failed")?;
    db.close().await;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_db_check(config: &Config) -> anyhow::Result<()> {
    let db = connect(config).await?;
    let stats = db.pool_stats();
    db.close().await;
    info!(
        pool.size = stats.size,
        pool.max_size = stats.max_size,
        "Database is reachable"
    );
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let db = connect(&config).await?;
    info!("Connected to database");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let environment = config.environment;
    let state = AppState::from_postgres(db.clone(), Arc::new(config));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, %environment, "Server listening");

    let shutdown_started = Arc::new(Notify::new());
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown_started = Arc::clone(&shutdown_started);
            async move {
                shutdown_signal().await;
                shutdown_started.notify_one();
            }
        })
        .into_future();

    let drain_deadline = async {
        shutdown_started.notified().await;
        tokio::time::sleep(SHUTDOWN_GRACE).await;
    };

    tokio::select! {
        result = serve => result.context("server error")?,
        _ = drain_deadline => {
            warn!(
                grace_secs = SHUTDOWN_GRACE.as_secs(),
                "in-flight requests did not drain in time; shutting down anyway"
            );
        }
    }

    db.close().await;
    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServeArgs {
        ServeArgs {
            port: None,
            host: None,
            environment: None,
            dsn: Some("postgres://localhost:5432/movies".to_string()),
            config: None,
            env_file: None,
        }
    }

    #[test]
    fn production_override_reports_credential_warning() {
        let args = ServeArgs {
            environment: Some(Environment::Production),
            ..args()
        };

        let load = resolve_config(&args).unwrap();

        assert_eq!(load.config.environment, Environment::Production);
        let credential_warnings = load
            .warnings
            .items
            .iter()
            .filter(|w| w.message == "database URL carries no credentials")
            .count();
        assert_eq!(credential_warnings, 1);
    }

    #[test]
    fn override_with_foreign_scheme_is_rejected() {
        let args = ServeArgs {
            dsn: Some("mysql://localhost/movies".to_string()),
            ..args()
        };

        let err = resolve_config(&args).unwrap_err();
        assert!(err.to_string().contains("invalid command-line override"));
    }
}
