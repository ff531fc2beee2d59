use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use modkit_db::{redact_credentials_in_dsn, sqlite, ConnectOpts, DbEngine, DbHandle};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use users_info::UsersInfo;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Users Server - CRUD REST API over users
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - CRUD REST API over users")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // home_dir is normalized and created by the loader
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("Users server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Final DSN: in-memory SQLite stays as is, relative SQLite files land under home_dir.
fn resolve_dsn(db: &DatabaseConfig, config: &AppConfig) -> Result<String> {
    let dsn = db.url.trim();
    if dsn.is_empty() {
        bail!("Database URL not configured");
    }

    match DbHandle::detect(dsn)? {
        DbEngine::Sqlite => Ok(sqlite::absolutize_sqlite_dsn(dsn, &config.home_dir(), true)?),
        DbEngine::Postgres => Ok(dsn.to_string()),
    }
}

fn connect_opts(db: &DatabaseConfig) -> ConnectOpts {
    let defaults = ConnectOpts::default();
    ConnectOpts {
        max_conns: db.max_conns.or(defaults.max_conns),
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms)))
            .unwrap_or(defaults.sqlite_busy_timeout),
        create_sqlite_dirs: true,
        ..defaults
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db_config = config.database_or_default();
    let dsn = resolve_dsn(&db_config, &config)?;

    tracing::info!("Connecting to database: {}", redact_credentials_in_dsn(Some(&dsn)));
    let db = DbHandle::connect(&dsn, connect_opts(&db_config))
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected DB backend: {:?}", db.engine());

    let conn = db.sea();
    UsersInfo::migrate(&conn).await?;
    let users = UsersInfo::new(conn);

    let ingress = ApiIngress::new(ApiIngressConfig {
        bind_addr: config.server.bind_addr(),
        cors_enabled: config.server.cors_enabled,
        request_timeout_sec: config.server.effective_timeout_sec(),
        ..Default::default()
    });
    let router = ingress.build_router(users.register_rest(axum::Router::new()));

    ingress.serve(router, runtime::wait_for_shutdown()).await?;

    db.close().await?;
    tracing::info!("Users server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let db_config = config.database_or_default();
    let dsn = resolve_dsn(&db_config, &config)?;

    println!("Configuration check passed");
    println!("Database: {}", redact_credentials_in_dsn(Some(&dsn)));
    println!("{}", config.to_yaml()?);
    Ok(())
}
