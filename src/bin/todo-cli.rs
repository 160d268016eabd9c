//! Interactive ToDo list manager and autoclose runner.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use todo::autoclose;
use todo::cli::{ui, Menu};
use todo::config::{env_required, AutocloseConfig, Limits};
use todo::store::{MemoryStore, PgStore, SharedStore};

#[derive(Parser)]
#[command(name = "todo-cli", version, about = "ToDo list manager")]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu.
    Menu {
        /// Where projects and tasks are kept.
        #[arg(long, value_enum, default_value_t = StoreKind::Memory)]
        store: StoreKind,
    },

    /// Close overdue tasks once and exit.
    Autoclose,

    /// Close overdue tasks on a fixed interval until interrupted.
    Scheduler {
        /// Seconds between runs (defaults to TODO_AUTOCLOSE_INTERVAL_SECS).
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    Memory,
    Database,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info,todo=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,todo=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let limits = Limits::from_env().map_err(anyhow::Error::msg)?;

    match cli.command.unwrap_or(Commands::Menu {
        store: StoreKind::Memory,
    }) {
        Commands::Menu { store } => {
            let store: SharedStore = match store {
                StoreKind::Memory => Arc::new(MemoryStore::new()),
                StoreKind::Database => connect().await?,
            };
            Menu::new(store, limits).run().await
        }
        Commands::Autoclose => {
            let store = connect().await?;
            let closed = autoclose::run_once(store.as_ref(), Utc::now()).await?;
            ui::print_success(&format!("[autoclose] closed {closed} overdue tasks"));
            Ok(())
        }
        Commands::Scheduler { interval_secs } => {
            let interval = match interval_secs {
                Some(0) => anyhow::bail!("--interval-secs must be greater than zero"),
                Some(secs) => Duration::from_secs(secs),
                None => AutocloseConfig::from_env().map_err(anyhow::Error::msg)?.interval,
            };
            let store = connect().await?;

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let handle = autoclose::spawn(store, interval, shutdown_rx);
            ui::print_info("Autoclose scheduler started, press Ctrl+C to stop");

            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for Ctrl+C")?;
            let _ = shutdown_tx.send(true);
            handle.await?;
            Ok(())
        }
    }
}

async fn connect() -> Result<SharedStore> {
    let database_url = env_required("DATABASE_URL").map_err(anyhow::Error::msg)?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    Ok(Arc::new(PgStore::new(pool)))
}
