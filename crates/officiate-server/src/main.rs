//! officiate server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the JSON API over HTTP.
//!
//! # Administrative runs
//!
//! The two bulk operations on event positions can also be run once from the
//! command line against the configured store:
//!
//! ```
//! cargo run -p officiate-server -- auto-assign
//! cargo run -p officiate-server -- remove-all
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use officiate_core::{engine::removal_message, store::OfficiatingStore};
use officiate_server::ServerConfig;
use officiate_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Swim-meet officiating manager")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Default)]
enum Command {
  /// Serve the JSON API (the default).
  #[default]
  Serve,
  /// Add the event positions the assignment rules call for, then exit.
  AutoAssign,
  /// Delete every event position, then exit.
  RemoveAll,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command.unwrap_or_default() {
    Command::Serve => serve(&server_cfg, store).await,
    Command::AutoAssign => {
      let report = store
        .auto_assign_positions()
        .await
        .context("auto-assignment failed")?;
      println!("{}", report.message());
      println!(
        "{} mandatory, {} optional. Catalog: {}",
        report.mandatory, report.optional, report.catalog
      );
      Ok(())
    }
    Command::RemoveAll => {
      let removed = store
        .remove_all_event_positions()
        .await
        .context("removing event positions failed")?;
      println!("{}", removal_message(removed));
      Ok(())
    }
  }
}

async fn serve(server_cfg: &ServerConfig, store: SqliteStore) -> anyhow::Result<()> {
  let app = officiate_server::app(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
