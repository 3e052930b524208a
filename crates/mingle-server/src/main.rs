//! mingle server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), selects the
//! profile named by `--env` / `MINGLE_ENV`, opens the SQLite store, and serves
//! the JSON API plus `/assets` over HTTP.

mod settings;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use mingle_core::FriendService;
use mingle_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{Profile, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Mingle social backend")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Which profile of the configuration to run.
  #[arg(short, long, value_enum, env = "MINGLE_ENV", default_value_t = Profile::Development)]
  env: Profile,
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

  // Load configuration.
  let server_cfg = settings::load(&cli.config)
    .context("failed to read configuration")?
    .select(cli.env);
  tracing::info!(profile = ?cli.env, "loaded configuration");

  // Open SQLite store.
  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  std::fs::create_dir_all(&server_cfg.assets_dir).with_context(|| {
    format!("failed to create assets dir {:?}", server_cfg.assets_dir)
  })?;

  let service = Arc::new(FriendService::new(Arc::new(store)));

  let app = mingle_api::api_router(service)
    .nest_service("/assets", ServeDir::new(&server_cfg.assets_dir))
    .layer(CorsLayer::permissive());
  let mut app = mingle_api::with_request_timeout(
    app,
    Duration::from_secs(server_cfg.request_timeout_secs),
  );
  if server_cfg.request_log {
    app = app.layer(TraceLayer::new_for_http());
  }

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
