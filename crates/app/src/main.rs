//! apiprobe binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use apiprobe::settings::CONFIG_FILE;
use apiprobe::{Harness, Settings, Summary, render};
use apiprobe_stub::{Db, StubServer};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Runs the posts/comments contract against a live or local service.
#[derive(Debug, Parser)]
#[command(name = "apiprobe", version, about)]
struct Cli {
    /// Serve the seed document on a local port and test against it.
    #[arg(long)]
    stub: bool,

    /// Settings file (optional).
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Only run scenarios whose name contains this text.
    #[arg(long)]
    filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    let stub = if cli.stub {
        let db = Db::load(&settings.seed_file)
            .await
            .with_context(|| format!("loading stub seed {}", settings.seed_file.display()))?;
        let server = StubServer::spawn(db, SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        settings = settings.with_base_url(server.base_url());
        Some(server)
    } else {
        None
    };

    let harness = if stub.is_some() {
        Harness::direct(&settings)?
    } else {
        Harness::new(&settings)?
    };

    tracing::info!(
        base_url = %harness.base_url(),
        "apiprobe v{}",
        env!("CARGO_PKG_VERSION")
    );

    let scenarios: Vec<_> = harness
        .scenarios()
        .into_iter()
        .filter(|s| cli.filter.as_deref().is_none_or(|f| s.name.contains(f)))
        .collect();

    let outcomes = harness.run_all(&scenarios).await;
    print!("{}", render(&outcomes));

    if let Some(server) = stub {
        server.shutdown().await;
    }

    Ok(if Summary::of(&outcomes).all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
