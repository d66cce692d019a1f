//! Tinderbox - swipe matching backend
//!
//! `tinderbox serve` runs the HTTP API and the hourly popularity sweep.
//! The other subcommands are one-shot maintenance tasks.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tinderbox_api::http::{serve, shutdown_signal};
use tinderbox_api::utils::{init_tracing, log_sweep_outcome};
use tinderbox_api::AppContext;
use tinderbox_core::PersonRepository;
use tinderbox_domain::Config;
use tinderbox_infra::config;
use tinderbox_infra::database::seed_database;
use tinderbox_infra::scheduling::{PopularityScheduler, PopularitySchedulerConfig};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "tinderbox", version, about = "Swipe matching backend")]
struct Cli {
    /// Path to a TOML or JSON config file
    #[arg(long, short, env = "TINDERBOX_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API and the popularity scheduler (default)
    Serve,
    /// Run one popularity sweep and report who was notified
    CheckPopular,
    /// Apply database migrations and exit
    Migrate,
    /// Insert demo users and the seed profile set
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config).context("failed to load configuration")?;
    init_tracing(&config.logging);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(config).await,
        Command::CheckPopular => check_popular(config).await,
        Command::Migrate => migrate(config),
        Command::Seed => seed(config).await,
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let address = config.server.bind_address();
    let ctx = Arc::new(AppContext::new(config).context("failed to build application context")?);

    let mut scheduler = if ctx.config.scheduler.enabled {
        let mut scheduler = PopularityScheduler::with_config(
            PopularitySchedulerConfig::from(&ctx.config.scheduler),
            ctx.notifier.clone(),
        )?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        info!("popularity scheduler disabled");
        None
    };

    let listener =
        TcpListener::bind(&address).await.with_context(|| format!("failed to bind {address}"))?;
    let served = serve(listener, Arc::clone(&ctx), shutdown_signal()).await;

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(err) = scheduler.stop().await {
            error!(error = %err, "failed to stop popularity scheduler");
        }
    }

    served.context("http server failed")
}

#[allow(clippy::print_stdout)]
async fn check_popular(config: Config) -> anyhow::Result<()> {
    let ctx = AppContext::new(config)?;
    let report = ctx.notifier.sweep().await?;
    log_sweep_outcome("cli", &report);

    for id in &report.notified {
        if let Some(person) = ctx.people.find_by_id(*id).await? {
            println!("✓ Notification sent for {} ({} likes)", person.name, person.like_count);
        }
    }
    for id in &report.failed {
        println!("✗ Notification failed for person {id}");
    }

    let noun = if report.eligible == 1 { "person" } else { "people" };
    println!("Checked {} popular {noun}", report.eligible);
    Ok(())
}

fn migrate(config: Config) -> anyhow::Result<()> {
    // Opening the context applies pending migrations.
    let ctx = AppContext::new(config)?;
    info!(db_path = %ctx.db.path().display(), "migrations applied");
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn seed(config: Config) -> anyhow::Result<()> {
    let ctx = AppContext::new(config)?;
    let report = seed_database(ctx.people.as_ref(), ctx.users.as_ref()).await?;
    println!(
        "Seeded {} people and {} users",
        report.people_created, report.users_created
    );
    Ok(())
}
