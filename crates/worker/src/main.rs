use assetdesk_worker::config::WorkerConfig;
use assetdesk_worker::{history, sla_sweep};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// assetdesk background worker.
#[derive(Parser, Debug)]
#[command(name = "assetdesk-worker", version)]
struct Args {
    /// Runs the SLA sweep when omitted.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the periodic SLA breach sweep until ctrl-c.
    Sweep,
    /// Print an asset's change history, newest first.
    History {
        asset_id: i64,
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assetdesk_worker=debug,assetdesk_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env()?;

    let pool = assetdesk_db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    assetdesk_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    if let Some(Command::History { asset_id, limit }) = args.command {
        let entries = history::load_timeline(&pool, asset_id, limit).await?;
        tracing::debug!(asset_id, rows = entries.len(), "Asset history loaded");
        for entry in &entries {
            println!("{}", history::render_line(entry));
        }
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let sweep_handle = tokio::spawn(sla_sweep::run(
        pool,
        config.sweep_interval,
        cancel.clone(),
    ));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    cancel.cancel();
    sweep_handle.await?;

    tracing::info!("Worker stopped");
    Ok(())
}
