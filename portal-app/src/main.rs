//! Portal mock data layer demo
//!
//! Builds the in-memory stores, walks a short create/search/update/delete
//! scenario against the client store and prints what it saw.
//!
//! Usage:
//!   portal-demo --delay-ms 0
//!   portal-demo --config portal.json --verbose
//!   portal-demo --id-strategy uuid-v7

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use portal_app::{run_demo, Portal, PortalConfig};
use portal_types::IdStrategy;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "portal-demo")]
#[command(about = "Exercise the portal's in-memory entity stores")]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated latency per operation in milliseconds (overrides the config file)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Identifier strategy: time-random or uuid-v7 (overrides the config file)
    #[arg(long)]
    id_strategy: Option<IdStrategy>,

    /// Start with empty stores instead of the bundled fixtures
    #[arg(long)]
    no_seed: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn portal_config(&self) -> Result<PortalConfig> {
        let mut config = match &self.config {
            Some(path) => PortalConfig::load(path)?,
            None => PortalConfig::default(),
        };
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(strategy) = self.id_strategy {
            config.id_strategy = strategy;
        }
        if self.no_seed {
            config.seed = false;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = args.portal_config()?;
    debug!(?config, "Resolved configuration");
    info!("Portal demo starting...");

    let portal = Portal::from_config(&config)?;
    let report = run_demo(&portal).await?;

    println!("\n========================================");
    println!("  Portal Demo");
    println!("========================================");
    println!("  Latency:        {} ms", config.delay_ms);
    println!("  Id strategy:    {}", config.id_strategy);
    println!("  Clients before: {}", report.initial_count);
    println!("  Search \"ali\":   {} hit(s)", report.search_hits.len());
    for client in &report.search_hits {
        println!("    - {} ({})", client.name, client.id);
    }
    println!("  Renamed:        {} ({})", report.renamed.name, report.renamed.id);
    println!("  Deleted:        {}", report.deleted_id);
    println!("  Clients after:  {}", report.final_count);
    println!("  Budgets:        {}", portal.budgets.count().await?);
    println!("  Catalog items:  {}", portal.catalog.count().await?);
    println!("========================================\n");

    Ok(())
}
