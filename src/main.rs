mod api;
mod error;
mod format;
mod network;
mod profit;
mod report;

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::api::{NodeClient, PriceClient, PriceQuote};
use crate::network::WindowConfig;
use crate::profit::MinerProfile;
use crate::report::{CalcReport, StatsView};

#[derive(Parser, Debug)]
#[command(author, version, about = "XELIS mining profitability calculator", long_about = None)]
struct Cli {
    /// Node JSON-RPC endpoint
    #[arg(long, env = "XELIS_NODE_RPC", default_value = "https://us-node.xelis.io/json_rpc")]
    node_rpc: String,

    /// Spot price endpoint (coingecko simple/price)
    #[arg(
        long,
        env = "XELIS_PRICE_API",
        default_value = "https://api.coingecko.com/api/v3/simple/price?vs_currencies=usd&ids=xelis"
    )]
    price_api: String,

    /// Coin id looked up in the price response
    #[arg(long, env = "XELIS_COIN_ID", default_value = "xelis")]
    coin_id: String,

    /// Blocks per range request
    #[arg(long, env = "BATCH_SIZE")]
    batch_size: Option<u64>,

    /// Range requests in flight at once
    #[arg(long, env = "WORKERS")]
    workers: Option<usize>,

    /// Per-request HTTP timeout in seconds (none by default)
    #[arg(long, env = "HTTP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log level (error|warn|info|debug|trace)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate revenue and profit for a rig
    Calc {
        /// Your hashrate in KH/s
        #[arg(long)]
        hashrate: f64,
        /// Power draw in watts
        #[arg(long)]
        power: f64,
        /// Electricity price in USD per kWh
        #[arg(long)]
        electricity: f64,
        /// Use this XEL price instead of fetching a quote
        #[arg(long)]
        price: Option<f64>,
        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Print network statistics for the last 24 hours
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Print the current XEL spot price
    Price {
        /// Print only the number, without the fallback notice
        #[arg(long)]
        raw: bool,
    },
}

impl Cli {
    fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn window(&self) -> WindowConfig {
        WindowConfig::new(self.batch_size, self.workers)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Calc { hashrate, power, electricity, price, json } => {
            let profile = MinerProfile {
                hashrate_khs: *hashrate,
                power_watts: *power,
                electricity_cost_kwh: *electricity,
            };
            cmd_calc(&cli, profile, *price, *json).await?
        }
        Commands::Stats { json } => cmd_stats(&cli, *json).await?,
        Commands::Price { raw } => cmd_price(&cli, *raw).await?,
    }

    Ok(())
}

async fn cmd_calc(cli: &Cli, profile: MinerProfile, price_override: Option<f64>, json: bool) -> anyhow::Result<()> {
    let node = NodeClient::new(&cli.node_rpc, cli.timeout())?;
    let prices = PriceClient::new(&cli.price_api, cli.coin_id.clone(), cli.timeout())?;

    let price_fut = async {
        match price_override {
            Some(usd) => PriceQuote { usd, used_fallback: false },
            None => prices.quote().await,
        }
    };
    let (price, stats) = tokio::join!(price_fut, network::aggregate_24h(&node, cli.window()));
    let stats = stats.with_context(|| format!("collecting 24h stats from {}", node.endpoint()))?;

    tracing::info!(blocks = stats.total_blocks, hashrate = stats.network_hashrate, price = price.usd, "inputs ready");
    let result = profit::estimate(&profile, &stats, price.usd).context("estimating profitability")?;

    let report = CalcReport { price, profile, stats, result };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

async fn cmd_stats(cli: &Cli, json: bool) -> anyhow::Result<()> {
    let node = NodeClient::new(&cli.node_rpc, cli.timeout())?;
    let stats = network::aggregate_24h(&node, cli.window())
        .await
        .with_context(|| format!("collecting 24h stats from {}", node.endpoint()))?;
    if stats.is_degenerate() {
        tracing::warn!(blocks = stats.total_blocks, hashrate = stats.network_hashrate, "stats too thin for an estimate");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", StatsView(&stats));
    }
    Ok(())
}

async fn cmd_price(cli: &Cli, raw: bool) -> anyhow::Result<()> {
    let prices = PriceClient::new(&cli.price_api, cli.coin_id.clone(), cli.timeout())?;
    if raw {
        println!("{}", prices.spot_price_usd().await);
        return Ok(());
    }
    let q = prices.quote().await;
    if q.used_fallback {
        println!("XEL: ${:.4} (fallback, quote unavailable)", q.usd);
    } else {
        println!("XEL: ${:.4}", q.usd);
    }
    Ok(())
}
