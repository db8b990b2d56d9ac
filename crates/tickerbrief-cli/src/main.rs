mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tickerbrief_chart::{MovingAverageKind, PriceHistoryController};
use tickerbrief_client::BriefClient;
use tickerbrief_core::{normalize_symbol, CoreError, HistoryPeriod};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tickerbrief")]
#[command(about = "Per-ticker market sentiment briefs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the sentiment brief for a ticker
    Brief {
        /// Ticker symbol (case-insensitive)
        symbol: String,
    },
    /// Print the raw price history series
    History {
        symbol: String,

        /// Lookback window: 1d, 5d, 1mo, 6mo, 1y or max
        #[arg(long, default_value = "1mo")]
        period: HistoryPeriod,
    },
    /// Load the price chart and summarise its axis and lines
    Chart {
        symbol: String,

        /// Lookback window: 1d, 5d, 1mo, 6mo, 1y or max
        #[arg(long, default_value = "1mo")]
        range: HistoryPeriod,

        /// Moving-average family for the overlay lines
        #[arg(long, value_enum, default_value_t = MaArg::Sma)]
        ma: MaArg,
    },
    /// List trending tickers
    Trending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MaArg {
    Sma,
    Ema,
}

impl From<MaArg> for MovingAverageKind {
    fn from(arg: MaArg) -> Self {
        match arg {
            MaArg::Sma => MovingAverageKind::Sma,
            MaArg::Ema => MovingAverageKind::Ema,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = tickerbrief_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("tickerbrief: run `tickerbrief --help` for available commands");
        return Ok(());
    };

    let client = BriefClient::new(&config.api)?;
    tracing::debug!(base_url = %client.base_url(), "brief client ready");

    match command {
        Commands::Brief { symbol } => run_brief(&client, &symbol).await,
        Commands::History { symbol, period } => run_history(&client, &symbol, period).await,
        Commands::Chart { symbol, range, ma } => run_chart(client, &symbol, range, ma.into()).await,
        Commands::Trending => {
            let tickers = client.fetch_trending_tickers().await;
            print!("{}", render::render_trending(&tickers));
            Ok(())
        }
    }
}

fn parse_symbol(raw: &str) -> Result<String, CoreError> {
    normalize_symbol(raw).ok_or(CoreError::EmptySymbol)
}

async fn run_brief(client: &BriefClient, raw: &str) -> anyhow::Result<()> {
    let symbol = parse_symbol(raw)?;
    match client.fetch_ticker_brief(&symbol).await {
        Ok(brief) => {
            print!("{}", render::render_brief(&brief, chrono::Utc::now()));
            Ok(())
        }
        Err(e) => {
            eprint!("{}", render::render_brief_error(&symbol));
            Err(e).with_context(|| format!("failed to load brief for {symbol}"))
        }
    }
}

async fn run_history(client: &BriefClient, raw: &str, period: HistoryPeriod) -> anyhow::Result<()> {
    let symbol = parse_symbol(raw)?;
    let series = client
        .fetch_ticker_history(&symbol, period)
        .await
        .with_context(|| format!("failed to load {period} history for {symbol}"))?;
    print!("{}", render::render_history(&symbol, period, &series));
    Ok(())
}

/// Drives the chart controller the way the page does: mount on the default
/// range, then apply the requested range and overlay family.
async fn run_chart(
    client: BriefClient,
    raw: &str,
    range: HistoryPeriod,
    ma_kind: MovingAverageKind,
) -> anyhow::Result<()> {
    let symbol = parse_symbol(raw)?;
    let mut controller = PriceHistoryController::new(Arc::new(client), symbol);
    controller.mount();
    controller.select_range(range);
    controller.select_moving_average(ma_kind);
    controller.settle().await;

    print!("{}", render::render_chart(controller.state(), &controller.view()));
    Ok(())
}

#[cfg(test)]
mod tests;
