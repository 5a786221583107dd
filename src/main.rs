use analyzer::{AnalyticsFacade, TradeAnalytics};
use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use core_types::{InstrumentType, RawTrade, TradeRecord};
use query::TradeFilter;
use std::path::{Path, PathBuf};
use store::MemoryTradeStore;
use uuid::Uuid;

/// The main entry point for the Tradebook application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging; RUST_LOG controls verbosity.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import(args) => handle_import(args).await,
        Commands::Report(args) => handle_report(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A trade journal valuation and analytics engine.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a raw-trade journal and write the valued records.
    Import(ImportArgs),
    /// Compute and print the analytics reports over a record file.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ImportArgs {
    /// Path to a JSON array of raw trades.
    #[arg(long)]
    journal: PathBuf,

    /// The owner (trader) the trades are recorded under.
    #[arg(long)]
    owner: Uuid,

    /// Where to write the validated trade records.
    #[arg(long, default_value = "records.json")]
    out: PathBuf,
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to a validated trade-record file produced by `import`.
    #[arg(long, default_value = "records.json")]
    records: PathBuf,

    /// The owner (trader) to report on.
    #[arg(long)]
    owner: Uuid,

    /// Restrict the reports to one instrument type
    /// (equity, forex, margined-crypto, spot-crypto, option).
    #[arg(long)]
    instrument: Option<String>,

    /// Emit the full report set as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Import Command Logic
// ==============================================================================

/// Validates every raw trade in the journal, reporting each rejection, and
/// writes the valued records for the accepted ones.
async fn handle_import(args: ImportArgs) -> anyhow::Result<()> {
    let raw_trades = load_json::<Vec<RawTrade>>(&args.journal)
        .with_context(|| format!("failed to read journal {}", args.journal.display()))?;

    let now = Utc::now();
    let mut records = Vec::new();
    let mut rejected = 0usize;
    for (index, raw) in raw_trades.iter().enumerate() {
        match instruments::validate_new(args.owner, raw, now) {
            Ok(record) => records.push(record),
            Err(err) => {
                rejected += 1;
                eprintln!("journal entry {index} rejected: {err}");
            }
        }
    }

    let accepted = records.len();
    tracing::info!(accepted, rejected, "journal import finished");
    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    println!(
        "Imported {accepted} trade(s) ({rejected} rejected) -> {}",
        args.out.display()
    );
    Ok(())
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Loads a record file into the in-memory store, runs the analytics facade
/// and renders the merged report set.
async fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let records = load_json::<Vec<TradeRecord>>(&args.records)
        .with_context(|| format!("failed to read records {}", args.records.display()))?;

    let trade_store = MemoryTradeStore::new();
    trade_store.seed(records).await;

    let settings = configuration::load_settings()?;
    let facade = AnalyticsFacade::new(settings.analytics);

    let filter = match &args.instrument {
        Some(tag) => {
            let instrument_type: InstrumentType = tag
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown instrument type '{tag}'"))?;
            TradeFilter::for_instrument(instrument_type)
        }
        None => TradeFilter::default(),
    };

    let report = facade.full_report(&trade_store, args.owner, &filter).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_tables(&report);
    }
    Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn render_tables(report: &TradeAnalytics) {
    println!("\n== Portfolio ==");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    let portfolio = &report.portfolio;
    for (name, value) in [
        ("Trades", portfolio.total_trades.to_string()),
        ("Investment", portfolio.total_investment.to_string()),
        ("Return", portfolio.total_return.to_string()),
        ("Net profit", portfolio.net_profit.to_string()),
        ("Fees", portfolio.total_fees.to_string()),
        ("ROI %", portfolio.roi_pct.to_string()),
        ("Expense ratio", portfolio.expense_ratio.to_string()),
        ("Savings rate %", portfolio.savings_rate_pct.to_string()),
        ("Break-even %", portfolio.break_even_pct.to_string()),
        ("Risk/reward", portfolio.risk_reward_ratio.to_string()),
        ("Win %", portfolio.win_percentage.to_string()),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    println!("{table}");

    println!("\n== Win/Loss by instrument ==");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Instrument", "Trades", "Wins", "Losses", "Win %", "Loss %"]);
    for row in &report.win_loss {
        table.add_row(vec![
            row.instrument_type.to_string(),
            row.total_trades.to_string(),
            row.wins.to_string(),
            row.losses.to_string(),
            row.win_percentage.to_string(),
            row.loss_percentage.to_string(),
        ]);
    }
    println!("{table}");

    println!("\n== Asset summaries ==");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Instrument",
        "Symbol",
        "Outcome",
        "Trades",
        "Total P/L",
        "Avg P/L",
        "Fees",
    ]);
    for row in &report.asset_summaries {
        table.add_row(vec![
            row.instrument_type.to_string(),
            row.symbol.clone(),
            row.outcome.to_string(),
            row.trade_count.to_string(),
            row.total_profit_loss.to_string(),
            row.avg_profit_loss.to_string(),
            row.total_fees.to_string(),
        ]);
    }
    println!("{table}");

    println!("\n== Turnover by weekday ==");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Day",
        "Turnover",
        "Share %",
        "Net P/L",
        "Avg gain %",
    ]);
    for day in &report.weekday_turnover.days {
        table.add_row(vec![
            day.day.clone(),
            day.turnover.to_string(),
            day.turnover_share_pct.to_string(),
            day.net_profit_loss.to_string(),
            day.avg_gain_pct.to_string(),
        ]);
    }
    println!("{table}");

    println!("\n== Best trading time ==");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Day", "P/L", "Performance"]);
    for score in &report.best_trading_time {
        table.add_row(vec![
            score.day.clone(),
            score.profit_loss.to_string(),
            score.performance.to_string(),
        ]);
    }
    println!("{table}");

    println!("\n== Margin analytics ==");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Leverage",
        "Side",
        "Trades",
        "Total P/L",
        "Win %",
        "Notional",
    ]);
    for bucket in &report.margin.buckets {
        table.add_row(vec![
            bucket.bucket.clone(),
            bucket.position_type.to_string(),
            bucket.trade_count.to_string(),
            bucket.total_profit_loss.to_string(),
            bucket.win_rate_pct.to_string(),
            bucket.total_notional.to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "Avg margin utilization: {}",
        report.margin.avg_margin_utilization
    );

    println!("\n== Trade-size distribution ==");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Bucket", "Trades", "Total value", "Avg P/L"]);
    for bucket in &report.size_distribution {
        table.add_row(vec![
            bucket.bucket.label().to_string(),
            bucket.trade_count.to_string(),
            bucket.total_value.to_string(),
            bucket.avg_profit_loss.to_string(),
        ]);
    }
    println!("{table}");

    println!("\n== Monthly performance ==");
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Month",
        "Trades",
        "Win %",
        "Total P/L",
        "Volume",
        "Avg R/R",
    ]);
    for month in &report.monthly_performance {
        table.add_row(vec![
            format!("{}-{:02}", month.year, month.month),
            month.trade_count.to_string(),
            month.win_rate_pct.to_string(),
            month.total_profit_loss.to_string(),
            month.total_volume.to_string(),
            month.avg_risk_reward.to_string(),
        ]);
    }
    println!("{table}");
}
