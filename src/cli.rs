//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::binance_quote::BinanceQuoteAdapter;
use crate::adapters::csv_export;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sqlite_store::SqliteStore;
use crate::domain::error::TradelogError;
use crate::domain::overview::{total_known, value_balances};
use crate::domain::resolver::resolve;
use crate::domain::trade::{ResolvedTrade, TradeInput};
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::QuotePort;
use crate::ports::trade_store_port::TradeStorePort;

const DEFAULT_COMMISSION_PCT: f64 = 0.1;
const DEFAULT_QUOTE_ASSET: &str = "USDT";

#[derive(Parser, Debug)]
#[command(name = "tradelog", about = "Manual trade journal with PNL/ROI resolution")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a trade, deriving the missing fields
    Add {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        pair: String,
        #[arg(long)]
        qty: f64,
        #[arg(long, default_value_t = 1)]
        leverage: u32,
        #[arg(long)]
        entry_price: Option<f64>,
        #[arg(long)]
        entry_value: Option<f64>,
        #[arg(long)]
        exit_price: Option<f64>,
        #[arg(long)]
        exit_value: Option<f64>,
        /// Overrides [trade] default_commission_pct from the config
        #[arg(long)]
        commission_pct: Option<f64>,
        /// Solve the exit side for this return (percent)
        #[arg(long)]
        target_roi: Option<f64>,
        /// Solve the exit side for this profit (absolute)
        #[arg(long)]
        target_pnl: Option<f64>,
        /// Resolve and print without persisting
        #[arg(long)]
        dry_run: bool,
    },
    /// List recorded trades in insertion order
    List {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Export the journal to a CSV file
    Export {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show exchange balances valued via the quote source
    Balances {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Add {
            config,
            pair,
            qty,
            leverage,
            entry_price,
            entry_value,
            exit_price,
            exit_value,
            commission_pct,
            target_roi,
            target_pnl,
            dry_run,
        } => {
            let input_flags = AddFlags {
                pair,
                qty,
                leverage,
                entry_price,
                entry_value,
                exit_price,
                exit_value,
                commission_pct,
                target_roi,
                target_pnl,
            };
            run_add(&config, input_flags, dry_run)
        }
        Command::List { config } => run_list(&config),
        Command::Export { config, output } => run_export(&config, &output),
        Command::Balances { config } => run_balances(&config),
    }
}

/// The trade-shaped subset of the `add` flags.
#[derive(Debug, Clone)]
pub struct AddFlags {
    pub pair: String,
    pub qty: f64,
    pub leverage: u32,
    pub entry_price: Option<f64>,
    pub entry_value: Option<f64>,
    pub exit_price: Option<f64>,
    pub exit_value: Option<f64>,
    pub commission_pct: Option<f64>,
    pub target_roi: Option<f64>,
    pub target_pnl: Option<f64>,
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TradelogError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn open_store(config: &dyn ConfigPort) -> Result<SqliteStore, TradelogError> {
    let store = SqliteStore::from_config(config)?;
    store.initialize_schema()?;
    Ok(store)
}

/// Assemble a `TradeInput` from the `add` flags, filling the commission
/// default from config and stamping the timestamp. The resolver itself
/// never touches the clock.
pub fn build_trade_input(flags: &AddFlags, config: &dyn ConfigPort, timestamp: String) -> TradeInput {
    let commission_pct = flags.commission_pct.unwrap_or_else(|| {
        config.get_double("trade", "default_commission_pct", DEFAULT_COMMISSION_PCT)
    });

    TradeInput {
        timestamp,
        pair: flags.pair.to_uppercase(),
        leverage: flags.leverage,
        qty: flags.qty,
        entry_price: flags.entry_price,
        entry_value: flags.entry_value,
        exit_price: flags.exit_price,
        exit_value: flags.exit_value,
        commission_pct,
        target_roi: flags.target_roi,
        target_pnl: flags.target_pnl,
    }
}

fn print_trade(id: Option<i64>, trade: &ResolvedTrade) {
    let id_col = match id {
        Some(id) => format!("#{id}"),
        None => "-".to_string(),
    };
    println!(
        "{} {} {} x{} qty {} | entry {:.8} (value {:.4}) exit {:.8} (value {:.4}) | fee {:.4} pnl {:+.4} roi {:+.2}%",
        id_col,
        trade.timestamp,
        trade.pair,
        trade.leverage,
        trade.qty,
        trade.entry_price,
        trade.entry_value,
        trade.exit_price,
        trade.exit_value,
        trade.commission,
        trade.pnl,
        trade.roi,
    );
}

fn run_add(config_path: &PathBuf, flags: AddFlags, dry_run: bool) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let input = build_trade_input(&flags, &config, timestamp);

    let trade = match resolve(&input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if dry_run {
        print_trade(None, &trade);
        eprintln!("Dry run: trade not persisted");
        return ExitCode::SUCCESS;
    }

    let store = match open_store(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match store.insert(&trade) {
        Ok(id) => {
            print_trade(Some(id), &trade);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let store = match open_store(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let trades = match store.load_all() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if trades.is_empty() {
        eprintln!("No trades recorded");
        return ExitCode::SUCCESS;
    }

    let mut total_pnl = 0.0;
    for stored in &trades {
        print_trade(Some(stored.id), &stored.trade);
        total_pnl += stored.trade.pnl;
    }
    eprintln!("{} trades, total pnl {:+.4}", trades.len(), total_pnl);

    ExitCode::SUCCESS
}

fn run_export(config_path: &PathBuf, output: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let store = match open_store(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let trades = match store.load_all() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Err(e) = csv_export::write_journal(output, &trades) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Exported {} trades to {}", trades.len(), output.display());
    ExitCode::SUCCESS
}

fn run_balances(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let quotes = match BinanceQuoteAdapter::from_config(&config) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // A balances failure is fatal here; a single price lookup failing is not.
    let balances = match quotes.get_balances() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if balances.is_empty() {
        eprintln!("No non-zero balances");
        return ExitCode::SUCCESS;
    }

    let quote_asset = config
        .get_string("quote", "quote_asset")
        .unwrap_or_else(|| DEFAULT_QUOTE_ASSET.to_string());

    let valued = value_balances(&quotes, &balances, &quote_asset);

    for balance in &valued {
        let value_col = match balance.value {
            Some(v) => format!("{v:.2} {quote_asset}"),
            None => "?".to_string(),
        };
        println!(
            "{:<8} free {:<16} locked {:<16} value {}",
            balance.asset, balance.free, balance.locked, value_col
        );
    }

    eprintln!(
        "Total over known values: {:.2} {}",
        total_known(&valued),
        quote_asset
    );

    ExitCode::SUCCESS
}
