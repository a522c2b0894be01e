//! CLI definition and dispatch.
//!
//! Every mutating subcommand loads the tracked set, applies one change, and
//! saves it back; read-only subcommands fall back to an empty portfolio when
//! the store cannot be read.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::adapters::csv_import;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::quote_stub::WebQuoteStub;
use crate::adapters::sqlite_store::SqliteStore;
use crate::domain::error::StockmanError;
use crate::domain::portfolio::Portfolio;
use crate::domain::report::StockReport;
use crate::ports::quote_port::QuotePort;
use crate::ports::store_port::StorePort;

const DEFAULT_DB_PATH: &str = "stocks.db";

#[derive(Parser, Debug)]
#[command(name = "stockman", about = "Personal stock portfolio tracker")]
pub struct Cli {
    /// INI config file with a [store] section
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the store if it does not exist
    Init,
    /// Start tracking a new stock
    Add {
        symbol: String,
        /// Company name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Shares already held
        #[arg(short, long, default_value_t = 0.0)]
        shares: f64,
    },
    /// Buy shares of a tracked stock
    Buy { symbol: String, quantity: f64 },
    /// Sell shares of a tracked stock
    Sell { symbol: String, quantity: f64 },
    /// Stop tracking a stock, dropping its history
    Delete { symbol: String },
    /// List tracked stocks
    List,
    /// Record one day of closing price and volume (date is YYYY-MM-DD)
    AddData {
        symbol: String,
        date: String,
        close: f64,
        volume: f64,
    },
    /// Show the price/volume history of a stock
    History { symbol: String },
    /// Show a summary report for one stock, or for all
    Report { symbol: Option<String> },
    /// Import daily history from a quote CSV export
    Import { symbol: String, file: PathBuf },
    /// Retrieve daily history from the web
    Fetch {
        symbol: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match cli.config {
        Some(ref path) => match load_config(path) {
            Ok(c) => Some(c),
            Err(code) => return code,
        },
        None => None,
    };

    let store = match build_store(config.as_ref(), cli.db.as_deref()) {
        Ok(s) => s,
        Err(code) => return code,
    };

    // Create-if-absent: safe to run before every command.
    if let Err(e) = store.initialize() {
        eprintln!("error: {e}");
        return (&e).into();
    }

    match cli.command {
        Command::Init => {
            eprintln!("Store ready");
            ExitCode::SUCCESS
        }
        Command::Add {
            symbol,
            name,
            shares,
        } => run_add(&store, &symbol, &name, shares),
        Command::Buy { symbol, quantity } => run_buy(&store, &symbol, quantity),
        Command::Sell { symbol, quantity } => run_sell(&store, &symbol, quantity),
        Command::Delete { symbol } => run_delete(&store, &symbol),
        Command::List => run_list(&store),
        Command::AddData {
            symbol,
            date,
            close,
            volume,
        } => run_add_data(&store, &symbol, &date, close, volume),
        Command::History { symbol } => run_history(&store, &symbol),
        Command::Report { symbol } => run_report(&store, symbol.as_deref()),
        Command::Import { symbol, file } => run_import(&store, &symbol, &file),
        Command::Fetch { symbol, from, to } => {
            let quote = match config.as_ref() {
                Some(c) => WebQuoteStub::from_config(c),
                None => WebQuoteStub::new(),
            };
            run_fetch(&store, &quote, &symbol, &from, &to)
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StockmanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_store(
    config: Option<&FileConfigAdapter>,
    db_override: Option<&Path>,
) -> Result<SqliteStore, ExitCode> {
    let result = match (db_override, config) {
        (Some(path), _) => SqliteStore::open(path),
        (None, Some(config)) => SqliteStore::from_config(config),
        (None, None) => SqliteStore::open(DEFAULT_DB_PATH),
    };

    result.map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

pub fn parse_date(input: &str) -> Result<NaiveDate, StockmanError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| StockmanError::Validation {
        reason: format!("invalid date {input:?} (expected YYYY-MM-DD)"),
    })
}

/// Load for a mutating command: an unreadable store aborts rather than
/// risking an empty overwrite.
fn load_for_update(store: &dyn StorePort) -> Result<Portfolio, StockmanError> {
    let mut portfolio = Portfolio::new();
    portfolio.load_from(store)?;
    Ok(portfolio)
}

/// Load for a read-only command: an unreadable store renders as empty.
fn load_or_empty(store: &dyn StorePort) -> Portfolio {
    let mut portfolio = Portfolio::new();
    if let Err(e) = portfolio.load_from(store) {
        eprintln!("warning: continuing with an empty portfolio ({e})");
    }
    portfolio
}

fn mutate(
    store: &dyn StorePort,
    apply: impl FnOnce(&mut Portfolio) -> Result<String, StockmanError>,
) -> ExitCode {
    let outcome = load_for_update(store).and_then(|mut portfolio| {
        let message = apply(&mut portfolio)?;
        portfolio.save_to(store)?;
        Ok(message)
    });

    match outcome {
        Ok(message) => {
            eprintln!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_add(store: &dyn StorePort, symbol: &str, name: &str, shares: f64) -> ExitCode {
    mutate(store, |portfolio| {
        let stock = portfolio.add_stock(symbol, name, shares)?;
        Ok(format!("Added {} ({} shares)", stock.symbol, stock.shares))
    })
}

pub fn run_buy(store: &dyn StorePort, symbol: &str, quantity: f64) -> ExitCode {
    mutate(store, |portfolio| {
        let held = portfolio.buy(symbol, quantity)?;
        Ok(format!("Bought {quantity} shares; now {held} held"))
    })
}

pub fn run_sell(store: &dyn StorePort, symbol: &str, quantity: f64) -> ExitCode {
    mutate(store, |portfolio| {
        let held = portfolio.sell(symbol, quantity)?;
        Ok(format!("Sold {quantity} shares; now {held} held"))
    })
}

pub fn run_delete(store: &dyn StorePort, symbol: &str) -> ExitCode {
    mutate(store, |portfolio| {
        let removed = portfolio.delete_stock(symbol)?;
        Ok(format!(
            "Deleted {} ({} observations dropped)",
            removed.symbol,
            removed.data.len()
        ))
    })
}

pub fn run_add_data(
    store: &dyn StorePort,
    symbol: &str,
    date: &str,
    close: f64,
    volume: f64,
) -> ExitCode {
    let date = match parse_date(date) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    mutate(store, |portfolio| {
        portfolio.add_daily_data(symbol, date, close, volume)?;
        Ok(format!("Recorded {date} for {}", symbol.trim().to_uppercase()))
    })
}

pub fn run_import(store: &dyn StorePort, symbol: &str, file: &Path) -> ExitCode {
    let entries = match csv_import::read_history(file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    mutate(store, |portfolio| {
        let merged = portfolio.merge_daily(symbol, entries)?;
        Ok(format!(
            "Imported {merged} rows into {}",
            symbol.trim().to_uppercase()
        ))
    })
}

pub fn run_fetch(
    store: &dyn StorePort,
    quote: &dyn QuotePort,
    symbol: &str,
    from: &str,
    to: &str,
) -> ExitCode {
    let range = parse_date(from).and_then(|f| parse_date(to).map(|t| (f, t)));
    let (from, to) = match range {
        Ok(range) => range,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    mutate(store, |portfolio| {
        // Resolve the symbol before going to the network.
        let symbol = portfolio.stock(symbol)?.symbol.clone();
        let entries = quote.fetch_daily(&symbol, from, to)?;
        let merged = portfolio.merge_daily(&symbol, entries)?;
        Ok(format!("Retrieved {merged} rows for {symbol}"))
    })
}

pub fn run_list(store: &dyn StorePort) -> ExitCode {
    let portfolio = load_or_empty(store);

    if portfolio.is_empty() {
        eprintln!("No stocks currently tracked");
        return ExitCode::SUCCESS;
    }

    for stock in portfolio.stocks() {
        println!(
            "{} - {} - {} shares - {} observations",
            stock.symbol,
            stock.name,
            stock.shares,
            stock.data.len()
        );
    }
    eprintln!("{} stocks tracked", portfolio.len());
    ExitCode::SUCCESS
}

pub fn run_history(store: &dyn StorePort, symbol: &str) -> ExitCode {
    let portfolio = load_or_empty(store);

    let stock = match portfolio.stock(symbol) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if stock.data.is_empty() {
        eprintln!("No data for {}", stock.symbol);
        return ExitCode::SUCCESS;
    }

    println!("- Date -   - Price -   - Volume -");
    for d in &stock.data {
        match d.entered {
            Some(entered) => println!(
                "{}   ${:.2}   {:.0}   (entered {})",
                d.date,
                d.close,
                d.volume,
                entered.format("%Y-%m-%d %H:%M:%S")
            ),
            None => println!("{}   ${:.2}   {:.0}", d.date, d.close, d.volume),
        }
    }
    ExitCode::SUCCESS
}

pub fn run_report(store: &dyn StorePort, symbol: Option<&str>) -> ExitCode {
    let portfolio = load_or_empty(store);

    match symbol {
        Some(symbol) => match portfolio.report(symbol) {
            Ok(report) => {
                println!("{report}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                (&e).into()
            }
        },
        None => {
            if portfolio.is_empty() {
                eprintln!("No stocks currently tracked");
                return ExitCode::SUCCESS;
            }
            for stock in portfolio.stocks() {
                println!("{}", StockReport::for_stock(stock));
                println!();
            }
            ExitCode::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        let date = parse_date("2024-01-02").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        for input in ["01/02/24", "2024-13-01", "yesterday", ""] {
            let err = parse_date(input).unwrap_err();
            assert!(matches!(err, StockmanError::Validation { .. }), "{input}");
        }
    }

    #[test]
    fn cli_parses_add_command() {
        let cli = Cli::parse_from([
            "stockman", "add", "aapl", "--name", "Apple", "--shares", "10",
        ]);
        match cli.command {
            Command::Add {
                symbol,
                name,
                shares,
            } => {
                assert_eq!(symbol, "aapl");
                assert_eq!(name, "Apple");
                assert!((shares - 10.0).abs() < f64::EPSILON);
            }
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_global_db_flag_after_subcommand() {
        let cli = Cli::parse_from(["stockman", "list", "--db", "/tmp/x.db"]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }

    #[test]
    fn cli_parses_fetch_range() {
        let cli = Cli::parse_from([
            "stockman",
            "fetch",
            "AAPL",
            "--from",
            "2024-01-01",
            "--to",
            "2024-02-01",
        ]);
        match cli.command {
            Command::Fetch { symbol, from, to } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(from, "2024-01-01");
                assert_eq!(to, "2024-02-01");
            }
            other => panic!("expected Fetch, got {other:?}"),
        }
    }
}
