//! Position Sizing Calculator and Price Alerts (NSE/BSE)
//!
//! Sizes share/contract quantities so the worst-case loss on a trade stays
//! within a risk budget, and pushes price-threshold alerts to Telegram.

mod alerts;
mod api;
mod models;
mod sizing;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::alerts::{AlertWatcher, TelegramNotifier};
use crate::api::QuoteClient;
use crate::models::TradeParameters;
use crate::sizing::{size_position, SizingDefaults, SizingError};

/// Position sizing and price alert CLI.
#[derive(Parser)]
#[command(name = "risksizer")]
#[command(about = "Size positions to a risk budget and watch price alerts", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Sizing defaults file (JSON)
    #[arg(long, default_value = "risksizer.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a position size for a trade
    Size {
        /// Instrument symbol (required with --live)
        #[arg(short, long)]
        symbol: Option<String>,

        /// Entry price per share/contract
        #[arg(short, long)]
        entry: Option<f64>,

        /// Total trading capital
        #[arg(short, long)]
        capital: Option<f64>,

        /// Risk per trade as a percentage of capital
        #[arg(short, long)]
        risk: Option<f64>,

        /// Stop loss as a percentage of entry price
        #[arg(long)]
        stop_loss: Option<f64>,

        /// Size in whole futures lots instead of cash shares
        #[arg(long)]
        futures: bool,

        /// Futures lot size (fetched with --live when omitted)
        #[arg(long)]
        lot_size: Option<u32>,

        /// Fetch entry price and lot size from the quote API
        #[arg(long)]
        live: bool,
    },

    /// Evaluate alert rules once
    Check {
        /// Alert rules file (JSON)
        #[arg(short, long, default_value = "alerts.json")]
        rules: PathBuf,

        /// Send triggered alerts to Telegram instead of only printing
        #[arg(long)]
        notify: bool,
    },

    /// Evaluate alert rules repeatedly until Ctrl+C
    Watch {
        /// Alert rules file (JSON)
        #[arg(short, long, default_value = "alerts.json")]
        rules: PathBuf,

        /// Polling interval in seconds
        #[arg(short, long, default_value = "60")]
        interval: u64,

        /// Send triggered alerts to Telegram instead of only printing
        #[arg(long)]
        notify: bool,
    },

    /// Show or update the saved sizing defaults
    Config {
        /// Set the default trading capital
        #[arg(long)]
        capital: Option<f64>,

        /// Set the default risk percentage
        #[arg(long)]
        risk: Option<f64>,

        /// Set the default stop-loss percentage
        #[arg(long)]
        stop_loss: Option<f64>,

        /// Set the default futures lot size
        #[arg(long)]
        lot_size: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Saved defaults are optional; fall back to built-ins when the file is
    // absent.
    let defaults = if cli.config.exists() {
        SizingDefaults::load(&cli.config)?
    } else {
        SizingDefaults::default()
    };

    match cli.command {
        Commands::Size {
            symbol,
            entry,
            capital,
            risk,
            stop_loss,
            futures,
            lot_size,
            live,
        } => {
            let (entry_price, live_lot_size) = if live {
                let symbol = symbol
                    .as_deref()
                    .context("--live requires --symbol")?;
                let client = QuoteClient::from_env()?;
                let quote = client.get_quote(symbol).await?;

                info!(
                    symbol = %quote.symbol,
                    price = %quote.last_price,
                    lot_size = ?quote.lot_size,
                    "Fetched live quote"
                );

                (quote.last_price, quote.lot_size)
            } else {
                let entry = entry.context("--entry is required without --live")?;
                (Decimal::try_from(entry)?, None)
            };

            let capital = match capital {
                Some(c) => Decimal::try_from(c)?,
                None => defaults.capital,
            };
            let risk = match risk {
                Some(r) => Decimal::try_from(r)?,
                None => defaults.risk_percent,
            };
            let stop_loss = match stop_loss {
                Some(s) => Decimal::try_from(s)?,
                None => defaults.stop_loss_percent,
            };
            let lot_size = lot_size
                .or(live_lot_size)
                .unwrap_or(defaults.lot_size);

            let params = if futures {
                TradeParameters::futures(entry_price, capital, risk, stop_loss, lot_size)
            } else {
                TradeParameters::cash(entry_price, capital, risk, stop_loss)
            };

            match size_position(&params) {
                Ok(result) => {
                    println!("\n=== Position Size ===");
                    println!("Mode:             {}", params.mode.as_str());
                    if let Some(lots) = result.lots {
                        println!("Lots:             {} x {}", lots, lot_size);
                        println!("Contracts:        {}", result.quantity);
                    } else {
                        println!("Quantity:         {} shares", result.quantity);
                    }
                    println!("Trade Value:      ₹{:.2}", result.total_trade_value);
                    println!("Stop Loss/Unit:   ₹{:.2}", result.stop_loss_per_unit);
                    println!("Stop Level:       ₹{:.2}", result.stop_loss_price_level);
                    println!("Est. Max Loss:    ₹{:.2}", result.estimated_max_loss);
                    println!("Risk Budget:      ₹{:.2}", result.risk_amount);
                    println!(
                        "Budget Used:      {:.1}%",
                        result.risk_utilization() * Decimal::from(100)
                    );
                }
                Err(SizingError::InsufficientBudget {
                    risk_amount,
                    stop_loss_per_unit,
                }) => {
                    println!("\nRisk budget too small for this trade.");
                    println!(
                        "A budget of ₹{:.2} cannot absorb a ₹{:.2} stop distance on even one {}.",
                        risk_amount,
                        stop_loss_per_unit,
                        if futures { "lot" } else { "share" }
                    );
                    println!("Increase capital or risk %, or tighten the stop loss.");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Check { rules, notify } => {
            let quotes = QuoteClient::from_env()?;
            let notifier = if notify {
                Some(TelegramNotifier::from_env()?)
            } else {
                None
            };

            let watcher = AlertWatcher::from_rule_file(&rules, quotes, notifier)?;
            let outcome = watcher.run_once().await;

            println!("\n=== Alert Check ===");
            println!("{}", outcome);
            for decision in &outcome.triggered {
                println!("  {}", decision.message);
            }
        }

        Commands::Watch {
            rules,
            interval,
            notify,
        } => {
            let quotes = QuoteClient::from_env()?;
            let notifier = if notify {
                Some(TelegramNotifier::from_env()?)
            } else {
                None
            };

            let watcher = AlertWatcher::from_rule_file(&rules, quotes, notifier)?;

            println!("\n=== Alert Watch ===");
            println!("Rules:    {}", watcher.rule_count());
            println!("Interval: {}s", interval);
            println!("Notify:   {}", if notify { "Telegram" } else { "console only" });
            println!("\nPress Ctrl+C to stop.\n");

            watcher.run(interval).await?;
        }

        Commands::Config {
            capital,
            risk,
            stop_loss,
            lot_size,
        } => {
            let mut defaults = defaults;
            let updating =
                capital.is_some() || risk.is_some() || stop_loss.is_some() || lot_size.is_some();

            if let Some(c) = capital {
                defaults.capital = Decimal::try_from(c)?;
            }
            if let Some(r) = risk {
                defaults.risk_percent = Decimal::try_from(r)?;
            }
            if let Some(s) = stop_loss {
                defaults.stop_loss_percent = Decimal::try_from(s)?;
            }
            if let Some(l) = lot_size {
                defaults.lot_size = l;
            }

            if updating {
                defaults.save(&cli.config)?;
                info!(file = %cli.config.display(), "Saved sizing defaults");
            }

            println!("\n=== Sizing Defaults ===");
            println!("File:             {}", cli.config.display());
            println!("Capital:          ₹{:.2}", defaults.capital);
            println!("Risk/Trade:       {}%", defaults.risk_percent);
            println!("Stop Loss:        {}%", defaults.stop_loss_percent);
            println!("Lot Size:         {}", defaults.lot_size);
        }
    }

    Ok(())
}
