pub mod commands;
pub mod source;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "fleur",
    about = "Fleur storefront CLI",
    long_about = "Browse and query the bouquet catalog, price custom bouquets, inspect configuration, and run readiness checks.",
    after_help = "Examples:\n  fleur shop --demo --flower roses --sort price-low\n  fleur price --stem f1=2 --style cascade --size large --vase\n  fleur doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Load a catalog, apply facet filters, and print the ordered listing")]
    Shop(commands::shop::ShopArgs),
    #[command(about = "Price a custom bouquet selection with the tiered discount breakdown")]
    Price(commands::price::PriceArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, reference tables, and catalog source connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Shop(args) => commands::shop::run(&args),
        Command::Price(args) => commands::price::run(&args),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so command output stays machine-readable. A config that
/// fails to load is reported by the command itself, not here.
fn init_logging() {
    use fleur_core::config::{AppConfig, LoadOptions, LogFormat};
    use tracing::Level;

    let Ok(config) = AppConfig::load(LoadOptions::default()) else {
        return;
    };
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}
