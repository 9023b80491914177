use clap::Parser;
use finance_tracker::args::{Args, CategorySubcommand, Command};
use finance_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().finance_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::Add(add_args) => {
            commands::add_transaction(Config::load(home)?, add_args.clone())?.print()
        }

        Command::Delete(delete_args) => {
            commands::delete_transaction(Config::load(home)?, delete_args.clone())?.print()
        }

        Command::List(list_args) => {
            commands::list_transactions(Config::load(home)?, list_args.clone())?.print()
        }

        Command::Summary => commands::summary(Config::load(home)?)?.print(),

        Command::Category(category_args) => {
            let config = Config::load(home)?;
            match category_args.command() {
                CategorySubcommand::Add(args) => {
                    commands::add_category(config, args.clone())?.print()
                }
                CategorySubcommand::Delete(args) => {
                    commands::delete_category(config, args.clone())?.print()
                }
                CategorySubcommand::List(args) => {
                    commands::list_categories(config, args.clone())?.print()
                }
            }
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for the binary and library only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
