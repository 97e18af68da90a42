mod api;
mod cli;
mod config;
mod dispatcher;
mod form;
mod message;
mod model;
mod notify;
mod resolver;
mod validation;

use std::{error::Error, path::PathBuf, sync::Arc};

use anyhow::anyhow;
use api::TelegramClient;
use clap::Parser;
use form::{OrderForm, SubmitOutcome};
use log::debug;
use model::DestinationState;
use notify::ConsoleNotifier;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Fill in a design order and send it to the bot")]
    #[command(long_about = None)]
    Order(ConfigArgs),

    #[command(about = "Resolve the chat the orders are sent to")]
    #[command(long_about = None)]
    Resolve(ConfigArgs),
}

#[derive(clap::Args)]
struct ConfigArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::Order(args) => {
            let client = get_client(args.config_path)?;

            let mut form = OrderForm::new(Arc::new(client));

            if cli::run(&mut form, &ConsoleNotifier)? == SubmitOutcome::DeliveryFailed {
                return Err(anyhow!("order was not delivered").into());
            }
        }
        Cli::Resolve(args) => {
            let client = get_client(args.config_path)?;

            match resolver::resolve_destination(&client) {
                DestinationState::Resolved(id) => println!("{}", id),
                DestinationState::Failed(reason) => return Err(anyhow!("{}", reason).into()),
                DestinationState::Unresolved => {
                    return Err(anyhow!("destination is not resolved").into())
                }
            }
        }
    };

    Ok(())
}

fn get_client(config_path: PathBuf) -> anyhow::Result<TelegramClient> {
    debug!("Подгружаем конфиг из {:?}", config_path);
    let cfg = config::load(config_path)?;

    TelegramClient::new(&cfg.api_url, &cfg.bot_token)
}
