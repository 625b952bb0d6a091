pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

use crate::core::cache::RateCache;
use crate::core::config::AppConfig;
use crate::core::request::RawRequest;
use crate::providers::cnb::CnbFeed;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    /// Convert once and print the JSON envelope
    Convert(RawRequest),
    /// Run the HTTP endpoint
    Serve { listen_addr: Option<String> },
    /// Print the current rate table
    List,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("cnb-fx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let cache = RateCache::new(CnbFeed::new(&config.feed_url, &config.base_currency));

    match command {
        AppCommand::Convert(request) => {
            let envelope = cli::convert::run(&cache, &request).await;
            println!("{}", envelope.to_pretty_json()?);
            Ok(())
        }
        AppCommand::Serve { listen_addr } => {
            let listen_addr = listen_addr.as_deref().unwrap_or(&config.listen_addr);
            server::serve(cache, listen_addr).await
        }
        AppCommand::List => cli::list::run(&cache, &config.base_currency).await,
    }
}
