mod platform;

use std::path::Path;

use anyhow::Context;
use facts_logging::{facts_info, facts_warn};

fn main() -> anyhow::Result<()> {
    let (config, config_error) = match platform::load_config(Path::new(platform::CONFIG_FILENAME))
    {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (platform::AppConfig::default(), Some(err)),
    };

    let level = facts_logging::parse_level(&config.log_level).unwrap_or(log::LevelFilter::Info);
    platform::initialize_logging(config.log_destination, level);
    if let Some(err) = config_error {
        facts_warn!("Using default configuration: {}", err);
    }

    let initial_username = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.default_username.clone());
    facts_info!("Starting statfacts with username {:?}", initial_username);

    platform::run_app(&config, initial_username).context("terminal session failed")
}
