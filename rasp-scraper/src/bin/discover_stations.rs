//! Enumerate every station reachable through the autocomplete endpoint and
//! print them grouped by country.

use rasp_scraper::settings;
use rasp_scraper::sink::write_json;
use rasp_scraper::stations::{Alphabet, StationClient, StationClientConfig, discover_stations};
use tracing::{error, info};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StationClientConfig::new()
        .with_base_url(settings::base_url())
        .with_max_depth(settings::parse_var("RASP_MAX_DEPTH"));
    if let Some(secs) = settings::timeout_secs() {
        config = config.with_timeout(secs);
    }

    let client = StationClient::new(&config)?;
    let alphabet = Alphabet::default();

    info!(base_url = %config.base_url, letters = alphabet.len(), "discovering stations");
    let groups = discover_stations(&client, &alphabet, config.max_depth).await?;

    write_json(&groups, settings::output_path().as_deref())?;
    Ok(())
}

#[tokio::main]
async fn main() {
    settings::init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "station discovery failed");
        std::process::exit(1);
    }
}
