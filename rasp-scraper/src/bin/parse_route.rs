//! Fetch one route results page and print the trains found on it.

use rasp_scraper::route::{AlignmentPolicy, RouteClient, RouteClientConfig, RouteQuery};
use rasp_scraper::settings;
use rasp_scraper::sink::write_json;
use tracing::{error, info};

/// Default query with any `RASP_*` overrides applied.
fn query_from_env() -> RouteQuery {
    let mut query = RouteQuery::default();

    let text_fields = [
        ("RASP_FROM", &mut query.from),
        ("RASP_FROM_EXP", &mut query.from_exp),
        ("RASP_FROM_ESR", &mut query.from_esr),
        ("RASP_TO", &mut query.to),
        ("RASP_TO_EXP", &mut query.to_exp),
        ("RASP_TO_ESR", &mut query.to_esr),
    ];
    for (name, field) in text_fields {
        if let Some(value) = settings::var(name) {
            *field = value;
        }
    }

    if let Some(date) = settings::parse_var("RASP_DATE") {
        query.date = date;
    }

    query
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = RouteClientConfig::new().with_base_url(settings::base_url());
    if let Some(secs) = settings::timeout_secs() {
        config = config.with_timeout(secs);
    }

    let policy = if settings::flag("RASP_STRICT_ALIGNMENT") {
        AlignmentPolicy::FailFast
    } else {
        AlignmentPolicy::Truncate
    };

    let query = query_from_env();
    let client = RouteClient::new(&config)?;

    info!(from = %query.from, to = %query.to, date = %query.date, "fetching route");
    let trains = client.fetch_trains(&query, policy).await?;
    info!(trains = trains.len(), "route parsed");

    write_json(&trains, settings::output_path().as_deref())?;
    Ok(())
}

#[tokio::main]
async fn main() {
    settings::init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "route parsing failed");
        std::process::exit(1);
    }
}
