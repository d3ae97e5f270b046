use anyhow::Context;
use dotenv::var;
use std::time::Duration;

/// data.gov.in resource holding monthly MGNREGA statistics per district.
const DEFAULT_API_URL: &'static str =
    "https://api.data.gov.in/resource/ee03643a-ee4c-48c2-ac30-9f2ff26ab722";

/// Page size requested from the API; records past this are never fetched.
const DEFAULT_LIMIT: u32 = 50;

/// Gap between scheduled cycles (24 hours).
const DEFAULT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Process configuration, read once at startup and passed down to the
/// scheduler and the collector.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub db_url: String,
    pub limit: u32,
    pub interval: Duration,
}

impl Config {
    /// Build the configuration from the environment (a `.env` file is read if
    /// one was loaded at startup).
    ///
    /// `DATA_GOV_API` and `NREGADUMP_URL` are required; `DATA_GOV_URL` and
    /// `SYNC_INTERVAL_SECS` override the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            api_url: var("DATA_GOV_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: var("DATA_GOV_API").context("environment variable DATA_GOV_API")?,
            db_url: var("NREGADUMP_URL").context("environment variable NREGADUMP_URL")?,
            limit: DEFAULT_LIMIT,
            interval: match var("SYNC_INTERVAL_SECS") {
                Ok(secs) => Duration::from_secs(
                    secs.parse()
                        .context("SYNC_INTERVAL_SECS must be a number of seconds")?,
                ),
                Err(_) => DEFAULT_INTERVAL,
            },
        })
    }
}
