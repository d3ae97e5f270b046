use super::sql;
use crate::config::Config;
use crate::http::*;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tokio_postgres::types::ToSql;
use tokio_postgres::NoTls;
use tracing::{debug, error, info, trace, warn};

// one page per cycle, RESOURCE?api-key=KEY&format=json&limit=50
//
// resource = `https://api.data.gov.in/resource/ee03643a-ee4c-48c2-ac30-9f2ff26ab722`

/// How long one cycle will wait on a database connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long one cycle will wait on the bulk insert.
const STATEMENT_TIMEOUT: Duration = Duration::from_secs(30);

/////////////////////////////////////////////////////////////////////////////////
// core
/////////////////////////////////////////////////////////////////////////////////

/// Run one fetch-and-load cycle: GET a page of records from data.gov.in,
/// reshape them, and bulk insert into `mgnrega_data`.
///
/// A non-200 response or a database failure ends the cycle with an error log
/// and nothing propagates; the database is never contacted unless the fetch
/// produced records. A malformed payload is the one error returned to the
/// caller.
pub async fn scrape(config: &Config) -> anyhow::Result<()> {
    let time = std::time::Instant::now();
    let http_client = crate::std_client_build();

    trace!("fetching MGNREGA district statistics ...");
    let records = match fetch(&http_client, config).await? {
        FetchOutcome::Failed(status) => {
            error!("data.gov.in request failed, status({status})");
            return Ok(());
        }
        FetchOutcome::Records(records) => records,
    };

    if records.is_empty() {
        warn!("data.gov.in returned no records");
        return Ok(());
    }
    debug!(
        "fetched {} records {}",
        records.len(),
        crate::time_elapsed(time)
    );

    match insert(config, &records).await {
        Ok(()) => info!(
            "inserted {} rows into mgnrega_data {}",
            records.len(),
            crate::time_elapsed(time)
        ),
        Err(err) => error!("database error: {err}"),
    }

    Ok(())
}

/////////////////////////////////////////////////////////////////////////////////
// http
/////////////////////////////////////////////////////////////////////////////////

/// What one GET against the resource produced.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Status 200; the payload's records, possibly empty.
    Records(Vec<WelfareRecord>),
    /// Any non-200 status; the body is not read.
    Failed(StatusCode),
}

/// GET one page of records, `limit` at most; anything past that is never
/// fetched.
pub async fn fetch(http_client: &HttpClient, config: &Config) -> anyhow::Result<FetchOutcome> {
    let limit = config.limit.to_string();
    let response = http_client
        .get(&config.api_url)
        .query(&[
            ("api-key", config.api_key.as_str()),
            ("format", "json"),
            ("limit", limit.as_str()),
        ])
        .send()
        .await
        .map_err(|err| {
            error!("failed to fetch data.gov.in records");
            err
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Ok(FetchOutcome::Failed(status));
    }

    let payload: Payload = response.json().await.map_err(|err| {
        error!("failed to deserialize data.gov.in payload");
        err
    })?;

    Ok(FetchOutcome::Records(payload.records))
}

// -- DESERIALIZATION --

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    records: Vec<WelfareRecord>,
}

/// One district/month statistic, exactly as the API returned it; a missing
/// field stays null all the way into the table.
#[derive(Debug, Deserialize)]
pub struct WelfareRecord {
    pub state_name: Option<String>,
    pub district_name: Option<String>,
    pub month_year: Option<String>,
    pub jobcards_issued: Option<String>,
    pub households_worked: Option<String>,
    pub total_persondays: Option<String>,
    pub total_wages_paid: Option<String>,
}

impl WelfareRecord {
    /// Column-ordered parameters for [`sql::bulk_insert`].
    fn params(&self) -> [&(dyn ToSql + Sync); sql::COLUMNS] {
        [
            &self.state_name,
            &self.district_name,
            &self.month_year,
            &self.jobcards_issued,
            &self.households_worked,
            &self.total_persondays,
            &self.total_wages_paid,
        ]
    }
}

/////////////////////////////////////////////////////////////////////////////////
// postgres
/////////////////////////////////////////////////////////////////////////////////

/// Failure inside the database boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not connect to nregadump: {0}")]
    Connect(#[source] tokio_postgres::Error),

    #[error("bulk insert failed: {0}")]
    Insert(#[source] tokio_postgres::Error),

    #[error("database interaction timed out after {0:?}")]
    Timeout(Duration),
}

/// Open one connection, insert every row in one statement, commit, release.
///
/// The connection lives only as long as this call; an uncommitted transaction
/// rolls back when dropped, and the spawned connection driver exits once the
/// client is gone, on every exit path.
async fn insert(config: &Config, records: &[WelfareRecord]) -> Result<(), StoreError> {
    let (mut pg_client, pg_conn) = tokio::time::timeout(
        CONNECT_TIMEOUT,
        tokio_postgres::connect(&config.db_url, NoTls),
    )
    .await
    .map_err(|_| StoreError::Timeout(CONNECT_TIMEOUT))?
    .map_err(StoreError::Connect)?;

    tokio::spawn(async move {
        if let Err(err) = pg_conn.await {
            error!("nregadump connection error: {err}");
        }
    });
    trace!("nregadump connection established");

    let stmt = sql::bulk_insert(records.len());
    let params: Vec<&(dyn ToSql + Sync)> = records.iter().flat_map(|row| row.params()).collect();

    let transaction = pg_client.transaction().await.map_err(StoreError::Insert)?;
    let inserted = tokio::time::timeout(
        STATEMENT_TIMEOUT,
        transaction.execute(stmt.as_str(), &params),
    )
    .await
    .map_err(|_| StoreError::Timeout(STATEMENT_TIMEOUT))?
    .map_err(StoreError::Insert)?;
    transaction.commit().await.map_err(StoreError::Insert)?;

    trace!("committed {inserted} welfare rows");
    Ok(())
}
