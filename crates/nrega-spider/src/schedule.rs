use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, trace};

/// Gap between wake-ups of the polling loop; clamped to the interval so short
/// test intervals still tick.
const TICK: Duration = Duration::from_secs(60);

/// Whether enough time has passed since the last completed cycle.
fn due(last_cycle: Option<Instant>, interval: Duration) -> bool {
    match last_cycle {
        None => true,
        Some(at) => at.elapsed() >= interval,
    }
}

/// Run `cycle` once immediately, then once per `interval`, forever.
///
/// A cycle returning `Err` is logged and skipped; the next cycle still runs
/// on schedule. There is no cancellation: the loop ends only with the
/// process.
pub async fn run<F, Fut>(interval: Duration, mut cycle: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    info!("scheduler started, running a cycle every {interval:?}");

    let mut last_cycle: Option<Instant> = None;
    loop {
        if due(last_cycle, interval) {
            if let Err(err) = cycle().await {
                error!("cycle failed: {err:#}");
            }
            last_cycle = Some(Instant::now());
        }

        trace!("scheduler sleeping ...");
        tokio::time::sleep(TICK.min(interval)).await;
    }
}
