use nrega_spider::schedule;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::test(start_paused = true)]
async fn first_cycle_runs_immediately() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    let scheduler = tokio::spawn(schedule::run(DAY, move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), anyhow::Error>(())
        }
    }));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    scheduler.abort();
}

#[tokio::test(start_paused = true)]
async fn cycles_wait_out_the_full_interval() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    let scheduler = tokio::spawn(schedule::run(DAY, move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), anyhow::Error>(())
        }
    }));

    // an hour in, the startup cycle is still the only one
    tokio::time::sleep(Duration::from_secs(60 * 60)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    // a day later the second cycle has run
    tokio::time::sleep(DAY).await;
    assert!(runs.load(Ordering::SeqCst) >= 2);

    scheduler.abort();
}

#[tokio::test(start_paused = true)]
async fn failed_cycles_do_not_stop_the_loop() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    let scheduler = tokio::spawn(schedule::run(DAY, move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("boom"))
        }
    }));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    // the failure was logged and skipped; the next day's cycle still fires
    tokio::time::sleep(DAY).await;
    assert!(runs.load(Ordering::SeqCst) >= 2);

    scheduler.abort();
}
