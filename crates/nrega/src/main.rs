mod cli;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use nrega_spider::config::Config;
use nrega_spider::{schedule, welfare};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preprocess the trace level, and open the .env file
fn preprocess(trace_level: Level) {
    dotenv::dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // set the trace level; INFO keeps the per-cycle status lines visible
    preprocess(match cli.trace {
        Some(TraceLevel::DEBUG) => Level::DEBUG,
        Some(TraceLevel::ERROR) => Level::ERROR,
        Some(TraceLevel::TRACE) => Level::TRACE,
        Some(TraceLevel::WARN) => Level::WARN,
        Some(TraceLevel::INFO) | None => Level::INFO,
    });
    trace!("command line input recorded: {cli:?}");

    let config = Config::from_env()?;

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `nrega sync`: run one fetch-and-load cycle, then exit
        Sync => welfare::data_gov::scrape(&config).await?,

        // `nrega watch`: run a cycle now, then once per interval, forever
        Watch => {
            let interval = config.interval;
            schedule::run(interval, move || {
                let config = config.clone();
                async move { welfare::data_gov::scrape(&config).await }
            })
            .await;
        }
    }

    Ok(())
}
