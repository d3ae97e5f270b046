pub mod config;
pub mod schedule;
pub mod welfare;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use reqwest::Client as HttpClient;
}

/// Standard HTTP client; the explicit timeout keeps a hung request from
/// stalling every later cycle.
pub(crate) fn std_client_build() -> http::HttpClient {
    reqwest::ClientBuilder::new()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("failed to build reqwest client")
}

/// Elapsed-time suffix for log lines.
pub(crate) fn time_elapsed(start: std::time::Instant) -> String {
    format!("({:.2}s)", start.elapsed().as_secs_f64())
}
