use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const VERBOSE_DIRECTIVES: &str = "fxconv=debug,tower_http=debug";

/// Picks the log filter. `RUST_LOG` wins when it parses; otherwise `verbose`
/// turns on debug output for this crate and the HTTP layer, and everything
/// else stays off.
pub fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let fallback = if verbose { VERBOSE_DIRECTIVES } else { "off" };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Logs go to stderr so stdout carries only the conversion JSON.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(build_filter(verbose, rust_log.as_deref()))
        .init();
}
