/// Tracing setup. Logs go to stderr so stdout stays clean for results.
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "tastequiz_cli=debug,tastequiz_core=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if let Err(e) = Registry::default().with(env_filter).with(stderr_layer).try_init() {
        eprintln!("Warning: failed to initialize logging: {e}");
    }
}
