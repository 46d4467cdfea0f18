use std::sync::Once;

use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, FmtSubscriber};

use crate::formatter;

static SUBSCRIBER_INIT: Once = Once::new();

/// The default filter for a given number of `-v` flags.
pub fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("warn,{name}={level}", name = env!("CARGO_CRATE_NAME"))
}

/// Configure and initialize logging for the application
///
/// `RUST_LOG` overrides the verbosity. Calling this more than once is harmless; only the first call
/// installs a subscriber.
pub fn setup_logging(verbosity: u8) {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

        let subscriber = FmtSubscriber::builder()
            .with_ansi(true)
            .event_format(formatter::CustomFormatter)
            .with_env_filter(filter)
            .finish()
            .with(ErrorLayer::default());

        if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Could not install the log subscriber: {error}");
        }
    });
}
