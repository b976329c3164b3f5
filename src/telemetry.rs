use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. `logging.format` picks
/// between `json`, `pretty` and compact output. Events go to stderr so CLI
/// output on stdout stays clean.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match settings.format.as_str() {
        "json" => subscriber.json().try_init(),
        "pretty" => subscriber.pretty().try_init(),
        _ => subscriber.compact().try_init(),
    }
}
