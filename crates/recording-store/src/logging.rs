use crate::config::LogFormat;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "recording_store=info,recording_store_core=info,tower_http=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub(crate) fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
