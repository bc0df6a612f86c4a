use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

/// Install the global tracing subscriber for a host embedding this
/// crate standalone. Hosts with their own subscriber should skip this.
///
/// Filter resolution order: `explicit_filter`, then `RUST_LOG`, then
/// `info`.
///
/// # Errors
///
/// Returns an error if no filter candidate parses, if JSON output is
/// requested without the `json-logs` feature, or if a global subscriber
/// is already installed.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let mut candidates = Vec::new();
    if let Some(filter) = explicit_filter {
        candidates.push(filter.to_string());
    }
    if let Ok(env) = std::env::var("RUST_LOG") {
        candidates.push(env);
    }
    candidates.push("info".to_string());

    let filter = candidates
        .into_iter()
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).json());
        return tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()));
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "built without the `json-logs` feature".to_string(),
        ));
    }

    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}
