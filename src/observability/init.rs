//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::domain::error::{Result, UserDeskError};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the OTLP trace file inside the data directory.
const TRACE_FILE: &str = "userdesk-otlp.json";

/// Installs the global tracing subscriber with file-based OTLP export.
///
/// The filter level is `config.trace_level`, or `"info"` when unset. Spans are
/// written to `<data dir>/userdesk-otlp.json`.
///
/// Tracing is optional: if the data directory cannot be created nothing is
/// installed, and calling this more than once keeps the first subscriber.
/// Either case is reported at debug level to whatever subscriber is active.
///
/// # Example
///
/// ```rust,no_run
/// use userdesk::observability::init_tracing;
/// use userdesk::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if let Err(e) = install(config, &data_dir) {
        tracing::debug!(error = %e, "tracing subscriber not installed");
    }
}

fn install(config: &Config, data_dir: &Path) -> Result<()> {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    std::fs::create_dir_all(data_dir)?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "userdesk")]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE), resource);

    let tracer = provider.tracer("userdesk");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init()
        .map_err(|e| UserDeskError::Tracing(e.to_string()))
}
