//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on the trace resource.
pub const SERVICE_NAME: &str = "jobboard";

/// File name of the trace output inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "jobboard-otlp.json";

/// Installs the global subscriber: `EnvFilter` at `config.trace_level`
/// (default `"info"`) feeding an OpenTelemetry layer that writes to
/// `<data dir>/jobboard-otlp.json`.
///
/// Observability is optional. If the data directory cannot be created the
/// plugin runs without tracing; a second call is a no-op.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
