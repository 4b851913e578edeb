//! Process-wide log subscriber.
//!
//! Records go to stderr through `tracing_subscriber::fmt`, filtered by
//! `RUST_LOG`. Passing `true` to [`init_tracing`] also exports spans through
//! OpenTelemetry to stdout; call [`shutdown_tracing`] before exit to flush them.
//!
//! ```no_run
//! parley_observe::tracing_setup::init_tracing(false).unwrap();
//! tracing::info!(stage = parley_observe::stages::INIT_SUCCESS, "ready");
//! parley_observe::tracing_setup::shutdown_tracing();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,parley=debug,tower_http=info";

/// Instrumentation scope reported on exported spans.
const TRACER_NAME: &str = "parley";

/// Set once by [`init_tracing`] when span export is on.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// `RUST_LOG` if it parses, [`DEFAULT_FILTER`] otherwise.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Fails when a global subscriber is already set.
pub fn init_tracing(export_spans: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let otel_layer = export_spans
        .then(|| tracing_opentelemetry::layer().with_tracer(span_provider().tracer(TRACER_NAME)));

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;
    Ok(())
}

/// Build the stdout span provider and register it globally.
fn span_provider() -> SdkTracerProvider {
    let provider = TRACER_PROVIDER
        .get_or_init(|| {
            SdkTracerProvider::builder()
                .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
                .build()
        })
        .clone();
    opentelemetry::global::set_tracer_provider(provider.clone());
    provider
}

/// Flush exported spans. Does nothing when export was never enabled.
pub fn shutdown_tracing() {
    let Some(provider) = TRACER_PROVIDER.get() else {
        return;
    };
    // The subscriber may already be gone, so report on stderr directly.
    if let Err(e) = provider.shutdown() {
        eprintln!("span exporter shutdown failed: {e}");
    }
}
