use tinderbox_domain::{LoggingConfig, SweepReport, TinderboxError};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.level`. Calling this twice is harmless; the
/// second call keeps the first subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(false)).try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };

    if installed.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Stable label for an error, suitable for log fields.
#[inline]
pub fn error_label(error: &TinderboxError) -> &'static str {
    error.label()
}

/// Log the outcome of a popularity sweep with structured fields.
#[inline]
pub fn log_sweep_outcome(trigger: &str, report: &SweepReport) {
    if report.failed.is_empty() {
        info!(trigger, eligible = report.eligible, notified = report.notified_count(), "sweep_complete");
    } else {
        warn!(
            trigger,
            eligible = report.eligible,
            notified = report.notified_count(),
            failed = ?report.failed,
            "sweep_partial_failure"
        );
    }
}
