use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::Settings;

/// Install the global tracing subscriber for the correction engine. `RUST_LOG`
/// overrides the configured level. The embedding application calls this once
/// at startup; later calls fail because the global subscriber is already set.
pub fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let telemetry = settings.telemetry();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(telemetry.log_level.clone()));

    let builder = fmt().with_env_filter(filter).with_target(false);

    let installed = if telemetry.json {
        builder.json().with_span_events(fmt::format::FmtSpan::CLOSE).try_init()
    } else {
        builder.with_span_events(fmt::format::FmtSpan::CLOSE).try_init()
    };
    installed.map_err(|err| anyhow::anyhow!(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env_lock, test_settings};

    #[tokio::test]
    async fn global_subscriber_installs_once() {
        let _guard = env_lock().await;
        std::env::remove_var("RUST_LOG");

        let settings = test_settings();
        assert!(init_tracing(&settings).is_ok());
        assert!(init_tracing(&settings).is_err());
    }
}
