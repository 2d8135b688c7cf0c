// Stderr logging for the heart widget.
//
// Strokes log at trace, session and resize bookkeeping at debug, and the
// celebration start at info. `--log` overrides RUST_LOG; without either the
// widget only reports info and above.

use std::sync::Once;

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// env_logger filter, e.g. "heart_scratch::session=trace".
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

static INIT: Once = Once::new();

/// Filter string actually applied: the explicit one, else `rust_log`, else none.
fn resolve_filter(explicit: Option<String>, rust_log: Option<String>) -> Option<String> {
    explicit.or(rust_log).filter(|f| !f.trim().is_empty())
}

/// Install the stderr logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = Builder::new();
        match resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(LevelFilter::Info);
            }
        }
        builder.write_style(config.write_style);
        // tests may race to install their own logger
        if builder.try_init().is_ok() {
            log::debug!("heart widget logging ready");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_rust_log() {
        let got = resolve_filter(Some("heart_scratch=trace".into()), Some("warn".into()));
        assert_eq!(got.as_deref(), Some("heart_scratch=trace"));
    }

    #[test]
    fn rust_log_is_the_fallback() {
        assert_eq!(resolve_filter(None, Some("debug".into())).as_deref(), Some("debug"));
    }

    #[test]
    fn blank_filters_fall_back_to_info() {
        assert_eq!(resolve_filter(Some("  ".into()), None), None);
        assert_eq!(resolve_filter(None, None), None);
    }

    #[test]
    fn second_init_is_ignored() {
        init_logging(LoggingConfig { env_filter: Some("debug".into()), ..Default::default() });
        init_logging(LoggingConfig::default());
        log::info!("still logging");
    }
}
