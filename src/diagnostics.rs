//! Shared message shape for warnings and errors, plus tracing setup.
//!
//! Everything here writes to stderr so stdout stays reserved for the report.

use tracing_subscriber::EnvFilter;

/// Prefix an error message so it is recognizable when chained through anyhow.
pub fn error_message(msg: impl Into<String>) -> String {
    format!("stage-breakdown: {}", msg.into())
}

pub fn warn(msg: impl AsRef<str>) {
    tracing::warn!("{}", msg.as_ref());
}

/// Map `-v` occurrences to a default filter. `RUST_LOG` wins when set.
pub fn filter_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "stage_breakdown=warn",
        1 => "stage_breakdown=info",
        2 => "stage_breakdown=debug",
        _ => "stage_breakdown=trace",
    }
}

pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_verbosity(verbose)));

    // A second init (tests) is harmless; ignore it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn verbosity_levels_saturate_at_trace() {
        assert_eq!(filter_for_verbosity(0), "stage_breakdown=warn");
        assert_eq!(filter_for_verbosity(2), "stage_breakdown=debug");
        assert_eq!(filter_for_verbosity(7), "stage_breakdown=trace");
    }

    #[test]
    fn error_message_is_prefixed() {
        assert_eq!(
            error_message("no input logs found"),
            "stage-breakdown: no input logs found"
        );
    }
}
