use std::sync::Once;

/// Filter used when neither the caller nor `RUST_LOG` names one.
pub const DEFAULT_FILTER: &str = "info";

/// How the vellum runtime reports through `env_logger`.
///
/// Build steps and handler dispatch log at `debug`, icon fallbacks at
/// `warn` and failing handlers at `error`, so `--log debug` on the binary
/// shows every window being assembled.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"vellum_ui=debug,vellum_studio=info"`.
    pub env_filter:  Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Prefix records with their module path.
    pub targets:     bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter:  None,
            write_style: env_logger::WriteStyle::Auto,
            targets:     false,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self { env_filter: Some(filter.into()), ..Self::default() }
    }

    /// The directives that apply: the explicit filter, else `env`, else
    /// [`DEFAULT_FILTER`]. Blank values count as unset.
    pub fn effective_filter(&self, env: Option<&str>) -> String {
        [self.env_filter.as_deref(), env]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string()
    }
}

static INIT: Once = Once::new();

/// Install the process logger. Only the first call does anything, and a
/// logger installed by an embedding application is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = config.effective_filter(env.as_deref());

        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format_timestamp(None)
            .format_target(config.targets);

        match builder.try_init() {
            Ok(()) => log::debug!("logging initialized with `{filter}`"),
            Err(_) => log::debug!("logger already installed; keeping it"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_precedence() {
        let explicit = LoggingConfig::with_filter("vellum_ui=trace");
        assert_eq!(explicit.effective_filter(Some("warn")), "vellum_ui=trace");

        let unset = LoggingConfig::default();
        assert_eq!(unset.effective_filter(Some("warn")), "warn");
        assert_eq!(unset.effective_filter(None), DEFAULT_FILTER);

        let blank = LoggingConfig::with_filter("  ");
        assert_eq!(blank.effective_filter(Some("")), DEFAULT_FILTER);
    }
}
