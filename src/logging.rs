//! Logger initialization: the `log` facade everywhere, `env_logger` as the backend

use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "opengl_play=debug").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Without `-v` flags `RUST_LOG` decides, each flag raises the crate level
    pub fn from_verbosity(verbosity: u64) -> Self {
        let env_filter = match verbosity {
            0 => None,
            1 => Some("info,opengl_play=debug"),
            _ => Some("debug,opengl_play=trace"),
        };
        Self {
            env_filter: env_filter.map(String::from),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once, later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_filter() {
        assert_eq!(LoggingConfig::from_verbosity(0).env_filter, None);
        assert_eq!(
            LoggingConfig::from_verbosity(1).env_filter.as_deref(),
            Some("info,opengl_play=debug")
        );
        assert_eq!(
            LoggingConfig::from_verbosity(5).env_filter.as_deref(),
            Some("debug,opengl_play=trace")
        );
    }
}
