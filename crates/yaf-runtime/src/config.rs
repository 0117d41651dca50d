//! Runtime configuration and logging setup

use tracing_subscriber::EnvFilter;

/// Console line buffer size, including the terminator.
pub const INPUT_BUFFER_SIZE: usize = 1024;

/// Buffer size used when rendering numbers as text, including the terminator.
pub const FORMAT_BUFFER_SIZE: usize = 64;

/// Exit status of a process terminated by a runtime fault.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Environment variable holding `tracing` filter directives.
pub const LOG_ENV: &str = "YAF_LOG";

const fn default_filter() -> &'static str {
    if cfg!(feature = "debug_runtime") {
        "debug"
    } else {
        "warn"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Filter directives for runtime diagnostics, e.g. `yaf_runtime=debug`.
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            log_filter: default_filter().to_owned(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        match std::env::var(LOG_ENV) {
            Ok(filter) if !filter.trim().is_empty() => RuntimeConfig { log_filter: filter },
            _ => RuntimeConfig::default(),
        }
    }

    /// Install a stderr `fmt` subscriber for this configuration.
    ///
    /// Returns `false` if a global subscriber was already set.
    pub fn init_logging(&self) -> bool {
        let (filter, rejected) = match EnvFilter::try_new(&self.log_filter) {
            Ok(filter) => (filter, None),
            Err(err) => (EnvFilter::new(default_filter()), Some(err)),
        };

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .is_ok();

        if let Some(err) = rejected {
            tracing::warn!(%err, filter = %self.log_filter, "ignoring invalid log filter");
        }

        installed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_reads_filter() {
        unsafe { std::env::set_var(LOG_ENV, "yaf_runtime=trace") };
        let config = RuntimeConfig::from_env();
        unsafe { std::env::remove_var(LOG_ENV) };
        assert_eq!(config.log_filter, "yaf_runtime=trace");
    }

    #[test]
    #[serial]
    fn test_from_env_falls_back_to_default() {
        unsafe { std::env::set_var(LOG_ENV, "   ") };
        let blank = RuntimeConfig::from_env();
        unsafe { std::env::remove_var(LOG_ENV) };
        let unset = RuntimeConfig::from_env();

        assert_eq!(blank, RuntimeConfig::default());
        assert_eq!(unset, RuntimeConfig::default());
    }
}
