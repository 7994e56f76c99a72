use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Install the stderr subscriber once per process.
pub fn init_tracing(level: LogLevel) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        fmt()
            .with_env_filter(filter_for(level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.directive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_follows_level() {
        assert_eq!(filter_for(LogLevel::Debug).to_string(), "debug");
        assert_eq!(filter_for(LogLevel::Panic).to_string(), "error");
        assert_eq!(filter_for(LogLevel::Off).to_string(), "off");
    }
}
