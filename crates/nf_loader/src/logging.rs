use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Prefixes every line with the context it was created for, e.g. `[OpenAI]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: Vec<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_new_prefixes(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.clear();
        self.prefixes.push(prefix.into());
        self
    }

    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        let mut logger = self.clone();
        logger.prefixes.push(prefix.into());
        logger
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("[{}] ", p)).collect()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}{}", self.prefix(), message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

/// Installs the global fmt subscriber once. `filter` uses `EnvFilter` syntax
/// (`info`, `nf_loader=debug`, ...); an invalid filter falls back to `info`.
pub fn init_logging(filter: &str) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        });
    }
    Logger::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        let logger = Logger::new().with_new_prefixes("loader");
        let source = logger.with_prefix("OpenAI");
        assert_eq!(logger.prefix(), "[loader] ");
        assert_eq!(source.prefix(), "[loader] [OpenAI] ");
        assert_eq!(source.with_new_prefixes("x").prefix(), "[x] ");
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging("debug").info("first");
        init_logging("not a [valid filter").info("second");
        init_logging("info").with_prefix("OpenAI").error("third");
    }
}
