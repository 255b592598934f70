use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "tessera_sched=trace"). When absent, `RUST_LOG` is honored, then a
/// conservative default.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
}

static INIT: Once = Once::new();

/// Initializes the global logger once; subsequent calls are ignored.
///
/// Intended usage is early in `main`. Library code never calls this.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter.as_deref() {
            Some(filter) => {
                builder.parse_filters(filter);
            }
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                // Warnings only: the scheduler's per-tick chatter is debug/
                // trace level and opt-in.
                Err(_) => {
                    builder.filter_level(log::LevelFilter::Warn);
                }
            },
        }

        builder.init();
        log::debug!("logging initialized");
    });
}
