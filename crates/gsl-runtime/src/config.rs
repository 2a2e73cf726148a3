//! Runtime configuration, read from the environment of the compiled program.
//!
//! - `GSL_INITIAL_CAPACITY`: starting capacity of every graph, between 1
//!   and 1048576 (default: 16)
//! - `GSL_LOG`: tracing filter directive, falling back to `RUST_LOG`
//!   (default: "warn")

use gsl_core::HeapConfig;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Largest accepted `GSL_INITIAL_CAPACITY`. Every graph reserves this many
/// node and arc slots up front.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Settings applied when a thread's heap is first created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub heap: HeapConfig,
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            heap: HeapConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Unparseable values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = RuntimeConfig::default();

        if let Some(raw) = lookup("GSL_INITIAL_CAPACITY") {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if (1..=MAX_INITIAL_CAPACITY).contains(&capacity) => {
                    config.heap.initial_capacity = capacity
                }
                Ok(capacity) if capacity > MAX_INITIAL_CAPACITY => tracing::warn!(
                    value = capacity,
                    max = MAX_INITIAL_CAPACITY,
                    "ignoring oversized GSL_INITIAL_CAPACITY"
                ),
                _ => tracing::warn!(value = %raw, "ignoring invalid GSL_INITIAL_CAPACITY"),
            }
        }
        if let Some(filter) = lookup("GSL_LOG").or_else(|| lookup("RUST_LOG")) {
            config.log_filter = filter;
        }
        config
    }
}
