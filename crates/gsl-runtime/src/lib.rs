//! C ABI runtime for compiled graph-language programs.
//!
//! Generated code links against this library and calls the exported
//! functions by the names the code generator declares (`makeNode`,
//! `graphAdd`, `shortestPath`, ...). Values are opaque pointer-sized handles
//! into a per-thread [`gsl_core::Heap`]; strings are NUL-terminated and
//! returned strings stay valid until [`gsl_rt_reset`].
//!
//! Failure policy:
//! - allocation failure logs and aborts
//! - any other error (for example a handle this thread never issued) is
//!   logged and returned as null, `false` or `0`

#![allow(non_snake_case)]

pub mod config;
pub mod construct;
pub mod handle;
pub mod lifted;
mod state;
pub mod strings;

use tracing_subscriber::EnvFilter;

pub use config::{RuntimeConfig, MAX_INITIAL_CAPACITY};
pub use handle::{ArcHandle, GraphHandle, NodeHandle};

/// Installs the log subscriber and builds this thread's heap from the
/// environment. Calling it is optional; the heap is created on first use
/// either way. Safe to call more than once.
#[no_mangle]
pub extern "C" fn gsl_rt_init() {
    let config = RuntimeConfig::from_env();
    init_logging(&config.log_filter);
    state::reset(&config);
    tracing::info!(
        initial_capacity = config.heap.initial_capacity,
        "graph runtime initialized"
    );
}

/// Drops every value and returned string of the calling thread.
#[no_mangle]
pub extern "C" fn gsl_rt_reset() {
    state::reset(&RuntimeConfig::from_env());
}

/// Installs a stderr fmt subscriber filtered by `filter`. Does nothing if a
/// global subscriber is already set.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
