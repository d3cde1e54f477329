//! Two independently deployable HTTP handlers on top of managed services:
//! the event announcer appends submitted events to a JSON log in an object store and
//! broadcasts them on a notification topic, the subscription registrar subscribes email
//! addresses to that topic.

mod app;
pub mod backend;
pub mod config;
mod error;
pub mod handlers;
pub mod web;

pub use app::App;
pub use error::{Error, Result};
pub use web::serve;

use tracing_subscriber::EnvFilter;

/// Compact console output for local development. `RUST_LOG` overrides the `debug` default.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

/// Plain output for log collectors. `RUST_LOG` overrides the `info` default.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
