//! Tries to create a component's config from config files and the process environment.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod structs;

use std::sync::OnceLock;
use tracing::info;

use crate::error::error_chain;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use structs::{
    config_figment, AnnouncerConfig, BackendKind, ComponentConfig, Environment, NetConfig,
    NotifierConfig, RegistrarConfig, StoreConfig, BUCKET_NAME_ENV, NOTIFICATION_TOPIC_ENV,
    TOPIC_ARN_ENV,
};

/// Reads `APP_ENVIRONMENT` (defaults to `local`) and loads the component's section from
/// the `config` directory in the current working directory.
pub fn load_config<C: ComponentConfig>() -> ConfigResult<C> {
    let config_dir = std::env::current_dir()?.join("config");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()?;
    info!(
        "{:<20} - {} ({})",
        "Loading configuration for:",
        environment.as_ref(),
        C::SECTION
    );

    C::load(&config_dir, environment)
}

fn load_or_panic<C: ComponentConfig>() -> C {
    load_config::<C>()
        .unwrap_or_else(|er| panic!("Fatal Error: Building config: {}", error_chain(&er)))
}

/// Allocates a static `OnceLock` containing the `AnnouncerConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to it.
/// Panics if anything goes wrong.
pub fn get_or_init_announcer_config() -> &'static AnnouncerConfig {
    static CONFIG_INIT: OnceLock<AnnouncerConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(load_or_panic)
}

/// Same as `get_or_init_announcer_config`, for the `RegistrarConfig`.
pub fn get_or_init_registrar_config() -> &'static RegistrarConfig {
    static CONFIG_INIT: OnceLock<RegistrarConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(load_or_panic)
}
