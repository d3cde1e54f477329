//! The configuration structs of both components, and their impls.
//!
//! Both components read the same files, but each one only deserializes its own section,
//! so a broken section of one component never stops the other from starting.
use std::{path::Path, time::Duration};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::{de::DeserializeOwned, Deserialize};
use strum_macros::AsRefStr;

use crate::config::{ConfigError, ConfigResult};

/// Cold-start variable holding the announcer's bucket.
pub const BUCKET_NAME_ENV: &str = "BUCKET_NAME";
/// Cold-start variable holding the notification topic of both components.
pub const TOPIC_ARN_ENV: &str = "SNS_TOPIC_ARN";
/// Alias of `SNS_TOPIC_ARN`, which wins when both are set.
pub const NOTIFICATION_TOPIC_ENV: &str = "NOTIFICATION_TOPIC";

/// Cold-start variables and the config keys they set, later entries win.
const COLD_START_VARS: [(&str, &str); 5] = [
    (BUCKET_NAME_ENV, "announcer.store_config.bucket"),
    (NOTIFICATION_TOPIC_ENV, "announcer.notifier_config.topic"),
    (NOTIFICATION_TOPIC_ENV, "registrar.notifier_config.topic"),
    (TOPIC_ARN_ENV, "announcer.notifier_config.topic"),
    (TOPIC_ARN_ENV, "registrar.notifier_config.topic"),
];

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

/// A component's section of the config files.
pub trait ComponentConfig: DeserializeOwned {
    const SECTION: &'static str;

    fn load(config_dir: &Path, environment: Environment) -> ConfigResult<Self> {
        let config = config_figment(config_dir, environment).extract_inner(Self::SECTION)?;
        Ok(config)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct AnnouncerConfig {
    pub net_config: NetConfig,
    pub store_config: StoreConfig,
    pub notifier_config: NotifierConfig,
    #[serde(default)]
    pub expose_error_detail: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RegistrarConfig {
    pub net_config: NetConfig,
    pub notifier_config: NotifierConfig,
    #[serde(default)]
    pub expose_error_detail: bool,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Http,
    Memory,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: BackendKind,
    pub endpoint: String,
    pub bucket: String,
    pub auth_token: Option<SecretString>,
    pub timeout_millis: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NotifierConfig {
    #[serde(default)]
    pub backend: BackendKind,
    pub endpoint: String,
    pub topic: String,
    pub auth_token: Option<SecretString>,
    pub timeout_millis: u64,
}

// ###################################
// ->   IMPLs
// ###################################
/// Layers `base.toml`, the environment specific file and the process environment
/// on top of each other. Later sources win.
pub fn config_figment(config_dir: &Path, environment: Environment) -> Figment {
    let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

    let figment = Figment::new()
        .merge(Toml::file(config_dir.join("base.toml")))
        .merge(Toml::file(config_dir.join(environment_filename)));

    COLD_START_VARS
        .into_iter()
        .fold(figment, |figment, (var, key)| {
            figment.merge(Env::raw().only(&[var]).map(move |_| key.into()))
        })
        .merge(Env::prefixed("APP_").split("__"))
}

impl ComponentConfig for AnnouncerConfig {
    const SECTION: &'static str = "announcer";
}

impl ComponentConfig for RegistrarConfig {
    const SECTION: &'static str = "registrar";
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

impl NotifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}
