//! Layered configuration loading
//!
//! Priority (highest to lowest):
//! 1. Environment variables `<SERVICE>_<SECTION>__<KEY>`
//! 2. Explicit config file (when given)
//! 3. `config/<service>.yaml` (when present)
//! 4. `Default` values of the config type

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Build the figment for `service_name` without extracting it
pub fn config_figment<T>(service_name: &str, config_file: Option<&Path>) -> Figment
where
    T: Serialize + Default,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()))
        .merge(Yaml::file(format!("config/{}.yaml", service_name)));

    if let Some(path) = config_file {
        debug!("Merging configuration file: {}", path.display());
        figment = figment.merge(Yaml::file(path));
    }

    figment.merge(Env::prefixed(&format!("{}_", service_name.to_uppercase())).split("__"))
}

/// Load configuration for `service_name`
pub fn load_config<T>(service_name: &str, config_file: Option<&Path>) -> anyhow::Result<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Default,
{
    config_figment::<T>(service_name, config_file)
        .extract()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
