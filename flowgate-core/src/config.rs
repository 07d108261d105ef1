use crate::error::ConfigError;
use crate::service::{Service, Services};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// On-disk service definition document.
///
/// A reconfiguration pass loads one of these, finalizes every service and
/// hands the sorted collection to the renderer. Callers swap the returned
/// collection in atomically instead of mutating shared state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default)]
    pub services: Vec<Service>,
}

impl ServicesConfig {
    /// Load service definitions from a YAML file + env overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: ServicesConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("FLOWGATE_").split("_"))
            .extract()?;
        Ok(config)
    }

    /// Finalize every service and return the collection in declaration order.
    ///
    /// The first co-dependent field violation aborts the pass; a half-set
    /// pair is a configuration error, not something to repair silently.
    pub fn into_services(self) -> Result<Services, ConfigError> {
        let mut list = self.services;
        for service in &mut list {
            service.finalize()?;
        }
        let mut services = Services::from(list);
        services.sort_by_acl_name();
        info!(count = services.len(), "service definitions finalized");
        Ok(services)
    }
}
