//! Environment-backed settings for cigen.
//! Values here end up in generated files; they are never contacted.

use log::debug;

use crate::constants::{env, DEFAULT_NEXUS_URL, DEFAULT_SONAR_HOST};

/// Settings supplied through the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Container image override. `None` means `<project>:latest`.
    pub registry_image: Option<String>,
    pub sonar_host: String,
    pub nexus_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_image: None,
            sonar_host: DEFAULT_SONAR_HOST.to_string(),
            nexus_url: DEFAULT_NEXUS_URL.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            let value = lookup(key).filter(|v| !v.trim().is_empty());
            if let Some(v) = &value {
                debug!("Using {key}={v} from environment");
            }
            value
        };
        let defaults = Self::default();

        Self {
            registry_image: get(env::REGISTRY_IMAGE),
            sonar_host: get(env::SONAR_HOST).unwrap_or(defaults.sonar_host),
            nexus_url: get(env::NEXUS_URL).unwrap_or(defaults.nexus_url),
        }
    }

    /// Image name for `project_name`, honouring the registry override.
    pub fn image_name(&self, project_name: &str) -> String {
        match &self.registry_image {
            Some(image) => image.clone(),
            None => format!("{project_name}:latest"),
        }
    }
}
