use crate::core::validator::TagCountPolicy;
use crate::utils::error::{CatalogueError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogueConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file as a path or `file://` URL. Without it the catalogue
    /// lives in memory only.
    pub snapshot: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub tag_count_policy: TagCountPolicy,
}

/// Reference data guaranteed to exist at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl CatalogueConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogueError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::info!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogueError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogueError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip = validation::validate_ip_address("server.bind_address", &self.server.bind_address)?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn snapshot_path(&self) -> Result<Option<PathBuf>> {
        self.store
            .snapshot
            .as_deref()
            .map(|location| validation::validate_file_location("store.snapshot", location))
            .transpose()
    }

    pub fn tag_count_policy(&self) -> TagCountPolicy {
        self.validation.tag_count_policy
    }
}

impl Validate for CatalogueConfig {
    fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;
        self.snapshot_path()?;
        validation::validate_unique_names("reference.cuisines", &self.reference.cuisines)?;
        validation::validate_unique_names("reference.tags", &self.reference.tags)?;
        Ok(())
    }
}
