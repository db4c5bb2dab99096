pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::validator::TagCountPolicy;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::CatalogueConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "recipe-catalogue")]
#[command(about = "Recipe catalogue service with cuisine and tag validation")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "catalogue.toml")]
    pub config: String,

    #[arg(long)]
    pub bind_address: Option<String>,

    #[arg(short, long)]
    pub port: Option<u16>,

    /// Snapshot file (path or file:// URL)
    #[arg(long)]
    pub snapshot: Option<String>,

    /// strict or distinct
    #[arg(long, value_parser = parse_policy)]
    pub tag_count_policy: Option<TagCountPolicy>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
fn parse_policy(value: &str) -> Result<TagCountPolicy, String> {
    match value {
        "strict" => Ok(TagCountPolicy::Strict),
        "distinct" => Ok(TagCountPolicy::Distinct),
        other => Err(format!("unknown tag count policy '{}'", other)),
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Command line values win over the file.
    pub fn apply_overrides(&self, config: &mut CatalogueConfig) {
        if let Some(bind_address) = &self.bind_address {
            config.server.bind_address = bind_address.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(snapshot) = &self.snapshot {
            config.store.snapshot = Some(snapshot.clone());
        }
        if let Some(policy) = self.tag_count_policy {
            config.validation.tag_count_policy = policy;
        }
    }
}
