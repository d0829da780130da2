use std::path::Path;

use kbnode_core::Destination;
use serde::{Deserialize, Serialize};

use super::atomic::write_bytes_atomic;
use super::{SettingsError, SettingsResult};

pub const DEFAULT_CONFIG_FILE: &str = "kbnode.toml";

/// Contents of `kbnode.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KbConfig {
    pub destination: Destination,
    /// Program used to open links instead of the platform default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
}

impl KbConfig {
    pub fn validate(&self) -> SettingsResult<()> {
        self.destination
            .validate()
            .map_err(|err| SettingsError::Invalid(err.to_string()))?;
        if let Some(browser) = &self.browser {
            if browser.trim().is_empty() {
                return Err(SettingsError::Invalid("browser is empty".to_string()));
            }
        }
        Ok(())
    }
}

/// Read the config at `path`, falling back to built-in defaults when absent.
pub fn load_or_default(path: &Path) -> SettingsResult<KbConfig> {
    if !path.exists() {
        tracing::debug!(event = "config_defaulted", path = %path.display());
        return Ok(KbConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: KbConfig = toml::from_str(&content)?;
    config.validate()?;
    tracing::debug!(event = "config_loaded", path = %path.display());
    Ok(config)
}

pub fn save_config(path: &Path, config: &KbConfig) -> SettingsResult<()> {
    config.validate()?;
    let encoded = toml::to_string_pretty(config)?;
    write_bytes_atomic(path, encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("kbnode-definitely-missing.toml");
        let config = load_or_default(&path).expect("defaults");
        assert_eq!(config, KbConfig::default());
        assert_eq!(config.destination.owner, "simple-kb");
    }

    #[test]
    fn partial_destination_is_rejected() {
        let err = toml::from_str::<KbConfig>("[destination]\nowner = \"me\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = std::env::temp_dir().join(format!("kbnode-config-{}", std::process::id()));
        let path = dir.join(DEFAULT_CONFIG_FILE);
        let config = KbConfig {
            destination: Destination {
                host: "github.example.com".to_string(),
                owner: "docs".to_string(),
                repo: "kb".to_string(),
                branch: "trunk".to_string(),
            },
            browser: Some("firefox".to_string()),
        };

        save_config(&path, &config).expect("save");
        assert_eq!(load_or_default(&path).expect("load"), config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_destination_fails_to_load() {
        let dir = std::env::temp_dir().join(format!("kbnode-bad-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("dir");
        let path = dir.join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "[destination]\nhost = \"github.com\"\nowner = \"a/b\"\nrepo = \"kb\"\nbranch = \"main\"\n",
        )
        .expect("write");

        assert!(matches!(
            load_or_default(&path),
            Err(SettingsError::Invalid(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
