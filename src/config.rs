use crate::error::{AppError, Result};
use crate::sheets::ValueRenderOption;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_PREFIX: &str = "sheets-quickstart";

// Public sample sheet of students used by the quickstart read.
const SAMPLE_SPREADSHEET_ID: &str = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";
const SAMPLE_RANGE: &str = "Class Data!A2:E";

pub const DEFAULT_APPLICATION_NAME: &str = "sheets-quickstart";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub google: GoogleConfig,
    #[serde(default)]
    pub quickstart: QuickstartConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// Path to a service account key; takes precedence over the installed flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_key: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
}

impl GoogleConfig {
    pub fn application_name(&self) -> String {
        self.application_name
            .clone()
            .unwrap_or_else(|| DEFAULT_APPLICATION_NAME.to_string())
    }

    fn validate(&self) -> Result<()> {
        if self.service_account_key.is_some() {
            return Ok(());
        }

        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(AppError::Config(
                "Google client_id and client_secret (or service_account_key) must be set in config file"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuickstartConfig {
    pub spreadsheet_id: String,
    pub range: String,
    pub value_render_option: ValueRenderOption,
}

impl Default for QuickstartConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: SAMPLE_SPREADSHEET_ID.to_string(),
            range: SAMPLE_RANGE.to_string(),
            value_render_option: ValueRenderOption::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        if !config_path.exists() {
            return Err(AppError::Config(format!(
                "Config file not found at {:?}. Please create one.",
                config_path
            )));
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        config.google.validate()?;

        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        let xdg_dirs = Self::xdg_dirs();
        xdg_dirs
            .place_config_file("config.toml")
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }

    /// Get the cache directory path
    pub fn cache_dir() -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.get_cache_home()
            .ok_or_else(|| AppError::Config("Failed to determine cache directory".to_string()))
    }

    /// Get a cache file path
    pub fn cache_file(filename: &str) -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.place_cache_file(filename)
            .map_err(|e| AppError::Config(format!("Failed to create cache file path: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            google: GoogleConfig {
                client_id: "test_client_id".to_string(),
                client_secret: "test_client_secret".to_string(),
                ..Default::default()
            },
            quickstart: QuickstartConfig {
                spreadsheet_id: "sheet_123".to_string(),
                range: "Sheet1!A1:B2".to_string(),
                value_render_option: ValueRenderOption::Formula,
            },
        };

        let serialized = toml::to_string(&config).unwrap();
        let deserialized = Config::parse(&serialized).unwrap();

        assert_eq!(config.google.client_id, deserialized.google.client_id);
        assert_eq!(
            config.quickstart.spreadsheet_id,
            deserialized.quickstart.spreadsheet_id
        );
        assert_eq!(
            deserialized.quickstart.value_render_option,
            ValueRenderOption::Formula
        );
    }

    #[test]
    fn test_quickstart_defaults() {
        let config = Config::parse(
            r#"
            [google]
            client_id = "id"
            client_secret = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.quickstart.spreadsheet_id, SAMPLE_SPREADSHEET_ID);
        assert_eq!(config.quickstart.range, "Class Data!A2:E");
        assert_eq!(
            config.quickstart.value_render_option,
            ValueRenderOption::UnformattedValue
        );
        assert_eq!(config.google.application_name(), DEFAULT_APPLICATION_NAME);
    }

    #[test]
    fn test_missing_client_secret() {
        let err = Config::parse(
            r#"
            [google]
            client_id = "id"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_service_account_without_client_secret() {
        let config = Config::parse(
            r#"
            [google]
            service_account_key = "/etc/sheets/key.json"
            application_name = "expenses"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.google.service_account_key,
            Some(PathBuf::from("/etc/sheets/key.json"))
        );
        assert_eq!(config.google.application_name(), "expenses");
    }
}
