use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::app::BuildOptions;
use crate::error::SheetError;

pub const DEFAULT_CONFIG_FILE: &str = "juno-samplesheet.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub input_dir: Option<Utf8PathBuf>,
    #[serde(default)]
    pub metadata: Option<Utf8PathBuf>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub recursive: Option<bool>,
}

/// Command-line values, which take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<Utf8PathBuf>,
    pub metadata: Option<Utf8PathBuf>,
    pub genus: Option<String>,
    pub recursive: bool,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads the config at `path`, or the default file when present.
    pub fn load(path: Option<&Utf8Path>) -> Result<Config, SheetError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Utf8PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.as_std_path().exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path.as_std_path())
            .map_err(|_| SheetError::ConfigRead(config_path.clone()))?;
        serde_json::from_str(&content).map_err(|err| SheetError::ConfigParse(err.to_string()))
    }

    pub fn resolve_config(config: Config, overrides: Overrides) -> Result<BuildOptions, SheetError> {
        let input_dir = overrides
            .input_dir
            .or(config.input_dir)
            .ok_or(SheetError::NoInputDir)?;

        Ok(BuildOptions {
            input_dir,
            recursive: overrides.recursive || config.recursive.unwrap_or(false),
            genus: overrides.genus.or(config.genus),
            metadata: overrides.metadata.or(config.metadata),
        })
    }
}
