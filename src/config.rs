use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{IdType, SpeciesFilter, default_annotation_categories};
use crate::error::DavidError;

pub const DEFAULT_CONFIG_FILE: &str = "david-annot.json";
pub const DEFAULT_BASE_URL: &str = "http://david.abcc.ncifcrf.gov/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub id_type: Option<String>,
    #[serde(default)]
    pub annotations: Option<Vec<String>>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // always ends in `/`
    pub base_url: String,
    pub species: SpeciesFilter,
    pub id_type: IdType,
    pub annotations: Vec<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            species: SpeciesFilter::default(),
            id_type: IdType::default(),
            annotations: default_annotation_categories(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, DavidError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Self::resolve_config(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| DavidError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| DavidError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, DavidError> {
        let base_url = normalize_base_url(
            config
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL),
        )?;

        let id_type = match config.id_type {
            Some(value) => value.parse()?,
            None => IdType::default(),
        };

        let species = config
            .species
            .map(SpeciesFilter::new)
            .unwrap_or_default();

        let annotations = config
            .annotations
            .map(normalize_annotations)
            .unwrap_or_else(default_annotation_categories);

        Ok(ResolvedConfig {
            base_url,
            species,
            id_type,
            annotations,
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            user_agent: config.user_agent.unwrap_or_else(default_user_agent),
        })
    }
}

pub fn normalize_annotations(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

pub fn default_user_agent() -> String {
    format!("david-annot/{}", env!("CARGO_PKG_VERSION"))
}

fn normalize_base_url(value: &str) -> Result<String, DavidError> {
    let trimmed = value.trim();
    let parsed =
        Url::parse(trimmed).map_err(|_| DavidError::InvalidBaseUrl(value.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DavidError::InvalidBaseUrl(value.to_string()));
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn resolve_defaults() {
        let resolved = ConfigLoader::resolve_config(Config::default()).unwrap();
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.species.as_str(), "9606:Homo sapiens");
        assert_eq!(resolved.annotations, default_annotation_categories());
        assert_eq!(resolved.timeout, Duration::from_secs(60));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = Config {
            base_url: Some("https://david.example.org/david".to_string()),
            ..Config::default()
        };
        let resolved = ConfigLoader::resolve_config(config).unwrap();
        assert_eq!(resolved.base_url, "https://david.example.org/david/");
    }

    #[test]
    fn base_url_must_be_http() {
        let config = Config {
            base_url: Some("ftp://david.example.org/".to_string()),
            ..Config::default()
        };
        assert_matches!(
            ConfigLoader::resolve_config(config),
            Err(DavidError::InvalidBaseUrl(_))
        );
    }
}
