/*
 * This file is part of owneo.
 *
 * Copyright (C) 2025 owneo contributors
 *
 * owneo is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * owneo is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with owneo. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ow_core::constants::{paths, polling};
use ow_core::{parse_features, FeatureSet};
use ow_error::{OwError, Result};

fn default_address() -> String {
    paths::DEFAULT_OWFS_MOUNT.to_string()
}

fn default_poll_interval() -> u64 {
    polling::DEFAULT_INTERVAL_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the owfs mount
    #[serde(default = "default_address")]
    pub address: String,
    /// Feature names to track, e.g. `["temperature", "humidity"]`
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: default_address(),
            features: Vec::new(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Config {
    /// Parsed feature set. Names match case-insensitively.
    pub fn desired_features(&self) -> Result<FeatureSet> {
        parse_features(&self.features)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Apply command line overrides on top of the file values
    pub fn with_overrides(
        mut self,
        address: Option<&str>,
        features: &[String],
        interval: Option<u64>,
    ) -> Self {
        if let Some(address) = address {
            self.address = address.to_string();
        }
        if !features.is_empty() {
            self.features = features.to_vec();
        }
        if let Some(interval) = interval {
            self.poll_interval_secs = interval;
        }
        self
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("owneo").join(paths::CONFIG_FILE);
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("owneo")
            .join(paths::CONFIG_FILE);
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("owneo").join(paths::CONFIG_FILE);
    }
    Path::new(paths::SYSTEM_CONFIG_DIR).join(paths::CONFIG_FILE)
}

/// Load and validate a config file
pub fn load_config_from(path: &Path) -> Result<Config> {
    if path.is_dir() {
        return Err(OwError::config(format!("{} is a directory", path.display())));
    }
    let data = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&data)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load the user config, falling back to defaults when no file exists
pub fn load_config() -> Result<Config> {
    let path = config_path();
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }
    debug!(path = %path.display(), "Loading config");
    load_config_from(&path)
}

pub fn validate_config(config: &Config) -> Result<()> {
    if config.address.trim().is_empty() {
        return Err(OwError::invalid_config("address", "must not be empty"));
    }
    if config.poll_interval_secs < polling::MIN_INTERVAL_SECS {
        return Err(OwError::invalid_config(
            "poll_interval_secs",
            format!("must be at least {}", polling::MIN_INTERVAL_SECS),
        ));
    }
    config.desired_features()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ow_core::Feature;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.address, "/mnt/1wire");
        assert!(config.features.is_empty());
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"features": ["Temperature", "co2"]}"#);
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.address, "/mnt/1wire");
        let expected: FeatureSet = [Feature::Temperature, Feature::CO2].into_iter().collect();
        assert_eq!(config.desired_features().unwrap(), expected);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"adress": "/mnt/owfs"}"#);
        assert!(matches!(load_config_from(&path), Err(OwError::JsonParse(_))));
    }

    #[test]
    fn test_unknown_feature_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"features": ["temperature", "radiation"]}"#);
        assert!(matches!(
            load_config_from(&path),
            Err(OwError::UnknownFeature(name)) if name == "radiation"
        ));
    }

    #[test]
    fn test_directory_path_rejected() {
        let dir = TempDir::new().unwrap();
        let err = load_config_from(dir.path()).unwrap_err();
        assert!(matches!(err, OwError::Config(_)));
        assert!(err.to_string().ends_with("is a directory"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = Config { poll_interval_secs: 0, ..Config::default() };
        assert!(matches!(
            validate_config(&config),
            Err(OwError::InvalidConfig { field, .. }) if field == "poll_interval_secs"
        ));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(
            Some("/tmp/owfs"),
            &["humidity".to_string()],
            Some(5),
        );
        assert_eq!(config.address, "/tmp/owfs");
        assert_eq!(config.features, vec!["humidity"]);
        assert_eq!(config.poll_interval_secs, 5);

        let untouched = Config::default().with_overrides(None, &[], None);
        assert_eq!(untouched, Config::default());
    }

    #[test]
    #[serial]
    fn test_config_path_prefers_xdg() {
        let old_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", "/tmp/xdg");
        assert_eq!(config_path(), PathBuf::from("/tmp/xdg/owneo/config.json"));

        env::remove_var("XDG_CONFIG_HOME");
        let old_home = env::var("HOME").ok();
        env::set_var("HOME", "/tmp/home");
        assert_eq!(config_path(), PathBuf::from("/tmp/home/.config/owneo/config.json"));

        match old_home {
            Some(v) => env::set_var("HOME", v),
            None => env::remove_var("HOME"),
        }
        if let Some(v) = old_xdg {
            env::set_var("XDG_CONFIG_HOME", v);
        }
    }

    #[test]
    #[serial]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let old_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", dir.path());
        assert_eq!(load_config().unwrap(), Config::default());

        fs::create_dir_all(dir.path().join("owneo")).unwrap();
        fs::write(
            dir.path().join("owneo/config.json"),
            r#"{"address": "/srv/owfs", "poll_interval_secs": 10}"#,
        )
        .unwrap();
        let config = load_config().unwrap();
        assert_eq!(config.address, "/srv/owfs");
        assert_eq!(config.poll_interval_secs, 10);

        match old_xdg {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}
