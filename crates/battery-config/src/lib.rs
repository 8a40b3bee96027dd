//! Configuration management for the battery host
//!
//! TOML config with three sections, all optional:
//!
//! ```toml
//! [channel]
//! name = "io.flutterengineering.battery/methods"
//!
//! [power]
//! power_supply_root = "/sys/class/power_supply"
//! # battery_path = "/sys/class/power_supply/battery"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/etc/battery-host";
pub const USER_CONFIG_DIR: &str = ".config/battery-host";
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "BATTERY_HOST_CONFIG";

/// Main host configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub channel: ChannelConfig,

    #[serde(default)]
    pub power: PowerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Method channel name shared with the application shell
    #[serde(default = "default_channel_name")]
    pub name: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: default_channel_name(),
        }
    }
}

fn default_channel_name() -> String {
    "io.flutterengineering.battery/methods".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerConfig {
    /// Directory scanned for a battery supply
    #[serde(default = "default_power_supply_root")]
    pub power_supply_root: PathBuf,

    /// Skip detection and read this supply directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_path: Option<PathBuf>,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            power_supply_root: default_power_supply_root(),
            battery_path: None,
        }
    }
}

fn default_power_supply_root() -> PathBuf {
    PathBuf::from("/sys/class/power_supply")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl HostConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// `BATTERY_HOST_CONFIG` names a file that must exist. Otherwise the
    /// system file is loaded and the user file is overlaid on it.
    pub fn load_default() -> Result<(Self, ConfigSource), ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);

        let mut layers = vec![Path::new(CONFIG_DIR).join(CONFIG_FILE)];
        layers.extend(user_config_path());

        Self::load_from(explicit.as_deref(), &layers)
    }

    /// Resolve configuration from an explicit file or from layered files
    pub fn load_from(
        explicit: Option<&Path>,
        layers: &[PathBuf],
    ) -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load(path)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        let present: Vec<PathBuf> = layers.iter().filter(|p| p.exists()).cloned().collect();
        if present.is_empty() {
            return Ok((Self::default(), ConfigSource::Defaults));
        }

        let config = Self::load_layered(&present)?;
        Ok((config, ConfigSource::Layered(present)))
    }

    /// Merge files in order, later files overriding earlier keys
    pub fn load_layered(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut merged = toml::Value::Table(toml::Table::new());
        for path in paths {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            let contents = std::fs::read_to_string(path)?;
            let layer: toml::Value = toml::from_str(&contents)?;
            merge_toml(&mut merged, layer);
        }

        let config: Self = merged.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.name.trim().is_empty() {
            return Err(ConfigError::Invalid("channel name must not be empty".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level must not be empty".into()));
        }
        Ok(())
    }
}

/// `$HOME/.config/battery-host/config.toml`
fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(USER_CONFIG_DIR).join(CONFIG_FILE))
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named by `BATTERY_HOST_CONFIG`
    Explicit(PathBuf),
    /// Existing default files, in merge order
    Layered(Vec<PathBuf>),
    /// No file found
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit(path) => write!(f, "{}", path.display()),
            ConfigSource::Layered(paths) => {
                let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(f, "{}", paths.join(" + "))
            }
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// Helper function to merge TOML values
pub fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.channel.name, "io.flutterengineering.battery/methods");
        assert_eq!(
            config.power.power_supply_root,
            PathBuf::from("/sys/class/power_supply")
        );
        assert!(config.power.battery_path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = HostConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: HostConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound(PathBuf::from("/etc/battery-host/config.toml"));
        assert!(format!("{}", err).contains("not found"));

        let err = ConfigError::Invalid("test error".to_string());
        assert!(format!("{}", err).contains("Invalid"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[channel]
name = "custom/battery"

[power]
battery_path = "/tmp/fake/BAT0"

[logging]
level = "debug"
"#;
        write!(temp_file, "{}", config_content).unwrap();

        let config = HostConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.channel.name, "custom/battery");
        assert_eq!(
            config.power.battery_path,
            Some(PathBuf::from("/tmp/fake/BAT0"))
        );
        assert_eq!(
            config.power.power_supply_root,
            PathBuf::from("/sys/class/power_supply")
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = HostConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.channel, ChannelConfig::default());
        assert_eq!(config.power, PowerConfig::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = HostConfig::load(&temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_empty_channel_name() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[channel]\nname = \"  \"\n").unwrap();

        let err = HostConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[channel\nname = 1").unwrap();

        let err = HostConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_save_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);
        let mut config = HostConfig::default();
        config.power.battery_path = Some(PathBuf::from("/sys/class/power_supply/BAT1"));

        config.save(&path).unwrap();

        let loaded = HostConfig::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = TempDir::new().unwrap();
        let explicit = write_config(&dir, "explicit.toml", "[logging]\nlevel = \"trace\"\n");
        let system = write_config(&dir, "system.toml", "[logging]\nlevel = \"warn\"\n");

        let (config, source) = HostConfig::load_from(Some(&explicit), &[system]).unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(source, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let system = write_config(&dir, "system.toml", "");
        let missing = dir.path().join("missing.toml");

        let err = HostConfig::load_from(Some(&missing), &[system]).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_user_file_overlays_system_file() {
        let dir = TempDir::new().unwrap();
        let system = write_config(
            &dir,
            "system.toml",
            "[channel]\nname = \"system/battery\"\n\n[logging]\nlevel = \"warn\"\n",
        );
        let user = write_config(&dir, "user.toml", "[logging]\nlevel = \"debug\"\n");

        let layers = vec![system.clone(), user.clone()];
        let (config, source) = HostConfig::load_from(None, &layers).unwrap();
        assert_eq!(config.channel.name, "system/battery");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(source, ConfigSource::Layered(vec![system, user]));
    }

    #[test]
    fn test_missing_layers_are_skipped() {
        let dir = TempDir::new().unwrap();
        let system = write_config(&dir, "system.toml", "[logging]\nlevel = \"error\"\n");
        let user = dir.path().join("user.toml");

        let (config, source) = HostConfig::load_from(None, &[system.clone(), user]).unwrap();
        assert_eq!(config.logging.level, "error");
        assert_eq!(source, ConfigSource::Layered(vec![system]));
    }

    #[test]
    fn test_no_files_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let layers = vec![dir.path().join("system.toml"), dir.path().join("user.toml")];

        let (config, source) = HostConfig::load_from(None, &layers).unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(source.to_string(), "built-in defaults");
    }

    #[test]
    fn test_layered_result_is_validated() {
        let dir = TempDir::new().unwrap();
        let system = write_config(&dir, "system.toml", "");
        let user = write_config(&dir, "user.toml", "[channel]\nname = \"\"\n");

        let err = HostConfig::load_layered(&[system, user]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_merge_toml_tables() {
        let base_table = toml::toml! {
            [logging]
            level = "info"

            [channel]
            name = "a"
        };
        let mut base = toml::Value::Table(base_table);

        let overlay_table = toml::toml! {
            [logging]
            level = "trace"
        };
        merge_toml(&mut base, toml::Value::Table(overlay_table));

        assert_eq!(base["logging"]["level"].as_str(), Some("trace"));
        assert_eq!(base["channel"]["name"].as_str(), Some("a"));
    }

    #[test]
    fn test_merge_toml_replaces_non_tables() {
        let mut base = toml::Value::Integer(1);
        merge_toml(&mut base, toml::Value::String("x".into()));
        assert_eq!(base.as_str(), Some("x"));
    }
}
