//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use docgraph_domain::{LayoutConfig, Palette};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Service URL used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default = "default_profiles")]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Overrides for the graph layout parameters
    #[serde(default)]
    pub layout: LayoutOverrides,

    /// File the configuration was loaded from
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Connection profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Document service URL
    pub server_url: String,

    /// Request timeout; requests wait indefinitely when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Optional replacements for the built-in layout constants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayoutOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_repulsion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_edge_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_elasticity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_iter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiling_padding_vertical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiling_padding_horizontal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity_range_compound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity_compound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_energy_on_incremental: Option<f64>,
    /// Cluster colors as `#rgb` or `#rrggbb`, index = cluster id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
}

impl LayoutOverrides {
    /// Apply the overrides on top of the defaults and validate the result
    pub fn to_layout_config(&self) -> Result<LayoutConfig> {
        let defaults = LayoutConfig::default();

        let palette = match &self.palette {
            Some(colors) => Palette::new(colors.iter().cloned())?,
            None => defaults.palette.clone(),
        };

        let config = LayoutConfig {
            node_repulsion: self.node_repulsion.unwrap_or(defaults.node_repulsion),
            ideal_edge_length: self.ideal_edge_length.unwrap_or(defaults.ideal_edge_length),
            edge_elasticity: self.edge_elasticity.unwrap_or(defaults.edge_elasticity),
            gravity: self.gravity.unwrap_or(defaults.gravity),
            num_iter: self.num_iter.unwrap_or(defaults.num_iter),
            padding: self.padding.unwrap_or(defaults.padding),
            tiling_padding_vertical: self
                .tiling_padding_vertical
                .unwrap_or(defaults.tiling_padding_vertical),
            tiling_padding_horizontal: self
                .tiling_padding_horizontal
                .unwrap_or(defaults.tiling_padding_horizontal),
            gravity_range_compound: self
                .gravity_range_compound
                .unwrap_or(defaults.gravity_range_compound),
            gravity_compound: self.gravity_compound.unwrap_or(defaults.gravity_compound),
            initial_energy_on_incremental: self
                .initial_energy_on_incremental
                .unwrap_or(defaults.initial_energy_on_incremental),
            palette,
        };

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Directory holding the configuration and REPL history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".docgraph"))
    }

    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load configuration from `path`, or defaults bound to `path` if it does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from (or the default path).
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Layout configuration with overrides applied.
    pub fn layout_config(&self) -> Result<LayoutConfig> {
        self.layout.to_layout_config()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_profile: default_profile(),
            profiles: default_profiles(),
            settings: Settings::default(),
            layout: LayoutOverrides::default(),
            path: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_profiles() -> BTreeMap<String, Profile> {
    let mut profiles = BTreeMap::new();
    profiles.insert(
        default_profile(),
        Profile {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: None,
        },
    );
    profiles
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert_eq!(config.get_active_profile().unwrap().server_url, DEFAULT_SERVER_URL);
        assert!(config.settings.color);
        assert_eq!(config.layout_config().unwrap(), LayoutConfig::default());
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            server_url: "http://example.com:8000".to_string(),
            timeout_secs: Some(30),
        };

        config.set_profile("test".to_string(), profile);
        assert!(config.profiles.contains_key("test"));

        config.switch_profile("test".to_string()).unwrap();
        assert_eq!(config.active_profile, "test");
        assert_eq!(config.get_active_profile().unwrap().timeout_secs, Some(30));
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile(
            "remote".to_string(),
            Profile {
                server_url: "https://docs.example.com".to_string(),
                timeout_secs: None,
            },
        );
        config.layout.gravity = Some(0.9);
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.profiles.len(), 2);
        assert_eq!(reloaded.layout.gravity, Some(0.9));
        assert_eq!(reloaded.layout_config().unwrap().gravity, 0.9);
    }

    #[test]
    fn test_layout_overrides_from_toml() {
        let toml = r##"
            [layout]
            num_iter = 500
            palette = ["#000000", "#ffffff"]
        "##;
        let config: Config = toml::from_str(toml).unwrap();
        let layout = config.layout_config().unwrap();
        assert_eq!(layout.num_iter, 500);
        assert_eq!(layout.palette.len(), 2);
        assert_eq!(layout.node_repulsion, 100_000.0);
        // A file without a profiles table still has a usable default profile
        assert_eq!(config.active_profile, "default");
        assert_eq!(config.get_active_profile().unwrap().server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_explicit_profiles_replace_default() {
        let toml = r#"
            active_profile = "remote"

            [profiles.remote]
            server_url = "https://docs.example.com"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.profiles.len(), 1);
        assert_eq!(config.get_active_profile().unwrap().server_url, "https://docs.example.com");
    }

    #[test]
    fn test_invalid_palette_override() {
        let overrides = LayoutOverrides {
            palette: Some(vec!["red".to_string()]),
            ..Default::default()
        };
        assert!(matches!(overrides.to_layout_config(), Err(CliError::Layout(_))));
    }
}
