//! Configuration management for MindForge

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// The placeholder value shipped in config templates
const API_KEY_PLACEHOLDER: &str = "your_gemini_api_key_here";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Gemini API key; absent or placeholder means offline fallback mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    /// Supabase project URL
    #[serde(default)]
    pub supabase_url: String,

    /// Supabase anonymous API key
    #[serde(default)]
    pub supabase_anon_key: String,

    /// Debounce window for transcript auto-save, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Demo mode lifts the sign-in requirement on session operations
    #[serde(default)]
    pub demo_mode: bool,
}

fn default_debounce_ms() -> u64 {
    2000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            debounce_ms: default_debounce_ms(),
            demo_mode: false,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    ///
    /// Environment variables override the stored values: `GEMINI_API_KEY`,
    /// `MINDFORGE_SUPABASE_URL`, `MINDFORGE_SUPABASE_ANON_KEY`,
    /// `MINDFORGE_DEMO_MODE`.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, creating a default file when missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to its default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "mindforge")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("MINDFORGE_SUPABASE_URL") {
            self.supabase_url = url;
        }
        if let Ok(key) = std::env::var("MINDFORGE_SUPABASE_ANON_KEY") {
            self.supabase_anon_key = key;
        }
        if let Ok(value) = std::env::var("MINDFORGE_DEMO_MODE") {
            self.demo_mode = matches!(value.as_str(), "1" | "true" | "yes");
        }
    }

    /// The usable Gemini credential, if one is configured
    ///
    /// Absent, placeholder, or implausibly short keys all count as
    /// unconfigured: the network call is skipped entirely.
    pub fn gemini_credential(&self) -> Option<String> {
        self.gemini_api_key
            .as_deref()
            .filter(|key| *key != API_KEY_PLACEHOLDER && key.len() > 10)
            .map(str::to_string)
    }

    /// The transcript auto-save debounce window
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
