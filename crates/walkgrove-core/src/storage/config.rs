//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Daily step goal
//! - Theme
//! - Default tree type for fresh growth cycles
//! - Onboarding completion flag
//!
//! Configuration is stored at `~/.config/walkgrove/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Smallest accepted daily goal.
pub const MIN_DAILY_STEPS: u32 = 1_000;
/// Largest accepted daily goal.
pub const MAX_DAILY_STEPS: u32 = 50_000;
/// Goal picker granularity.
pub const GOAL_STEP_INCREMENT: u32 = 500;

/// Daily goal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    #[serde(default = "default_daily_steps")]
    pub daily_steps: u32,
}

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/walkgrove/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub goal: GoalConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Tree type used for fresh growth cycles.
    #[serde(default = "default_tree_type")]
    pub default_tree_type: String,
    /// Whether the first-run flow has completed.
    #[serde(default)]
    pub onboarding_complete: bool,
}

fn default_daily_steps() -> u32 {
    10_000
}

fn default_tree_type() -> String {
    "oak".into()
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            daily_steps: default_daily_steps(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::System,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goal: GoalConfig::default(),
            ui: UiConfig::default(),
            default_tree_type: default_tree_type(),
            onboarding_complete: false,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| ConfigError::InvalidValue {
                                    key: key.to_string(),
                                    message: format!("cannot parse '{value}' as number"),
                                })?
                        } else {
                            return Err(ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            });
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Validated goal setter: range is [`MIN_DAILY_STEPS`, `MAX_DAILY_STEPS`].
    pub fn set_daily_goal(&mut self, steps: u32) -> Result<(), ConfigError> {
        if !(MIN_DAILY_STEPS..=MAX_DAILY_STEPS).contains(&steps) {
            return Err(ConfigError::InvalidValue {
                key: "goal.daily_steps".into(),
                message: format!(
                    "must be between {MIN_DAILY_STEPS} and {MAX_DAILY_STEPS}, got {steps}"
                ),
            });
        }
        self.goal.daily_steps = steps;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the result fails validation, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        if !(MIN_DAILY_STEPS..=MAX_DAILY_STEPS).contains(&updated.goal.daily_steps) {
            return Err(Box::new(ConfigError::InvalidValue {
                key: "goal.daily_steps".into(),
                message: format!(
                    "must be between {MIN_DAILY_STEPS} and {MAX_DAILY_STEPS}, got {}",
                    updated.goal.daily_steps
                ),
            }));
        }
        *self = updated;
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.goal.daily_steps, 10_000);
        assert_eq!(cfg.ui.theme, Theme::System);
        assert_eq!(cfg.default_tree_type, "oak");
        assert!(!cfg.onboarding_complete);
    }

    #[test]
    fn goal_range_is_enforced() {
        let mut cfg = Config::default();
        assert!(cfg.set_daily_goal(500).is_err());
        assert!(cfg.set_daily_goal(60_000).is_err());
        assert!(cfg.set_daily_goal(12_500).is_ok());
        assert_eq!(cfg.goal.daily_steps, 12_500);
    }

    #[test]
    fn get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("goal.daily_steps").as_deref(), Some("10000"));
        assert_eq!(cfg.get("ui.theme").as_deref(), Some("system"));
        assert!(cfg.get("no.such.key").is_none());
    }

    #[test]
    fn toml_round_trip() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.goal.daily_steps, cfg.goal.daily_steps);
    }
}
