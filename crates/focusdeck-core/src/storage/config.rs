//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Work/break session lengths and the auto-switch delay
//! - Confetti burst sizes and physics constants
//! - The drawing surface used to place bursts and size the progress ring
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::confetti::{Physics, Viewport};
use crate::error::{ConfigError, Result, ValidationError};
use crate::timer::{Durations, ProgressRing};

/// Countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    #[serde(default = "default_auto_switch_delay_secs")]
    pub auto_switch_delay_secs: u64,
}

/// Confetti configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfettiConfig {
    #[serde(default = "default_session_particles")]
    pub session_particles: usize,
    #[serde(default = "default_task_particles")]
    pub task_particles: usize,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    /// How far below the visible area a particle may fall before it is dropped.
    #[serde(default = "default_cull_margin")]
    pub cull_margin: f64,
    /// Offset from a task's top-left corner to its checkbox.
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: f64,
}

/// Drawing surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_ring_radius")]
    pub ring_radius: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub confetti: ConfettiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_work_minutes() -> u64 {
    25
}
fn default_break_minutes() -> u64 {
    5
}
fn default_auto_switch_delay_secs() -> u64 {
    2
}
fn default_session_particles() -> usize {
    150
}
fn default_task_particles() -> usize {
    30
}
fn default_gravity() -> f64 {
    0.5
}
fn default_cull_margin() -> f64 {
    100.0
}
fn default_anchor_offset() -> f64 {
    20.0
}
fn default_width() -> f64 {
    1280.0
}
fn default_height() -> f64 {
    720.0
}
fn default_ring_radius() -> f64 {
    135.0
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            auto_switch_delay_secs: default_auto_switch_delay_secs(),
        }
    }
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            session_particles: default_session_particles(),
            task_particles: default_task_particles(),
            gravity: default_gravity(),
            cull_margin: default_cull_margin(),
            anchor_offset: default_anchor_offset(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            ring_radius: default_ring_radius(),
        }
    }
}

impl TimerConfig {
    pub fn durations(&self) -> Durations {
        Durations {
            work_secs: self.work_minutes.saturating_mul(60),
            break_secs: self.break_minutes.saturating_mul(60),
            auto_switch_delay_secs: self.auto_switch_delay_secs,
        }
    }
}

impl ConfettiConfig {
    pub fn physics(&self) -> Physics {
        Physics {
            gravity: self.gravity,
            cull_margin: self.cull_margin,
        }
    }
}

impl DisplayConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn ring(&self) -> ProgressRing {
        ProgressRing::new(self.ring_radius)
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(unknown());
            }
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(n) if n.is_u64() => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Number(_) => value
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values the widget cannot run with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let positive = [
            ("timer.work_minutes", self.timer.work_minutes as f64),
            ("timer.break_minutes", self.timer.break_minutes as f64),
            ("timer.auto_switch_delay_secs", self.timer.auto_switch_delay_secs as f64),
            ("confetti.gravity", self.confetti.gravity),
            ("display.width", self.display.width),
            ("display.height", self.display.height),
            ("display.ring_radius", self.display.ring_radius),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ValidationError::NotPositive {
                    field: field.to_string(),
                });
            }
        }
        if !self.confetti.gravity.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "confetti.gravity".to_string(),
                message: "must be finite".to_string(),
            });
        }
        if !(self.confetti.cull_margin.is_finite() && self.confetti.cull_margin >= 0.0) {
            return Err(ValidationError::InvalidValue {
                field: "confetti.cull_margin".to_string(),
                message: "must be a finite non-negative number".to_string(),
            });
        }
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

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the resulting config is invalid; `self` is untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
