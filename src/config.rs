//! Configuration
//!
//! Every field is optional in the YAML file; missing ones take the defaults
//! below. The binary then lets CLI flags override individual values.

use crate::TerminalError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PROMPT: &str = "root@vibesec:~$";

/// Upper bound for every timing field, one hour
pub const MAX_DELAY_MS: u64 = 3_600_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt shown before every echoed command
    pub prompt: String,
    /// How often the UI redraws and the timers advance
    pub tick_rate_ms: u64,
    /// Fixed RNG seed for trivia, glitch and rain. Random when unset.
    pub seed: Option<u64>,
    pub boot: BootConfig,
    pub glitch: GlitchConfig,
    pub matrix: MatrixConfig,
    pub viewer: ViewerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub enabled: bool,
    pub line_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitchConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    pub probability: f64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// How long the `matrix` command keeps the green text
    pub color_hold_ms: u64,
    pub frame_ms: u64,
    /// Keep the rain running all the time, not only after `matrix`
    pub background_rain: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
    pub typing_speed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            tick_rate_ms: 40,
            seed: None,
            boot: BootConfig::default(),
            glitch: GlitchConfig::default(),
            matrix: MatrixConfig::default(),
            viewer: ViewerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            line_delay_ms: 1000,
        }
    }
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 3000,
            probability: 0.05,
            duration_ms: 100,
        }
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            color_hold_ms: 5000,
            frame_ms: 40,
            background_rain: false,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 50,
            fade_out_ms: 300,
            typing_speed_ms: 20,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// `<config dir>/vibesec/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vibesec").join("config.yaml"))
    }

    /// Where logs go when the config does not say
    pub fn default_log_file() -> PathBuf {
        dirs::cache_dir()
            .map(|dir| dir.join("vibesec").join("vibesec.log"))
            .unwrap_or_else(|| PathBuf::from("vibesec.log"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log.file.clone().unwrap_or_else(Self::default_log_file)
    }

    pub fn from_yaml(content: &str) -> Result<Self, TerminalError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| TerminalError::Config(format!("invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TerminalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TerminalError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// An explicit path must exist. Without one, the default path is used if
    /// present, otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, TerminalError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, TerminalError> {
        serde_yaml::to_string(self).map_err(|e| TerminalError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), TerminalError> {
        let positive = [
            ("tick_rate_ms", self.tick_rate_ms),
            ("boot.line_delay_ms", self.boot.line_delay_ms),
            ("glitch.interval_ms", self.glitch.interval_ms),
            ("glitch.duration_ms", self.glitch.duration_ms),
            ("matrix.color_hold_ms", self.matrix.color_hold_ms),
            ("matrix.frame_ms", self.matrix.frame_ms),
            ("viewer.typing_speed_ms", self.viewer.typing_speed_ms),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(TerminalError::Config(format!("{} must be greater than 0", name)));
            }
        }

        let bounded = positive
            .into_iter()
            .chain([
                ("viewer.fade_in_ms", self.viewer.fade_in_ms),
                ("viewer.fade_out_ms", self.viewer.fade_out_ms),
            ]);
        for (name, value) in bounded {
            if value > MAX_DELAY_MS {
                return Err(TerminalError::Config(format!(
                    "{} must be at most {} ms, got {}",
                    name, MAX_DELAY_MS, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.glitch.probability) {
            return Err(TerminalError::Config(format!(
                "glitch.probability must be between 0 and 1, got {}",
                self.glitch.probability
            )));
        }

        if self.prompt.trim().is_empty() {
            return Err(TerminalError::Config("prompt must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.prompt, "root@vibesec:~$");
        assert_eq!(config.glitch.interval_ms, 3000);
        assert_eq!(config.matrix.color_hold_ms, 5000);
        assert_eq!(config.viewer.fade_out_ms, 300);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml("seed: 7\nglitch:\n  probability: 0.5\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.glitch.probability, 0.5);
        assert_eq!(config.glitch.interval_ms, 3000);
        assert_eq!(config.boot, BootConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_yaml("glitch:\n  probability: 1.5\n"),
            Err(TerminalError::Config(_))
        ));
        assert!(Config::from_yaml("tick_rate_ms: 0\n").is_err());
        assert!(Config::from_yaml("prompt: '  '\n").is_err());
        assert!(Config::from_yaml("tick_rate_ms: [1, 2]\n").is_err());
    }

    #[test]
    fn rejects_delays_past_the_upper_bound() {
        let mut config = Config::default();
        config.boot.line_delay_ms = u64::MAX / 2;
        assert!(matches!(config.validate(), Err(TerminalError::Config(_))));

        config.boot.line_delay_ms = MAX_DELAY_MS;
        assert!(config.validate().is_ok());

        assert!(Config::from_yaml("viewer:\n  fade_out_ms: 3600001\n").is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let mut config = Config::default();
        config.matrix.background_rain = true;
        let yaml = config.to_yaml().unwrap();
        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn loads_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prompt: \"guest@vibesec:~$\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.prompt, "guest@vibesec:~$");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
