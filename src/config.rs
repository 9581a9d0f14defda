//! Configuration loading and management
//!
//! Everything comes from `SLIDE_SWIPE_*` environment variables, falling back
//! to the defaults below.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;

use crate::gesture::{DEFAULT_COOLDOWN, DEFAULT_SWIPE_THRESHOLD};
use crate::hand::DetectorConfig;

const PREFIX: &str = "SLIDE_SWIPE_";

/// Controller configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Index of the capture device
    pub camera_index: u32,

    /// Confidence thresholds for the landmark source
    pub detector: DetectorConfig,

    /// Minimum travel of both fingertips, in scaled units
    pub swipe_threshold: f32,

    /// Minimum time between two key presses
    pub cooldown: Duration,

    /// Landmark trace to read instead of simulating, `-` for stdin
    pub landmarks: Option<PathBuf>,

    /// Run without a preview window
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: 0,
            detector: DetectorConfig::default(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            cooldown: DEFAULT_COOLDOWN,
            landmarks: None,
            headless: false,
        }
    }
}

/// Invalid configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}: cannot parse {value:?}")]
    Parse { key: String, value: String },

    #[error("{key}: {value} is out of range ({expected})")]
    OutOfRange {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// Without a window there is no pointer to simulate hands from
    #[error("SLIDE_SWIPE_HEADLESS requires SLIDE_SWIPE_LANDMARKS")]
    NoHandInput,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    /// Load configuration using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };
        let defaults = Self::default();

        let detection = vars.parse_or(
            "DETECTION_CONFIDENCE",
            defaults.detector.min_detection_confidence,
        )?;
        let tracking = vars.parse_or(
            "TRACKING_CONFIDENCE",
            defaults.detector.min_tracking_confidence,
        )?;
        for (name, value) in [
            ("DETECTION_CONFIDENCE", detection),
            ("TRACKING_CONFIDENCE", tracking),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(out_of_range(name, value, "0.0 to 1.0"));
            }
        }

        let swipe_threshold = vars.parse_or("THRESHOLD", defaults.swipe_threshold)?;
        if !(swipe_threshold > 0.0) {
            return Err(out_of_range("THRESHOLD", swipe_threshold, "greater than 0"));
        }

        let cooldown_ms = vars.parse_or("COOLDOWN_MS", defaults.cooldown.as_millis() as u64)?;

        let landmarks = vars.get("LANDMARKS").map(PathBuf::from);
        let headless = vars.flag("HEADLESS")?;
        if headless && landmarks.is_none() {
            return Err(ConfigError::NoHandInput);
        }

        Ok(Self {
            camera_index: vars.parse_or("CAMERA_INDEX", defaults.camera_index)?,
            detector: DetectorConfig {
                min_detection_confidence: detection,
                min_tracking_confidence: tracking,
            },
            swipe_threshold,
            cooldown: Duration::from_millis(cooldown_ms),
            landmarks,
            headless,
        })
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(&format!("{PREFIX}{name}"))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|_| ConfigError::Parse {
                key: format!("{PREFIX}{name}"),
                value,
            }),
        }
    }

    fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        match self.get(name).as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("0" | "false" | "no" | "off") => Ok(false),
            Some("1" | "true" | "yes" | "on") => Ok(true),
            Some(other) => Err(ConfigError::Parse {
                key: format!("{PREFIX}{name}"),
                value: other.to_string(),
            }),
        }
    }
}

fn out_of_range(name: &str, value: f32, expected: &'static str) -> ConfigError {
    ConfigError::OutOfRange {
        key: format!("{PREFIX}{name}"),
        value: value.to_string(),
        expected,
    }
}
