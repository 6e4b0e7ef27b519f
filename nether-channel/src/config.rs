//! Channel evaluation options
//!
//! Loaded from TOML, typically a `[channels]`-free file such as:
//!
//! ```toml
//! disable_camera_cuts = false
//! only_cut_camera1 = false
//! debug_camera_cuts_verbose = true
//!
//! [camera_cut]
//! epsilon = 0.00001
//! delta = 0.4
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Options consulted on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChannelOptions {
    /// Skip camera-cut detection entirely (default: false)
    #[serde(default)]
    pub disable_camera_cuts: bool,
    /// Snap only the camera reference channel itself on a cut (default: false)
    #[serde(default)]
    pub only_cut_camera1: bool,
    /// Log every detected cut at debug level instead of trace (default: false)
    #[serde(default)]
    pub debug_camera_cuts_verbose: bool,
    /// Cut detection thresholds
    #[serde(default)]
    pub camera_cut: CameraCutThresholds,
}

/// Thresholds for detecting a step in a camera channel's scale Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraCutThresholds {
    /// Interpolated values within this distance of 0 or 1 are not mid-ramp (default: 1e-5)
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
    /// Minimum keyframe-to-keyframe change that counts as a step (default: 0.4)
    #[serde(default = "default_delta")]
    pub delta: f32,
}

fn default_epsilon() -> f32 {
    0.00001
}
fn default_delta() -> f32 {
    0.4
}

impl Default for CameraCutThresholds {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            delta: default_delta(),
        }
    }
}

/// Errors loading [`ChannelOptions`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read channel options: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse channel options: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ChannelOptions {
    /// Parse options from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse an options file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Read an options file, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!("Using default channel options ({:?}): {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = ChannelOptions::default();
        assert!(!options.disable_camera_cuts);
        assert!(!options.only_cut_camera1);
        assert_eq!(options.camera_cut.epsilon, 0.00001);
        assert_eq!(options.camera_cut.delta, 0.4);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let options = ChannelOptions::from_toml_str("").unwrap();
        assert_eq!(options, ChannelOptions::default());
    }

    #[test]
    fn test_partial_toml() {
        let options = ChannelOptions::from_toml_str(
            "disable_camera_cuts = true\n[camera_cut]\ndelta = 0.25\n",
        )
        .unwrap();
        assert!(options.disable_camera_cuts);
        assert_eq!(options.camera_cut.delta, 0.25);
        assert_eq!(options.camera_cut.epsilon, 0.00001);
    }

    #[test]
    fn test_invalid_toml() {
        let result = ChannelOptions::from_toml_str("disable_camera_cuts = \"yes\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "only_cut_camera1 = true").unwrap();

        let options = ChannelOptions::load(file.path()).unwrap();
        assert!(options.only_cut_camera1);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = ChannelOptions::load_or_default(&dir.path().join("missing.toml"));
        assert_eq!(options, ChannelOptions::default());
    }
}
