use serde::{Deserialize, Serialize};

use crate::error::{MeshwireError, MeshwireResult};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frame rate given to clips created while recording.
    pub default_framerate: u32,
    pub clip_name: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            default_framerate: 30,
            clip_name: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub play: bool,
    pub repetitions: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            play: true,
            repetitions: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub framerate: u32,
    pub crf: u32,
    pub preset: String, // libx264 preset name
    pub overwrite: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            framerate: 60,
            crf: 18,
            preset: "slow".to_string(),
            overwrite: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MeshwireConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl MeshwireConfig {
    pub fn from_toml_str(contents: &str) -> MeshwireResult<Self> {
        toml::from_str(contents).map_err(|e| MeshwireError::Config(e.to_string()))
    }

    pub fn load_from_file(path: &std::path::Path) -> MeshwireResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> MeshwireResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| MeshwireError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MeshwireConfig::default();
        assert_eq!(config.animation.default_framerate, 30);
        assert_eq!(config.animation.clip_name, "default");
        assert!(config.playback.play);
        assert_eq!(config.playback.repetitions, 1);
        assert_eq!(config.export.framerate, 60);
        assert_eq!(config.export.crf, 18);
        assert!(!config.export.overwrite);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MeshwireConfig::from_toml_str(
            r#"
            [playback]
            play = false
            repetitions = 3
            "#,
        )
        .unwrap();
        assert!(!config.playback.play);
        assert_eq!(config.playback.repetitions, 3);
        assert_eq!(config.animation.default_framerate, 30);
    }

    #[test]
    fn test_section_with_missing_key_keeps_defaults() {
        let config =
            MeshwireConfig::from_toml_str("[animation]\ndefault_framerate = 12\n").unwrap();
        assert_eq!(config.animation.default_framerate, 12);
        assert_eq!(config.animation.clip_name, "default");

        let config = MeshwireConfig::from_toml_str("[export]\ncrf = 23\n").unwrap();
        assert_eq!(config.export.crf, 23);
        assert_eq!(config.export.framerate, 60);
        assert_eq!(config.export.preset, "slow");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = MeshwireConfig::from_toml_str("[animation]\ndefault_framerate = \"fast\"").unwrap_err();
        assert!(matches!(err, MeshwireError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meshwire.toml");
        let mut config = MeshwireConfig::default();
        config.export.preset = "fast".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = MeshwireConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.export.preset, "fast");
    }
}
