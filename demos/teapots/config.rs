use serde::Deserialize;

/// Tunables of the demo, read from a RON file next to the binary source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Initial window size in logical pixels.
    pub window_size: [u32; 2],
    /// Fixed ticks per second; the original runs its timer at 50.
    pub tick_rate: u32,
    /// How far `time` moves per tick and per manual step.
    pub playback_delta: f32,
    /// Endpoints the three curves interpolate between.
    pub start: [f32; 3],
    pub end: [f32; 3],
    /// Vertical spacing between the three teapots.
    pub vertical_offset: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_size: [1024, 720],
            tick_rate: 50,
            playback_delta: 0.01,
            start: [-8.0, -5.0, 0.0],
            end: [8.0, 5.0, 0.0],
            vertical_offset: 2.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file")]
    Parse(#[from] ron::error::SpannedError),
}

impl DemoConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Load the config, falling back to defaults if the file
    /// is missing or malformed.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Using default config: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: DemoConfig = ron::from_str("(tick_rate: 60)").expect("parse failed");
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.playback_delta, 0.01);
        assert_eq!(config.start, [-8.0, -5.0, 0.0]);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load_or_default("does/not/exist.ron");
        assert_eq!(config.tick_rate, 50);
    }
}
