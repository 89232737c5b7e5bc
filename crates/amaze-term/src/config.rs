use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Longest delay between animation ticks.
pub const MAX_DELAY_MS: u64 = 2000;

/// Viewer settings, read from a YAML file.
///
/// ```yaml
/// delay_ms: 50
/// animate: true
/// glyphs:
///   wall: "#"
///   path: "*"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Milliseconds between two expansions while animating.
    pub delay_ms: u64,
    /// Animate the search instead of solving in one go.
    pub animate: bool,
    pub glyphs: Glyphs,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            delay_ms: 30,
            animate: true,
            glyphs: Glyphs::default(),
        }
    }
}

impl ViewConfig {
    /// Read a config file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(text)?;
        config.delay_ms = config.delay_ms.min(MAX_DELAY_MS);
        Ok(config)
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Characters used to draw each kind of cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub wall: char,
    pub open: char,
    pub frontier: char,
    pub settled: char,
    pub current: char,
    pub path: char,
    pub start: char,
    pub target: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            wall: '#',
            open: ' ',
            frontier: '+',
            settled: '.',
            current: '@',
            path: '*',
            start: 'S',
            target: 'T',
        }
    }
}
