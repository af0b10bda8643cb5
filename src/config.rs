//! Visualizer configuration
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! scale_rule = "classic"   # or "contain"
//! utm_zone = 15            # omit to derive the zone per shape
//!
//! [viewport]
//! width = 800
//! height = 600
//! margin = 25
//!
//! [pen]
//! color = "black"
//! width = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geo::{ScaleRule, UtmProjector, Viewport};
use crate::render::{Pen, Pipeline};
use crate::{FieldVizError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenConfig {
    /// Any CSS color
    pub color: String,
    pub width: u32,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            width: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: Viewport,
    pub pen: PenConfig,
    pub scale_rule: ScaleRule,
    pub utm_zone: Option<u8>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml_edit::de::from_str(text)
            .map_err(|e| FieldVizError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FieldVizError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that the pen, zone and viewport resolve
    pub fn validate(&self) -> Result<()> {
        self.pen()?;
        self.pipeline()?;
        let Viewport {
            width,
            height,
            margin,
        } = self.viewport;
        if !(width.is_finite() && height.is_finite() && margin.is_finite()) || margin < 0.0 {
            return Err(FieldVizError::ConfigError(format!(
                "Invalid viewport {}x{} with margin {}",
                width, height, margin
            )));
        }
        Ok(())
    }

    pub fn pen(&self) -> Result<Pen> {
        Pen::parse(&self.pen.color, self.pen.width)
    }

    pub fn pipeline(&self) -> Result<Pipeline> {
        let projector = match self.utm_zone {
            Some(zone) => UtmProjector::with_zone(zone)?,
            None => UtmProjector::new(),
        };
        Ok(Pipeline {
            projector,
            viewport: self.viewport,
            rule: self.scale_rule,
        })
    }
}
