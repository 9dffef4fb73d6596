use serde::{Deserialize, Serialize};

/// Hard cap on markers per floor plan.
pub const MAX_MARKERS: usize = 20;

/// Pointer travel (per axis, in pixels) at which a press stops being a click.
pub const CLICK_SLOP_PX: f64 = 10.0;

/// Container height used until the image reports its natural size.
pub const FALLBACK_HEIGHT_PX: f64 = 400.0;

pub const DEFAULT_TITLE: &str = "間取り図";
pub const DEFAULT_IMAGE_URL: &str = "/static/floorplan.jpg";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidCount { key: &'static str, value: String },
    #[error("{key} must be a non-negative number, got {value:?}")]
    InvalidPixels { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    pub title: String,
    pub image_url: String,
    pub max_markers: usize,
    pub click_slop_px: f64,
    pub fallback_height_px: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            max_markers: MAX_MARKERS,
            click_slop_px: CLICK_SLOP_PX,
            fallback_height_px: FALLBACK_HEIGHT_PX,
        }
    }
}

impl ViewerConfig {
    /// Build a config from `FLOORPLAN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(title) = lookup("FLOORPLAN_TITLE") {
            config.title = title;
        }
        if let Some(url) = lookup("FLOORPLAN_IMAGE_URL") {
            config.image_url = url;
        }
        if let Some(raw) = lookup("FLOORPLAN_MAX_MARKERS") {
            config.max_markers = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidCount {
                        key: "FLOORPLAN_MAX_MARKERS",
                        value: raw,
                    })
                }
            };
        }
        if let Some(raw) = lookup("FLOORPLAN_CLICK_SLOP_PX") {
            config.click_slop_px = match raw.trim().parse::<f64>() {
                Ok(px) if px.is_finite() && px >= 0.0 => px,
                _ => {
                    return Err(ConfigError::InvalidPixels {
                        key: "FLOORPLAN_CLICK_SLOP_PX",
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }
}
