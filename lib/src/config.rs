use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::filters::ResampleFilter;
use crate::lut::GlyphRamp;
use crate::raster::RasterOptions;

/// Font bundled with the repository, relative to the working directory
pub const DEFAULT_FONT_PATH: &str = "assets/fonts/DejaVuSansMono.ttf";

/// Range the UI offers for the target width
pub const UI_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 50..=400;

/// Configuration for ASCII art conversion
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Mapping
    pub target_width: u32, // characters per line, default 100
    /// Height correction for text cells being taller than wide.
    /// The right value depends on the font's cell aspect ratio.
    pub aspect_compensation: f32, // default 0.8
    pub filter: ResampleFilter,
    pub ramp: GlyphRamp,
    pub invert: bool, // lightest glyph for dark pixels

    /// Rendering
    pub font_path: PathBuf,
    pub font_size: f32, // pixels, default 14.0
    pub padding: u32,   // pixels around the text block, default 10

    /// Colors
    pub text_color: [u8; 3], // RGB, default black
    pub bg_color: [u8; 3],   // RGB, default white
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            // Mapping
            target_width: 100,
            aspect_compensation: 0.8,
            filter: ResampleFilter::default(),
            ramp: GlyphRamp::default(),
            invert: false,

            // Rendering
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_size: 14.0,
            padding: 10,

            // Colors
            text_color: [0, 0, 0],
            bg_color: [255, 255, 255],
        }
    }
}

impl AsciiConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.target_width < 1 || self.target_width > 2000 {
            return Err(Error::InvalidConfig(format!(
                "target_width must be between 1 and 2000, got {}",
                self.target_width
            )));
        }
        if !(0.1..=4.0).contains(&self.aspect_compensation) {
            return Err(Error::InvalidConfig(format!(
                "aspect_compensation must be between 0.1 and 4.0, got {}",
                self.aspect_compensation
            )));
        }
        if self.ramp.is_empty() {
            return Err(Error::InvalidConfig("glyph ramp must not be empty".to_string()));
        }
        if !(4.0..=128.0).contains(&self.font_size) {
            return Err(Error::InvalidConfig(format!(
                "font_size must be between 4 and 128, got {}",
                self.font_size
            )));
        }
        if self.padding < 1 || self.padding > 256 {
            return Err(Error::InvalidConfig(format!(
                "padding must be between 1 and 256, got {}",
                self.padding
            )));
        }
        Ok(())
    }

    /// Ramp after applying `invert`
    pub fn effective_ramp(&self) -> GlyphRamp {
        if self.invert {
            self.ramp.inverted()
        } else {
            self.ramp.clone()
        }
    }

    /// Options handed to the glyph rasterizer
    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            font_size: self.font_size,
            padding: self.padding,
            text_color: self.text_color,
            bg_color: self.bg_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AsciiConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ui_range_is_valid() {
        let mut config = AsciiConfig::default();
        for width in [*UI_WIDTH_RANGE.start(), *UI_WIDTH_RANGE.end()] {
            config.target_width = width;
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_invalid_target_width() {
        let mut config = AsciiConfig::default();
        config.target_width = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.target_width = 2001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_aspect_compensation() {
        let mut config = AsciiConfig::default();
        config.aspect_compensation = 0.0;
        assert!(config.validate().is_err());

        config.aspect_compensation = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_raster_settings() {
        let mut config = AsciiConfig::default();
        config.padding = 0;
        assert!(config.validate().is_err());

        let mut config = AsciiConfig::default();
        config.font_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_ramp_inverts() {
        let config = AsciiConfig {
            invert: true,
            ..Default::default()
        };
        assert_eq!(config.effective_ramp().glyph_for(0), ' ');
    }

    #[test]
    fn test_raster_options_follow_config() {
        let config = AsciiConfig {
            font_size: 20.0,
            padding: 4,
            ..Default::default()
        };
        let options = config.raster_options();
        assert_eq!(options.font_size, 20.0);
        assert_eq!(options.padding, 4);
        assert_eq!(options.bg_color, [255, 255, 255]);
    }
}
