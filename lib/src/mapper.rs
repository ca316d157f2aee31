//! Luminance mapper: image pixels to ASCII glyphs.

use image::{DynamicImage, GenericImageView, GrayImage};
use rayon::prelude::*;

use crate::config::AsciiConfig;
use crate::error::{Error, Result};
use crate::filters::{calculate_luminance, resample};
use crate::lut::GlyphRamp;

/// A block of ASCII art lines
///
/// Every line except possibly the last holds exactly `columns` glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiBlock {
    lines: Vec<String>,
    columns: u32,
}

impl AsciiBlock {
    /// Split a row-major glyph sequence into lines of `columns` glyphs
    ///
    /// A final remainder shorter than `columns` becomes a short last line.
    pub fn from_glyphs(glyphs: &[char], columns: u32) -> Self {
        let lines = glyphs
            .chunks(columns.max(1) as usize)
            .map(|chunk| chunk.iter().collect())
            .collect();
        Self { lines, columns }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Configured line length
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Length in glyphs of the longest line
    pub fn max_line_len(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Total number of glyphs
    pub fn glyph_count(&self) -> usize {
        self.lines.iter().map(|line| line.chars().count()).sum()
    }
}

impl std::fmt::Display for AsciiBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Compute the character grid for a source image
///
/// Columns always equal `target_width`, upsampling narrow sources. Rows are
/// `round(height / width * columns * aspect_compensation)`, at least 1.
pub fn target_dimensions(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    aspect_compensation: f32,
) -> Result<(u32, u32)> {
    if source_width == 0 || source_height == 0 {
        return Err(Error::EmptyImage {
            width: source_width,
            height: source_height,
        });
    }
    if target_width == 0 {
        return Err(Error::InvalidConfig("target_width must be positive".to_string()));
    }

    let columns = target_width;
    let aspect_ratio = source_height as f64 / source_width as f64;
    let rows = (aspect_ratio * columns as f64 * aspect_compensation as f64).round();
    let rows = (rows as u32).max(1);

    Ok((columns, rows))
}

/// Map every pixel of a grayscale image to a glyph, row-major
pub fn map_luminance(lum: &GrayImage, ramp: &GlyphRamp) -> Vec<char> {
    let table = ramp.lookup_table();
    let width = lum.width().max(1) as usize;

    // Rows are mapped in parallel and collected in order
    lum.as_raw()
        .par_chunks(width)
        .flat_map_iter(|row| row.iter().map(|&p| table[p as usize]))
        .collect()
}

/// Convert an image to an ASCII block
///
/// # Arguments
/// * `image` - Decoded source image with positive dimensions
/// * `config` - Target width, aspect compensation, filter and ramp
///
/// # Returns
/// `rows` lines of `columns` glyphs, see [`target_dimensions`]
pub fn map_image(image: &DynamicImage, config: &AsciiConfig) -> Result<AsciiBlock> {
    let (width, height) = image.dimensions();
    let (columns, rows) = target_dimensions(
        width,
        height,
        config.target_width,
        config.aspect_compensation,
    )?;
    log::debug!(
        "mapping {}x{} image to {}x{} characters",
        width,
        height,
        columns,
        rows
    );

    // Alpha is dropped, not composited
    let rgb = image.to_rgb8();
    let resized = resample(&rgb, columns, rows, config.filter);
    let lum = calculate_luminance(&resized);
    let glyphs = map_luminance(&lum, &config.effective_ramp());

    Ok(AsciiBlock::from_glyphs(&glyphs, columns))
}

/// Convert an image to ASCII text with the default settings
pub fn image_to_ascii(image: &DynamicImage, target_width: u32) -> Result<String> {
    let config = AsciiConfig {
        target_width,
        ..Default::default()
    };
    Ok(map_image(image, &config)?.to_string())
}
