//! Glyph ramps: the character lookup tables used for luminance mapping.
//!
//! A ramp is ordered from darkest to lightest. An 8-bit intensity `p`
//! selects `ramp[p * len / 256]`, so every glyph covers an equal share of
//! the intensity range.

use crate::error::{Error, Result};

/// Default ramp, 12 glyphs from darkest (`@`) to lightest (space)
pub const DEFAULT_RAMP: &str = "@0#Oo*+~=-. ";

/// Largest ramp the 8-bit bucket arithmetic can address
pub const MAX_RAMP_LEN: usize = 256;

/// An ordered set of glyphs representing discrete luminance buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_RAMP.chars().collect(),
        }
    }
}

impl GlyphRamp {
    /// Build a ramp from a string ordered dark to light
    ///
    /// Newlines are rejected since they would break the line structure
    /// of the output.
    pub fn new(glyphs: &str) -> Result<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(Error::InvalidConfig("glyph ramp must not be empty".to_string()));
        }
        if glyphs.len() > MAX_RAMP_LEN {
            return Err(Error::InvalidConfig(format!(
                "glyph ramp must have at most {} glyphs, got {}",
                MAX_RAMP_LEN,
                glyphs.len()
            )));
        }
        if glyphs.iter().any(|c| c.is_control()) {
            return Err(Error::InvalidConfig(
                "glyph ramp must not contain control characters".to_string(),
            ));
        }
        Ok(Self { glyphs })
    }

    /// Same glyphs, lightest first
    pub fn inverted(&self) -> Self {
        let mut glyphs = self.glyphs.clone();
        glyphs.reverse();
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Map an 8-bit intensity to its glyph
    pub fn glyph_for(&self, intensity: u8) -> char {
        let index = intensity as usize * self.glyphs.len() / 256;
        self.glyphs[index]
    }

    /// Precompute the glyph of every possible intensity
    pub fn lookup_table(&self) -> [char; 256] {
        let mut table = [' '; 256];
        for (intensity, slot) in table.iter_mut().enumerate() {
            *slot = self.glyph_for(intensity as u8);
        }
        table
    }
}

impl std::fmt::Display for GlyphRamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.glyphs {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
