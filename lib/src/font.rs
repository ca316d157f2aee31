//! Monospaced font loading and the process-wide font cache.
//!
//! The cache is a [`OnceLock`]: it is written once by the first successful
//! load and only read afterwards. Failed loads are not cached, so a missing
//! font fails the same way on every request.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};

use crate::error::{Error, Result};

/// Characters whose advances must agree for a font to count as monospaced
const MONOSPACE_SAMPLES: [char; 3] = ['i', 'W', '@'];

/// Wide character used to measure the glyph cell
pub const CELL_GLYPH: char = '@';

static SHARED_FONT: OnceLock<MonospaceFont> = OnceLock::new();

/// A parsed font that has passed the monospace check
#[derive(Clone)]
pub struct MonospaceFont {
    font: FontArc,
    path: PathBuf,
}

impl std::fmt::Debug for MonospaceFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonospaceFont")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl MonospaceFont {
    /// Load a font file from a local path
    ///
    /// No network fetch and no fallback font: a missing file is
    /// [`Error::FontMissing`].
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FontMissing {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_bytes(data, path)
    }

    /// Parse font data; `path` is only used for error messages
    pub fn from_bytes(data: Vec<u8>, path: &Path) -> Result<Self> {
        let font = FontArc::try_from_vec(data).map_err(|_| Error::FontInvalid {
            path: path.to_path_buf(),
        })?;

        let advances = MONOSPACE_SAMPLES.map(|c| (c, font.h_advance_unscaled(font.glyph_id(c))));
        check_monospace(&advances, path)?;

        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    /// Size of one character cell in pixels at `font_size`
    ///
    /// Width is the advance of [`CELL_GLYPH`], height is ascent minus
    /// descent, both rounded up.
    pub fn cell_size(&self, font_size: f32) -> (u32, u32) {
        let scaled = self.font.as_scaled(PxScale::from(font_size));
        let width = scaled.h_advance(scaled.glyph_id(CELL_GLYPH));
        let height = scaled.ascent() - scaled.descent();
        (ceil_px(width), ceil_px(height))
    }
}

/// Reject a font whose sample glyphs do not share one advance width
///
/// `advances` pairs each sample character with its unscaled advance.
fn check_monospace(advances: &[(char, f32)], path: &Path) -> Result<()> {
    let Some(&(narrow, reference)) = advances.first() else {
        return Ok(());
    };
    for &(wide, advance) in &advances[1..] {
        if (advance - reference).abs() > f32::EPSILON {
            log::warn!(
                "rejecting proportional font {} ('{}' advance {} vs '{}' advance {})",
                path.display(),
                narrow,
                reference,
                wide,
                advance
            );
            return Err(Error::FontNotMonospace {
                path: path.to_path_buf(),
                narrow,
                wide,
            });
        }
    }
    Ok(())
}

/// Round a pixel measure up, ignoring float noise just above an integer
fn ceil_px(value: f32) -> u32 {
    (value - 1e-3).ceil().max(0.0) as u32
}

/// Font shared by every request in the process
///
/// The first successful call loads `path`; later calls return the cached
/// font. Asking for a different path once a font is cached is an error.
pub fn shared_font(path: &Path) -> Result<&'static MonospaceFont> {
    if let Some(font) = SHARED_FONT.get() {
        return check_cached_path(font, path);
    }

    let loaded = MonospaceFont::load(path)?;
    log::info!("loaded monospaced font {}", path.display());
    // Another thread may have won the race; its font is kept.
    let font = SHARED_FONT.get_or_init(|| loaded);
    check_cached_path(font, path)
}

fn check_cached_path<'a>(font: &'a MonospaceFont, path: &Path) -> Result<&'a MonospaceFont> {
    if font.path() == path {
        Ok(font)
    } else {
        Err(Error::FontPathConflict {
            cached: font.path().to_path_buf(),
            requested: path.to_path_buf(),
        })
    }
}
