use ab_glyph::PxScale;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::error::{Error, Result};
use crate::font::MonospaceFont;

/// Largest canvas the rasterizer will allocate, in pixels (width × height)
///
/// 2^27 pixels is 384 MiB of RGB data. Either side may be long as long as
/// the area stays within the budget.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 27;

/// Settings for drawing ASCII text into a bitmap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub font_size: f32,
    pub padding: u32,
    pub text_color: [u8; 3],
    pub bg_color: [u8; 3],
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            padding: 10,
            text_color: [0, 0, 0],
            bg_color: [255, 255, 255],
        }
    }
}

/// Canvas size for `line_count` lines of at most `max_line_len` glyphs
///
/// `width = cell_w * max_line_len + 2 * padding`,
/// `height = cell_h * line_count + 2 * padding`. Fails with
/// [`Error::Render`] when a side overflows `u32` or the area exceeds
/// [`MAX_CANVAS_PIXELS`].
pub fn canvas_size(
    cell: (u32, u32),
    max_line_len: usize,
    line_count: usize,
    padding: u32,
) -> Result<(u32, u32)> {
    let side = |cells: usize, cell_px: u32| -> Option<u32> {
        let cells = u32::try_from(cells).ok()?;
        cell_px.checked_mul(cells)?.checked_add(padding.checked_mul(2)?)
    };

    match (side(max_line_len, cell.0), side(line_count, cell.1)) {
        (Some(w), Some(h)) if u64::from(w) * u64::from(h) <= MAX_CANVAS_PIXELS => Ok((w, h)),
        _ => Err(Error::Render(format!(
            "{} lines of {} glyphs exceed the {} pixel canvas limit",
            line_count, max_line_len, MAX_CANVAS_PIXELS
        ))),
    }
}

/// Render ASCII text to an image with a monospaced font
///
/// # Arguments
/// * `text` - Lines separated by `\n`; empty text is a single empty line
/// * `font` - Monospaced font used for every glyph
/// * `options` - Font size, padding and colors
///
/// # Returns
/// RGB image with each line drawn left-aligned at
/// `(padding, padding + index * cell_height)`
pub fn rasterize(text: &str, font: &MonospaceFont, options: &RasterOptions) -> Result<RgbImage> {
    if !(options.font_size.is_finite() && options.font_size > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "font_size must be positive, got {}",
            options.font_size
        )));
    }
    if options.padding == 0 {
        return Err(Error::InvalidConfig("padding must be positive".to_string()));
    }

    // str::split yields one empty line for empty text
    let lines: Vec<&str> = text.split('\n').collect();
    let max_line_len = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let (cell_w, cell_h) = font.cell_size(options.font_size);
    if cell_w == 0 || cell_h == 0 {
        return Err(Error::Render(format!(
            "font {} has an empty glyph cell at {}px",
            font.path().display(),
            options.font_size
        )));
    }

    let (width, height) = canvas_size((cell_w, cell_h), max_line_len, lines.len(), options.padding)?;
    log::debug!(
        "rasterizing {} lines into {}x{} canvas (cell {}x{})",
        lines.len(),
        width,
        height,
        cell_w,
        cell_h
    );

    let mut output = RgbImage::from_pixel(width, height, Rgb(options.bg_color));
    let color = Rgb(options.text_color);
    let scale = PxScale::from(options.font_size);

    for (index, line) in lines.iter().enumerate() {
        if line.trim_end().is_empty() {
            continue;
        }
        let x = options.padding as i32;
        let y = (options.padding + index as u32 * cell_h) as i32;
        draw_text_mut(&mut output, color, x, y, scale, font.font(), line);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::bundled_font;

    fn options() -> RasterOptions {
        RasterOptions::default()
    }

    #[test]
    fn test_canvas_dimensions() {
        let font = bundled_font();
        let (cw, ch) = font.cell_size(14.0);
        let img = rasterize("@@@@\n@@\n@", &font, &options()).unwrap();
        assert_eq!(img.dimensions(), (cw * 4 + 20, ch * 3 + 20));
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let font = bundled_font();
        let (_, ch) = font.cell_size(14.0);
        let img = rasterize("", &font, &options()).unwrap();
        assert_eq!(img.dimensions(), (20, ch + 20));
        assert!(img.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_spaces_leave_background() {
        let font = bundled_font();
        let img = rasterize("    \n    ", &font, &options()).unwrap();
        assert!(img.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_glyphs_are_drawn_inside_padding() {
        let font = bundled_font();
        let opts = RasterOptions {
            text_color: [255, 0, 0],
            bg_color: [0, 0, 0],
            ..options()
        };
        let img = rasterize("@@@", &font, &opts).unwrap();
        let (w, h) = img.dimensions();

        let inked = img.enumerate_pixels().filter(|(_, _, p)| p[0] > 0).count();
        assert!(inked > 0);

        // The outer half of the padding stays background
        let margin = opts.padding / 2;
        for (x, y, p) in img.enumerate_pixels() {
            if x < margin || y < margin || x >= w - margin || y >= h - margin {
                assert_eq!(*p, Rgb([0, 0, 0]), "ink at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_rasterize_is_deterministic() {
        let font = bundled_font();
        let text = "@0#Oo*\n+~=-. ";
        let a = rasterize(text, &font, &options()).unwrap();
        let b = rasterize(text, &font, &options()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_options() {
        let font = bundled_font();
        let zero_padding = RasterOptions {
            padding: 0,
            ..options()
        };
        assert!(matches!(
            rasterize("@", &font, &zero_padding),
            Err(Error::InvalidConfig(_))
        ));

        let zero_size = RasterOptions {
            font_size: 0.0,
            ..options()
        };
        assert!(rasterize("@", &font, &zero_size).is_err());
    }

    #[test]
    fn test_canvas_limit() {
        assert_eq!(canvas_size((8, 14), 100, 60, 10).unwrap(), (820, 860));

        // 3220 x 42020 is just over the pixel budget
        let err = canvas_size((8, 14), 400, 3000, 10).unwrap_err();
        assert!(matches!(err, Error::Render(_)));

        let err = canvas_size((u32::MAX, 14), 2, 1, 10).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn test_tall_canvas_within_budget() {
        // A 1000x6000 portrait at width 400 and 0.8 compensation
        assert_eq!(canvas_size((8, 14), 400, 1920, 10).unwrap(), (3220, 26900));

        // Narrow but very tall grids only count their area
        let (w, h) = canvas_size((8, 14), 50, 3000, 10).unwrap();
        assert_eq!((w, h), (420, 42020));
        assert!(h > 32_768);
    }
}
