use std::io::Cursor;
use std::path::Path;
use std::time::{Duration, Instant};

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, RgbImage};

use crate::config::AsciiConfig;
use crate::error::{Error, Result};
use crate::font::{MonospaceFont, shared_font};
use crate::mapper::{AsciiBlock, map_image};
use crate::raster::rasterize;

/// Formats accepted as uploads
pub const ACCEPTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

/// File extensions offered by upload dialogs
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Everything one conversion request produces
#[derive(Debug, Clone)]
pub struct Conversion {
    pub source: DynamicImage,
    pub ascii: AsciiBlock,
    pub rendered: RgbImage,
    pub elapsed: Duration,
}

impl Conversion {
    /// Raw ASCII text, newline-joined
    pub fn text(&self) -> String {
        self.ascii.to_string()
    }
}

/// Read an uploaded file into memory
pub fn load_upload(path: &Path) -> Result<Vec<u8>> {
    Ok(std::fs::read(path)?)
}

/// Decode an uploaded JPEG or PNG
///
/// The format is sniffed from the data, not taken from a file name.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    match reader.format() {
        Some(format) if ACCEPTED_FORMATS.contains(&format) => {}
        Some(format) => return Err(Error::UnsupportedFormat(format!("{format:?}"))),
        None => return Err(Error::UnsupportedFormat("unrecognized data".to_string())),
    }

    let image = reader.decode()?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    Ok(image)
}

/// Run the pipeline on a decoded image with an explicit font
///
/// Maps the image to ASCII text and rasterizes that text. Either both
/// outputs are produced or the first error is returned.
pub fn convert(
    image: DynamicImage,
    config: &AsciiConfig,
    font: &MonospaceFont,
) -> Result<Conversion> {
    config.validate()?;
    let start = Instant::now();

    let ascii = map_image(&image, config)?;
    let rendered = rasterize(&ascii.to_string(), font, &config.raster_options())?;
    let elapsed = start.elapsed();

    log::info!(
        "converted {}x{} image to {} lines of {} glyphs in {:.1} ms",
        image.width(),
        image.height(),
        ascii.line_count(),
        ascii.columns(),
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(Conversion {
        source: image,
        ascii,
        rendered,
        elapsed,
    })
}

/// Handle one upload: decode, map, rasterize
///
/// Invoked once per user interaction. Nothing is retained between calls
/// except the shared font, loaded from `config.font_path` on first use.
/// The config is validated by [`convert`] before any mapping work.
pub fn handle_upload(bytes: &[u8], config: &AsciiConfig) -> Result<Conversion> {
    let image = decode_image(bytes)?;
    log::debug!(
        "decoded upload: {}x{} {:?}",
        image.width(),
        image.height(),
        image.color()
    );
    let font = shared_font(&config.font_path)?;
    convert(image, config, font)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::{bundled_font, bundled_font_path};
    use image::{Rgb, RgbImage};

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(160, 120, |x, y| {
            if (x / 20 + y / 20) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        }))
    }

    fn test_config() -> AsciiConfig {
        AsciiConfig {
            target_width: 80,
            font_path: bundled_font_path(),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_png_and_jpeg() {
        let image = sample_image();
        for format in ACCEPTED_FORMATS {
            let decoded = decode_image(&encode(&image, format)).unwrap();
            assert_eq!(decoded.dimensions(), (160, 120));
        }
    }

    #[test]
    fn test_decode_rejects_other_formats() {
        let bytes = encode(&sample_image(), ImageFormat::Bmp);
        assert!(matches!(
            decode_image(&bytes),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode(&sample_image(), ImageFormat::Png);
        let err = decode_image(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_convert_round_trip_structure() {
        let font = bundled_font();
        let config = test_config();
        let conversion = convert(sample_image(), &config, &font).unwrap();

        let (cw, ch) = font.cell_size(config.font_size);
        let lines = conversion.ascii.line_count() as u32;
        assert_eq!(lines, 48);
        assert_eq!(
            conversion.rendered.dimensions(),
            (cw * 80 + 2 * config.padding, ch * lines + 2 * config.padding)
        );
        assert_eq!(conversion.text().lines().count(), lines as usize);
    }

    #[test]
    fn test_convert_rejects_invalid_config() {
        let font = bundled_font();
        let config = AsciiConfig {
            target_width: 0,
            ..test_config()
        };
        assert!(matches!(
            convert(sample_image(), &config, &font),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_handle_upload() {
        let bytes = encode(&sample_image(), ImageFormat::Png);
        let conversion = handle_upload(&bytes, &test_config()).unwrap();
        assert_eq!(conversion.source.dimensions(), (160, 120));
        assert_eq!(conversion.ascii.columns(), 80);
    }

    #[test]
    fn test_handle_upload_rejects_invalid_config() {
        let bytes = encode(&sample_image(), ImageFormat::Png);
        for config in [
            AsciiConfig {
                target_width: 0,
                ..test_config()
            },
            AsciiConfig {
                padding: 0,
                ..test_config()
            },
        ] {
            let err = handle_upload(&bytes, &config).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)), "got {err:?}");
        }
    }

    #[test]
    fn test_handle_upload_missing_font() {
        let bytes = encode(&sample_image(), ImageFormat::Png);
        let config = AsciiConfig {
            font_path: "no/such/font.ttf".into(),
            ..test_config()
        };
        for _ in 0..2 {
            let err = handle_upload(&bytes, &config).unwrap_err();
            assert_eq!(
                err.category(),
                crate::error::ErrorCategory::ResourceProvisioning
            );
        }
    }

    #[test]
    fn test_load_upload_missing_file() {
        let err = load_upload(Path::new("no/such/upload.png")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
