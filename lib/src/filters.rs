use image::{GrayImage, Luma, RgbImage, imageops};

/// Resampling filter used when shrinking the source to the character grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    /// Bicubic
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub const ALL: [ResampleFilter; 5] = [
        ResampleFilter::Nearest,
        ResampleFilter::Triangle,
        ResampleFilter::CatmullRom,
        ResampleFilter::Gaussian,
        ResampleFilter::Lanczos3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "Nearest",
            ResampleFilter::Triangle => "Bilinear",
            ResampleFilter::CatmullRom => "Bicubic",
            ResampleFilter::Gaussian => "Gaussian",
            ResampleFilter::Lanczos3 => "Lanczos3",
        }
    }

    fn filter_type(self) -> imageops::FilterType {
        match self {
            ResampleFilter::Nearest => imageops::FilterType::Nearest,
            ResampleFilter::Triangle => imageops::FilterType::Triangle,
            ResampleFilter::CatmullRom => imageops::FilterType::CatmullRom,
            ResampleFilter::Gaussian => imageops::FilterType::Gaussian,
            ResampleFilter::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// Resample an RGB image to exactly `width` x `height`
///
/// Resampling to the current size returns an exact copy.
pub fn resample(img: &RgbImage, width: u32, height: u32, filter: ResampleFilter) -> RgbImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, filter.filter_type())
}

/// Calculate 8-bit luma from an RGB image
///
/// Formula: L = (299*R + 587*G + 114*B) / 1000, rounded (ITU-R BT.601).
/// Pure black maps to 0 and pure white to 255.
pub fn calculate_luminance(img: &RgbImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let r = pixel[0] as u32;
        let g = pixel[1] as u32;
        let b = pixel[2] as u32;
        let luma = (299 * r + 587 * g + 114 * b + 500) / 1000;
        output.put_pixel(x, y, Luma([luma as u8]));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_luminance_extremes() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));

        let lum = calculate_luminance(&img);
        assert_eq!(lum.get_pixel(0, 0)[0], 0);
        assert_eq!(lum.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn test_luminance_weights() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(2, 0, Rgb([0, 0, 255]));

        let lum = calculate_luminance(&img);
        assert_eq!(lum.get_pixel(0, 0)[0], 76);
        assert_eq!(lum.get_pixel(1, 0)[0], 150);
        assert_eq!(lum.get_pixel(2, 0)[0], 29);
    }

    #[test]
    fn test_resample_same_size_is_copy() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(1, 1, Rgb([10, 20, 30]));
        let out = resample(&img, 2, 2, ResampleFilter::Lanczos3);
        assert_eq!(out, img);
    }

    #[test]
    fn test_resample_dimensions() {
        let img = RgbImage::from_pixel(100, 60, Rgb([128, 128, 128]));
        for filter in ResampleFilter::ALL {
            let out = resample(&img, 25, 9, filter);
            assert_eq!(out.dimensions(), (25, 9));
        }
    }
}
