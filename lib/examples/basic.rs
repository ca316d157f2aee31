/// Basic example: Convert a simple test image to ASCII art
///
/// This creates a test image with some basic shapes, prints the ASCII text
/// and saves the re-rendered glyph image next to the input.
use pixscii::{AsciiConfig, MonospaceFont, convert};
use image::{DynamicImage, Rgb, RgbImage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("pixscii - Basic Example");
    println!("=======================\n");

    // Gray background with a white disc and a dark ring
    let width = 320;
    let height = 240;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 80.0;

    let img = RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist < radius {
            Rgb([255, 255, 255])
        } else if (dist - radius).abs() < 10.0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([100, 100, 100])
        }
    });

    println!("Created test image: {}x{}", width, height);

    let config = AsciiConfig {
        target_width: 60,
        font_path: concat!(env!("CARGO_MANIFEST_DIR"), "/../assets/fonts/DejaVuSansMono.ttf").into(),
        ..Default::default()
    };

    println!("Processing with config:");
    println!("  - Target width: {}", config.target_width);
    println!("  - Aspect compensation: {}", config.aspect_compensation);
    println!("  - Filter: {}", config.filter.name());
    println!();

    let font = MonospaceFont::load(&config.font_path)?;
    let input = DynamicImage::ImageRgb8(img);
    input.save("basic_input.png")?;

    let conversion = convert(input, &config, &font)?;
    println!("{}\n", conversion.ascii);

    conversion.rendered.save("basic_output.png")?;

    println!("✓ Saved input to:  basic_input.png");
    println!("✓ Saved output to: basic_output.png");
    println!("\nASCII conversion complete!");
    Ok(())
}
