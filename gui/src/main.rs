mod app;

use std::path::PathBuf;

use app::PixsciiApp;
use eframe::egui;

/// Environment variable overriding the bundled font location
const FONT_ENV: &str = "PIXSCII_FONT";

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();

    let font_path = std::env::var_os(FONT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(pixscii::config::DEFAULT_FONT_PATH));
    if !font_path.exists() {
        // Conversions will fail until the font is provisioned
        log::error!("monospaced font not found at {}", font_path.display());
    }

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Image -> ASCII Art")
            .with_icon(load_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "pixscii",
        options,
        Box::new(move |cc| Ok(Box::new(PixsciiApp::new(cc, font_path)))),
    )
}

/// Load application icon
fn load_icon() -> egui::IconData {
    // 32x32: dark '@'-like ring on a light background
    let icon_size = 32;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;
            let dx = x as i32 - 16;
            let dy = y as i32 - 16;
            let dist_sq = dx * dx + dy * dy;

            let is_ink = (100..=196).contains(&dist_sq) || dist_sq <= 16;
            let value = if is_ink { 20 } else { 235 };

            pixels[idx] = value; // R
            pixels[idx + 1] = value; // G
            pixels[idx + 2] = value; // B
            pixels[idx + 3] = 255; // A
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
