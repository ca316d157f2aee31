use std::path::{Path, PathBuf};

use eframe::egui;
use image::RgbImage;
use pixscii::config::UI_WIDTH_RANGE;
use pixscii::processor::ACCEPTED_EXTENSIONS;
use pixscii::{AsciiConfig, Conversion, GlyphRamp, ResampleFilter, handle_upload, load_upload};

/// The file the user picked, kept so parameter changes can re-run the pipeline
struct Upload {
    name: String,
    bytes: Vec<u8>,
}

/// Main application state for the image to ASCII GUI
pub struct PixsciiApp {
    /// Most recent upload
    upload: Option<Upload>,
    /// Outputs of the last successful conversion
    conversion: Option<Conversion>,
    /// Configuration parameters
    config: AsciiConfig,
    /// Ramp as typed by the user, applied once it parses
    ramp_text: String,

    /// Texture handle for the original image
    input_texture: Option<egui::TextureHandle>,
    /// Texture handle for the rasterized ASCII image
    output_texture: Option<egui::TextureHandle>,

    /// Whether to automatically reprocess when parameters change
    auto_process: bool,
    /// Flag indicating parameters have changed and reprocessing is needed
    needs_reprocess: bool,

    /// Last processing time in milliseconds
    last_process_time_ms: f64,
    /// Error message to display (if any)
    error_message: Option<String>,
}

impl PixsciiApp {
    /// Create a new application using the font at `font_path`
    pub fn new(_cc: &eframe::CreationContext<'_>, font_path: PathBuf) -> Self {
        let config = AsciiConfig {
            font_path,
            ..Default::default()
        };
        Self {
            upload: None,
            conversion: None,
            ramp_text: config.ramp.to_string(),
            config,
            input_texture: None,
            output_texture: None,
            auto_process: true,
            needs_reprocess: false,
            last_process_time_ms: 0.0,
            error_message: None,
        }
    }

    /// Load an upload from file path
    fn load_file(&mut self, path: &Path) {
        match load_upload(path) {
            Ok(bytes) => self.set_upload(path.display().to_string(), bytes),
            Err(e) => self.fail(format!("Failed to load image: {}", e)),
        }
    }

    fn set_upload(&mut self, name: String, bytes: Vec<u8>) {
        log::info!("upload {} ({} bytes)", name, bytes.len());
        self.upload = Some(Upload { name, bytes });
        self.needs_reprocess = true;
    }

    /// Drop all outputs and show an error; no partial results stay visible
    fn fail(&mut self, message: String) {
        log::warn!("{}", message);
        self.conversion = None;
        self.input_texture = None;
        self.output_texture = None;
        self.error_message = Some(message);
    }

    /// Save the rasterized ASCII image to file
    fn save_image(&self, path: &Path) -> Result<(), String> {
        match &self.conversion {
            Some(c) => c
                .rendered
                .save(path)
                .map_err(|e| format!("Failed to save: {}", e)),
            None => Err("No ASCII image to save".to_string()),
        }
    }

    /// Save the raw ASCII text to file
    fn save_text(&self, path: &Path) -> Result<(), String> {
        match &self.conversion {
            Some(c) => std::fs::write(path, c.text()).map_err(|e| format!("Failed to save: {}", e)),
            None => Err("No ASCII text to save".to_string()),
        }
    }

    /// Run the whole pipeline on the current upload
    fn process(&mut self, ctx: &egui::Context) {
        let Some(upload) = &self.upload else {
            return;
        };
        self.needs_reprocess = false;

        match handle_upload(&upload.bytes, &self.config) {
            Ok(conversion) => {
                self.last_process_time_ms = conversion.elapsed.as_secs_f64() * 1000.0;
                self.input_texture = Some(ctx.load_texture(
                    "original",
                    Self::rgba_to_color_image(&conversion.source.to_rgba8()),
                    egui::TextureOptions::default(),
                ));
                self.output_texture = Some(ctx.load_texture(
                    "ascii",
                    Self::rgb_to_color_image(&conversion.rendered),
                    egui::TextureOptions::default(),
                ));
                self.conversion = Some(conversion);
                self.error_message = None;
            }
            Err(e) => {
                let message = format!("{} ({:?}): {}", upload.name, e.category(), e);
                self.fail(message);
            }
        }
    }

    /// Render the control panel UI
    fn render_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) -> bool {
        let mut changed = false;

        ui.heading("Controls");
        ui.separator();

        if ui.button("Upload an image...").clicked()
            && let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &ACCEPTED_EXTENSIONS)
                .pick_file()
        {
            self.load_file(&path);
        }
        match &self.upload {
            Some(upload) => ui.label(&upload.name),
            None => ui.label("Drop a JPEG or PNG here"),
        };

        ui.add_space(8.0);

        // Mapping settings
        ui.collapsing("Mapping", |ui| {
            changed |= ui
                .add(
                    egui::Slider::new(&mut self.config.target_width, UI_WIDTH_RANGE)
                        .text("Width (chars)"),
                )
                .on_hover_text("Characters per line")
                .changed();

            changed |= ui
                .add(
                    egui::Slider::new(&mut self.config.aspect_compensation, 0.3..=1.2)
                        .text("Aspect"),
                )
                .on_hover_text("Height correction for text cells; depends on the font")
                .changed();

            egui::ComboBox::from_label("Resample")
                .selected_text(self.config.filter.name())
                .show_ui(ui, |ui| {
                    for filter in ResampleFilter::ALL {
                        changed |= ui
                            .selectable_value(&mut self.config.filter, filter, filter.name())
                            .changed();
                    }
                });

            changed |= ui
                .checkbox(&mut self.config.invert, "Invert")
                .on_hover_text("Lightest glyphs for dark pixels")
                .changed();

            ui.label("Glyph ramp (dark to light)");
            if ui
                .add(egui::TextEdit::singleline(&mut self.ramp_text).font(egui::TextStyle::Monospace))
                .changed()
            {
                match GlyphRamp::new(&self.ramp_text) {
                    Ok(ramp) => {
                        self.config.ramp = ramp;
                        changed = true;
                    }
                    Err(e) => self.error_message = Some(e.to_string()),
                }
            }
        });

        ui.add_space(8.0);

        // Rendering settings
        ui.collapsing("Rendering", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.config.font_size, 6.0..=32.0).text("Font Size"))
                .changed();

            changed |= ui
                .add(egui::Slider::new(&mut self.config.padding, 1..=64).text("Padding"))
                .changed();

            ui.horizontal(|ui| {
                changed |= ui.color_edit_button_srgb(&mut self.config.text_color).changed();
                ui.label("Text Color");
            });

            ui.horizontal(|ui| {
                changed |= ui.color_edit_button_srgb(&mut self.config.bg_color).changed();
                ui.label("Background Color");
            });
        });

        ui.add_space(16.0);
        ui.separator();

        // Auto-process toggle
        ui.checkbox(&mut self.auto_process, "Auto-process")
            .on_hover_text("Automatically reprocess when parameters change");

        // Manual process button
        ui.add_enabled_ui(self.upload.is_some(), |ui| {
            if ui.button("Process").clicked() {
                self.process(ctx);
            }
        });

        // Show processing time
        if self.last_process_time_ms > 0.0 {
            ui.label(format!("Last process: {:.1} ms", self.last_process_time_ms));
        }

        changed
    }

    /// Convert an RGBA image to egui ColorImage
    fn rgba_to_color_image(img: &image::RgbaImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], img.as_raw())
    }

    /// Convert an RGB image to egui ColorImage
    fn rgb_to_color_image(img: &RgbImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        egui::ColorImage::from_rgb([width as usize, height as usize], img.as_raw())
    }

    /// Display a texture scaled to the available space
    fn display_image(ui: &mut egui::Ui, texture: Option<&egui::TextureHandle>, label: &str) {
        ui.vertical(|ui| {
            ui.heading(label);

            if let Some(tex) = texture {
                let size = tex.size_vec2();
                let max_size = ui.available_size();
                // Allow upscaling for small images, but limit to reasonable max scale
                let scale = ((max_size.x / size.x).min(max_size.y / size.y)).min(4.0);
                let display_size = size * scale;

                ui.image((tex.id(), display_size));
                ui.label(format!("{}x{} (scale: {:.1}x)", size.x, size.y, scale));
            } else {
                ui.label("No image loaded");
            }
        });
    }

    /// Raw ASCII text with the copy affordance
    fn display_text(&self, ui: &mut egui::Ui) {
        let Some(conversion) = &self.conversion else {
            return;
        };
        let text = conversion.text();

        ui.horizontal(|ui| {
            ui.heading("ASCII Text");
            if ui.button("Copy to clipboard").clicked() {
                ui.ctx().copy_text(text.clone());
            }
            ui.label(format!(
                "{} lines x {} chars",
                conversion.ascii.line_count(),
                conversion.ascii.columns()
            ));
        });

        egui::ScrollArea::both()
            .id_salt("ascii_text")
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut text.as_str())
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                );
            });
    }
}

impl eframe::App for PixsciiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Dropped files act as uploads
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.into_iter().next() {
            if let Some(bytes) = file.bytes {
                self.set_upload(file.name, bytes.to_vec());
            } else if let Some(path) = file.path {
                self.load_file(&path);
            }
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &ACCEPTED_EXTENSIONS)
                            .pick_file()
                        {
                            self.load_file(&path);
                        }
                        ui.close();
                    }

                    if ui.button("Save ASCII Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PNG", &["png"])
                            .save_file()
                            && let Err(e) = self.save_image(&path)
                        {
                            self.error_message = Some(e);
                        }
                        ui.close();
                    }

                    if ui.button("Save ASCII Text...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Text", &["txt"])
                            .save_file()
                            && let Err(e) = self.save_text(&path)
                        {
                            self.error_message = Some(e);
                        }
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.error_message = Some(format!(
                            "pixscii\nImage to ASCII art\n\nFont: {}\nBuilt with Rust + egui",
                            self.config.font_path.display()
                        ));
                        ui.close();
                    }
                });
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let changed = self.render_controls(ui, ctx);

                    if changed {
                        self.needs_reprocess = true;
                    }
                });
            });

        // Each interaction re-runs the pipeline from the upload
        if self.auto_process && self.needs_reprocess {
            self.process(ctx);
        }

        // Central panel: outputs
        egui::CentralPanel::default().show(ctx, |ui| {
            // Show error message if any
            if let Some(msg) = &self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            // Display images side-by-side
            let images_height = ui.available_height() * 0.55;
            ui.horizontal(|ui| {
                let available_width = ui.available_width();
                let half_width = available_width / 2.0 - 8.0;

                ui.allocate_ui_with_layout(
                    egui::vec2(half_width, images_height),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        Self::display_image(ui, self.input_texture.as_ref(), "Original Image");
                    },
                );

                ui.separator();

                ui.allocate_ui_with_layout(
                    egui::vec2(half_width, images_height),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        Self::display_image(ui, self.output_texture.as_ref(), "ASCII Image");
                    },
                );
            });

            ui.separator();
            self.display_text(ui);
        });
    }
}
