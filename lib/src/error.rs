use std::path::PathBuf;

/// Errors produced while converting an image to ASCII art
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The decoded image has zero width or height
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The upload is not a JPEG or PNG file
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The upload claims a supported format but could not be decoded
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// A configuration parameter is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The monospaced font is not provisioned at the expected path
    #[error("monospaced font not found at {}", path.display())]
    FontMissing { path: PathBuf },

    #[error("font at {} could not be parsed", path.display())]
    FontInvalid { path: PathBuf },

    /// Glyph advances differ, so the character grid would not line up
    #[error("font at {} is not monospaced ('{narrow}' and '{wide}' have different advances)", path.display())]
    FontNotMonospace {
        path: PathBuf,
        narrow: char,
        wide: char,
    },

    /// The shared font cache already holds a different font
    #[error("font cache already holds {}, cannot switch to {}", cached.display(), requested.display())]
    FontPathConflict {
        cached: PathBuf,
        requested: PathBuf,
    },

    #[error("rendering failed: {0}")]
    Render(String),
}

/// Broad class of an [`Error`], used to decide how a failure is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad upload or bad parameters; the user can fix it and retry
    InputValidation,
    /// The deployment is missing or has a wrong font resource
    ResourceProvisioning,
    Rendering,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::EmptyImage { .. }
            | Error::UnsupportedFormat(_)
            | Error::Decode(_)
            | Error::InvalidConfig(_)
            | Error::Io(_) => ErrorCategory::InputValidation,
            Error::FontMissing { .. }
            | Error::FontInvalid { .. }
            | Error::FontNotMonospace { .. }
            | Error::FontPathConflict { .. } => ErrorCategory::ResourceProvisioning,
            Error::Render(_) => ErrorCategory::Rendering,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
