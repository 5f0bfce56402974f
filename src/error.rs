use thiserror::Error;

#[derive(Error, Debug)]
pub enum LovecertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Photo too large: {size} bytes (limit {limit})")]
    PhotoTooLarge { size: u64, limit: u64 },

    #[error("Unsupported photo type: {0}")]
    UnsupportedPhoto(String),

    #[error("SVG error: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("Could not allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Capture failed: {0}")]
    Capture(String),
}

pub type Result<T> = std::result::Result<T, LovecertError>;
