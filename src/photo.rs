use crate::error::{LovecertError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::ImageFormat;
use log::{debug, info};
use std::path::Path;

/// Zugelassene Bildformate (werden vom Inhalt erkannt, nicht von der Endung)
const ALLOWED: [ImageFormat; 4] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Ein hochgeladenes Foto als Data-URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAsset {
    data_uri: String,
    format: ImageFormat,
    size: usize,
}

impl PhotoAsset {
    /// Prüft Größe und Typ und kodiert das Bild als Data-URI
    pub fn from_bytes(bytes: &[u8], max_bytes: u64) -> Result<Self> {
        let size = bytes.len() as u64;
        if size > max_bytes {
            return Err(LovecertError::PhotoTooLarge {
                size,
                limit: max_bytes,
            });
        }

        let format = image::guess_format(bytes)
            .map_err(|_| LovecertError::UnsupportedPhoto("unrecognised data".to_string()))?;
        if !ALLOWED.contains(&format) {
            return Err(LovecertError::UnsupportedPhoto(format!("{:?}", format)));
        }

        let data_uri = format!("data:{};base64,{}", format.to_mime_type(), BASE64.encode(bytes));
        debug!("Photo accepted: {:?}, {} bytes", format, size);

        Ok(Self {
            data_uri,
            format,
            size: bytes.len(),
        })
    }

    /// Liest ein Foto von der Platte
    pub fn from_file(path: impl AsRef<Path>, max_bytes: u64) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading photo: {}", path.display());

        // Zu große Dateien gar nicht erst einlesen
        let size = std::fs::metadata(path)?.len();
        if size > max_bytes {
            return Err(LovecertError::PhotoTooLarge {
                size,
                limit: max_bytes,
            });
        }

        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, max_bytes)
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn size(&self) -> usize {
        self.size
    }
}
