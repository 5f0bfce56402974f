use crate::error::Result;
use crate::template::TemplateId;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Laufzeit-Konfiguration, optional aus einer JSON-Datei geladen.
///
/// Fehlende Felder fallen auf die Defaults zurück.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AppConfig {
    /// Skalierung beim Rastern (2.0 = doppelte Auflösung)
    pub scale: f32,

    /// Präfix der exportierten Dateinamen
    pub filename_prefix: String,

    /// Maximale Größe eines Fotos in Bytes
    pub max_photo_bytes: u64,

    /// Erlaubte Schemata für Verifikations-Links
    pub link_schemes: Vec<String>,

    /// Schriftfamilie für alle Texte
    pub font_family: String,

    /// Systemschriften laden (für CJK-Glyphen nötig)
    pub load_system_fonts: bool,

    /// Vorlage, wenn keine explizit gewählt wurde
    pub template: TemplateId,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            filename_prefix: "婚姻证书".to_string(),
            max_photo_bytes: 5 * 1024 * 1024,
            link_schemes: vec!["http".to_string(), "https".to_string()],
            font_family: "Noto Serif CJK SC".to_string(),
            load_system_fonts: true,
            template: TemplateId::default(),
        }
    }
}

impl AppConfig {
    /// Lädt die Konfiguration aus einer JSON-Datei
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Datei laden, falls angegeben, sonst Defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.link_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.scale, 2.0);
        assert_eq!(config.filename_prefix, "婚姻证书");
        assert!(config.allows_scheme("https"));
        assert!(config.allows_scheme("HTTP"));
        assert!(!config.allows_scheme("javascript"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "scale": 1.0, "filename_prefix": "cert" }}"#).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.filename_prefix, "cert");
        assert_eq!(config.max_photo_bytes, 5 * 1024 * 1024);
        assert_eq!(config.template, TemplateId::Traditional);
    }

    #[test]
    fn test_default_template() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "template": "vintage" }}"#).unwrap();
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.template, TemplateId::Vintage);

        let mut unknown = tempfile::NamedTempFile::new().unwrap();
        write!(unknown, r#"{{ "template": "baroque" }}"#).unwrap();
        assert!(AppConfig::load(Some(unknown.path())).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/lovecert.json"))).is_err());
    }
}
