//! Rastern und Speichern einer gerenderten Seite.
//!
//! Das Rastern selbst steckt hinter [`RasterCapture`], das Speichern hinter
//! [`FileSink`]. Die Pipeline sorgt dafür, dass nie zwei Exporte
//! gleichzeitig laufen und dass das Busy-Flag in jedem Fall wieder
//! freigegeben wird.

use crate::config::AppConfig;
use crate::error::{LovecertError, Result};
use crate::render::DocumentTree;
use chrono::Utc;
use log::{debug, info, warn};
use regex::Regex;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Rastert eine Seite in der gewünschten Skalierung
pub trait RasterCapture {
    fn capture(&self, document: &DocumentTree, scale: f32) -> Result<Pixmap>;
}

/// Legt die fertigen PNG-Bytes ab
pub trait FileSink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// SVG -> Pixmap über resvg.
///
/// Fotos sind als Data-URI eingebettet, externe Ressourcen werden nicht
/// nachgeladen.
pub struct ResvgCapture {
    options: usvg::Options<'static>,
    font_family: String,
}

impl ResvgCapture {
    pub fn new(font_family: &str, load_system_fonts: bool) -> Self {
        let mut options = usvg::Options::default();
        options.font_family = font_family.to_string();
        if load_system_fonts {
            options.fontdb_mut().load_system_fonts();
        }
        Self {
            options,
            font_family: font_family.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.font_family, config.load_system_fonts)
    }
}

impl RasterCapture for ResvgCapture {
    fn capture(&self, document: &DocumentTree, scale: f32) -> Result<Pixmap> {
        let svg = document.to_svg(&self.font_family);
        let tree = usvg::Tree::from_str(&svg, &self.options)?;

        let base = tree.size().to_int_size();
        let size = base.scale_by(scale).ok_or(LovecertError::Pixmap {
            width: base.width(),
            height: base.height(),
        })?;
        let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or(LovecertError::Pixmap {
            width: size.width(),
            height: size.height(),
        })?;

        debug!("Rasterizing {}x{} (scale {})", size.width(), size.height(), scale);
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

/// Schreibt in ein Ausgabeverzeichnis
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved {
        path: PathBuf,
        filename: String,
        bytes: usize,
    },
    /// Keine Vorschau vorhanden, nichts zu tun
    NotMounted,
    /// Ein anderer Export läuft noch
    Busy,
}

/// Gibt das Busy-Flag beim Verlassen des Scopes frei, auch im Fehlerfall
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ExportPipeline<C, S> {
    capture: C,
    sink: S,
    scale: f32,
    prefix: String,
    busy: AtomicBool,
}

impl ExportPipeline<ResvgCapture, DirectorySink> {
    /// resvg + Ausgabeverzeichnis, Einstellungen aus der Konfiguration
    pub fn to_directory(config: &AppConfig, dir: impl Into<PathBuf>) -> Self {
        Self::new(ResvgCapture::from_config(config), DirectorySink::new(dir), config)
    }
}

impl<C: RasterCapture, S: FileSink> ExportPipeline<C, S> {
    pub fn new(capture: C, sink: S, config: &AppConfig) -> Self {
        Self {
            capture,
            sink,
            scale: config.scale,
            prefix: config.filename_prefix.clone(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Rastert `target` und speichert es als PNG.
    ///
    /// Ohne Ziel oder bei laufendem Export passiert nichts.
    pub fn export(
        &self,
        target: Option<&DocumentTree>,
        name_a: &str,
        name_b: &str,
    ) -> Result<ExportOutcome> {
        let Some(document) = target else {
            warn!("Export requested but no preview is mounted");
            return Ok(ExportOutcome::NotMounted);
        };

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            warn!("Export already in progress, ignoring request");
            return Ok(ExportOutcome::Busy);
        };

        info!("Exporting {} certificate", document.template);
        let pixmap = self.capture.capture(document, self.scale)?;
        let png = pixmap
            .encode_png()
            .map_err(|e| LovecertError::Encode(e.to_string()))?;

        let filename = export_filename(&self.prefix, name_a, name_b, Utc::now().timestamp_millis());
        let path = self.sink.save(&filename, &png)?;
        info!("Saved {} ({} bytes)", path.display(), png.len());

        Ok(ExportOutcome::Saved {
            path,
            filename,
            bytes: png.len(),
        })
    }
}

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap())
}

/// `{prefix}_{a}_{b}_{millis}.png`; Pfadtrenner und Steuerzeichen werden
/// durch `_` ersetzt, alles andere (auch CJK) bleibt erhalten.
pub fn export_filename(prefix: &str, name_a: &str, name_b: &str, millis: i64) -> String {
    let clean = |s: &str| unsafe_chars().replace_all(s, "_").into_owned();
    format!("{}_{}_{}_{}.png", clean(prefix), clean(name_a), clean(name_b), millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::template::{CertificateRecord, TemplateId};
    use std::sync::mpsc;
    use std::sync::Mutex;

    /// Merkt sich gespeicherte Dateien im Speicher
    #[derive(Default)]
    struct MemorySink {
        files: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl FileSink for MemorySink {
        fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
            self.files
                .lock()
                .unwrap()
                .push((filename.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(filename))
        }
    }

    /// Liefert eine 2x2-Pixmap, ohne wirklich zu rendern
    struct BlankCapture;

    impl RasterCapture for BlankCapture {
        fn capture(&self, _document: &DocumentTree, _scale: f32) -> Result<Pixmap> {
            Pixmap::new(2, 2).ok_or(LovecertError::Pixmap { width: 2, height: 2 })
        }
    }

    struct FailingCapture;

    impl RasterCapture for FailingCapture {
        fn capture(&self, _document: &DocumentTree, _scale: f32) -> Result<Pixmap> {
            Err(LovecertError::Capture("tainted canvas".to_string()))
        }
    }

    fn doc() -> DocumentTree {
        render(&CertificateRecord::new(), None, TemplateId::Traditional)
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            export_filename("婚姻证书", "张小帅", "萌小美", 1716163200000),
            "婚姻证书_张小帅_萌小美_1716163200000.png"
        );
        assert_eq!(export_filename("c", "../x", "a\\b:c", 1), "c_.._x_a_b_c_1.png");
    }

    #[test]
    fn test_not_mounted_is_noop() {
        let pipeline =
            ExportPipeline::new(BlankCapture, MemorySink::default(), &AppConfig::default());
        let outcome = pipeline.export(None, "a", "b").unwrap();
        assert_eq!(outcome, ExportOutcome::NotMounted);
        assert!(pipeline.sink().files.lock().unwrap().is_empty());
        assert!(!pipeline.is_busy());
    }

    #[test]
    fn test_saves_png() {
        let pipeline =
            ExportPipeline::new(BlankCapture, MemorySink::default(), &AppConfig::default());
        let document = doc();
        let outcome = pipeline.export(Some(&document), "张小帅", "萌小美").unwrap();

        let files = pipeline.sink().files.lock().unwrap();
        assert_eq!(files.len(), 1);
        let (name, bytes) = &files[0];
        assert!(name.starts_with("婚姻证书_张小帅_萌小美_"));
        assert!(name.ends_with(".png"));
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert!(matches!(outcome, ExportOutcome::Saved { bytes, .. } if bytes == files[0].1.len()));
        assert!(!pipeline.is_busy());
    }

    #[test]
    fn test_failure_releases_flag() {
        let pipeline =
            ExportPipeline::new(FailingCapture, MemorySink::default(), &AppConfig::default());
        let document = doc();
        let err = pipeline.export(Some(&document), "a", "b").unwrap_err();
        assert!(matches!(err, LovecertError::Capture(_)));
        assert!(!pipeline.is_busy());
        assert!(pipeline.sink().files.lock().unwrap().is_empty());
    }

    /// Blockiert im Capture, bis der Test es freigibt
    struct GatedCapture {
        entered: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl RasterCapture for GatedCapture {
        fn capture(&self, _document: &DocumentTree, _scale: f32) -> Result<Pixmap> {
            self.entered.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
            Pixmap::new(1, 1).ok_or(LovecertError::Pixmap { width: 1, height: 1 })
        }
    }

    #[test]
    fn test_second_export_while_busy() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let capture = GatedCapture {
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        };
        let pipeline =
            ExportPipeline::new(capture, MemorySink::default(), &AppConfig::default());
        let document = doc();

        std::thread::scope(|s| {
            let first = s.spawn(|| pipeline.export(Some(&document), "a", "b"));

            entered_rx.recv().unwrap();
            assert!(pipeline.is_busy());
            let second = pipeline.export(Some(&document), "a", "b").unwrap();
            assert_eq!(second, ExportOutcome::Busy);

            release_tx.send(()).unwrap();
            let first = first.join().unwrap().unwrap();
            assert!(matches!(first, ExportOutcome::Saved { .. }));
        });

        assert!(!pipeline.is_busy());
        assert_eq!(pipeline.sink().files.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_resvg_capture_scales() {
        let config = AppConfig {
            load_system_fonts: false,
            ..AppConfig::default()
        };
        let capture = ResvgCapture::from_config(&config);
        let pixmap = capture.capture(&doc(), 0.5).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (400, 500));
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            scale: 0.25,
            load_system_fonts: false,
            ..AppConfig::default()
        };
        let pipeline = ExportPipeline::to_directory(&config, dir.path().join("out"));
        let document = doc();

        let outcome = pipeline.export(Some(&document), "A", "B").unwrap();
        let ExportOutcome::Saved { path, .. } = outcome else {
            panic!("expected a saved file, got {:?}", outcome);
        };
        assert!(path.starts_with(dir.path()));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
