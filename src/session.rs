//! Sitzungszustand: Datensatz, Foto, Vorlagenauswahl und UI-Flags.
//!
//! Alle Änderungen laufen über `&mut Session`. Zeitgesteuerte Übergänge
//! (Foto-Aufblitzen, simulierte Erzeugung, Erfolgsmeldung) liegen als
//! Ereignisse im [`Scheduler`] der Sitzung und werden mit
//! [`Session::close`] verworfen.

use crate::config::AppConfig;
use crate::error::Result;
use crate::export::{ExportOutcome, ExportPipeline, FileSink, RasterCapture};
use crate::photo::PhotoAsset;
use crate::render::{DocumentTree, Renderer};
use crate::scheduler::{Scheduler, TimerId};
use crate::template::{CertificateRecord, RecordField, Template, TemplateId, TemplateSelector};
use chrono::{Local, NaiveDate};
use log::{debug, error, info};
use std::path::Path;
use std::time::Duration;

pub const PHOTO_FLASH: Duration = Duration::from_millis(1000);
pub const GENERATION_DELAY: Duration = Duration::from_millis(1500);
pub const NOTICE_DURATION: Duration = Duration::from_millis(3000);

pub const SUCCESS_NOTICE: &str = "证书生成成功！";
pub const EXPORT_ALERT: &str = "下载证书时出错，请重试";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Editing,
    Previewing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiEvent {
    PhotoFlashEnd,
    GenerationDone,
    NoticeDismiss,
}

/// Reiner Präsentationszustand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub view: View,
    pub generating: bool,
    pub photo_flash: bool,
    pub notice: Option<&'static str>,
    pub alert: Option<&'static str>,
    /// Wie oft eine Erfolgsmeldung angezeigt wurde
    pub notices_shown: u32,
}

#[derive(Debug, Default)]
struct Timers {
    photo_flash: Option<TimerId>,
    generation: Option<TimerId>,
    notice: Option<TimerId>,
}

pub struct Session {
    record: CertificateRecord,
    photo: Option<PhotoAsset>,
    selector: TemplateSelector,
    renderer: Renderer,
    ui: UiState,
    scheduler: Scheduler<UiEvent>,
    timers: Timers,
    max_photo_bytes: u64,
    today: Box<dyn Fn() -> NaiveDate>,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            record: CertificateRecord::new(),
            photo: None,
            selector: TemplateSelector::with_selected(config.template),
            renderer: Renderer::from_config(config),
            ui: UiState::default(),
            scheduler: Scheduler::new(),
            timers: Timers::default(),
            max_photo_bytes: config.max_photo_bytes,
            today: Box::new(|| Local::now().date_naive()),
        }
    }

    /// Feste Uhr für die Zertifikatsnummer (Tests, reproduzierbare Batches)
    pub fn with_today(mut self, today: impl Fn() -> NaiveDate + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    /// Stichtag für die Zertifikatsnummer
    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    pub fn record(&self) -> &CertificateRecord {
        &self.record
    }

    pub fn photo(&self) -> Option<&PhotoAsset> {
        self.photo.as_ref()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn selected_template(&self) -> &'static Template {
        self.selector.current()
    }

    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) {
        let today = (self.today)();
        self.record.set(field, value, today);
        if field.is_name() {
            debug!("Certificate number now '{}'", self.record.certificate_number());
        }
    }

    /// Ersetzt den Datensatz komplett; die Nummer wird neu abgeleitet
    pub fn load_record(&mut self, mut record: CertificateRecord) {
        record.refresh_number((self.today)());
        self.record = record;
    }

    pub fn upload_photo(&mut self, bytes: &[u8]) -> Result<()> {
        let photo = PhotoAsset::from_bytes(bytes, self.max_photo_bytes)?;
        self.set_photo(photo);
        Ok(())
    }

    pub fn upload_photo_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let photo = PhotoAsset::from_file(path, self.max_photo_bytes)?;
        self.set_photo(photo);
        Ok(())
    }

    fn set_photo(&mut self, photo: PhotoAsset) {
        info!("Photo replaced ({} bytes)", photo.size());
        self.photo = Some(photo);
        self.ui.photo_flash = true;
        self.rearm(UiEvent::PhotoFlashEnd, PHOTO_FLASH);
    }

    pub fn select_template(&mut self, id: &str) -> Result<TemplateId> {
        self.selector.select(id)
    }

    /// Startet die (simulierte) Erzeugung. `false`, wenn sie schon läuft.
    pub fn generate(&mut self) -> bool {
        if self.ui.generating {
            debug!("Generation already running");
            return false;
        }
        self.ui.generating = true;
        self.rearm(UiEvent::GenerationDone, GENERATION_DELAY);
        true
    }

    /// Wechselt die Ansicht. Das Öffnen der Vorschau zeigt die Erfolgsmeldung.
    pub fn show_view(&mut self, view: View) {
        if self.ui.view == view {
            return;
        }
        self.ui.view = view;
        if view == View::Previewing {
            self.show_notice();
        }
    }

    /// Rendert die aktuelle Auswahl, unabhängig von der Ansicht
    pub fn render(&self) -> DocumentTree {
        self.renderer
            .render(&self.record, self.photo.as_ref(), self.selector.selected())
    }

    /// Die eingehängte Vorschau, nur in der Vorschau-Ansicht vorhanden
    pub fn preview(&self) -> Option<DocumentTree> {
        match self.ui.view {
            View::Previewing => Some(self.render()),
            View::Editing => None,
        }
    }

    /// Exportiert die Vorschau. Fehler werden als Alert gemeldet und
    /// zusätzlich zurückgegeben.
    pub fn download<C: RasterCapture, S: FileSink>(
        &mut self,
        pipeline: &ExportPipeline<C, S>,
    ) -> Result<ExportOutcome> {
        let target = self.preview();
        let result = pipeline.export(
            target.as_ref(),
            self.record.husband_name(),
            self.record.wife_name(),
        );

        match &result {
            Ok(ExportOutcome::Saved { .. }) => self.show_notice(),
            Ok(_) => {}
            Err(e) => {
                error!("Error while exporting certificate: {}", e);
                self.ui.alert = Some(EXPORT_ALERT);
            }
        }
        result
    }

    pub fn dismiss_alert(&mut self) {
        self.ui.alert = None;
    }

    /// Lässt `elapsed` verstreichen und wendet fällige Ereignisse an
    pub fn tick(&mut self, elapsed: Duration) {
        for event in self.scheduler.advance(elapsed) {
            debug!("UI event {:?}", event);
            match event {
                UiEvent::PhotoFlashEnd => {
                    self.timers.photo_flash = None;
                    self.ui.photo_flash = false;
                }
                UiEvent::GenerationDone => {
                    self.timers.generation = None;
                    self.ui.generating = false;
                    self.show_view(View::Previewing);
                }
                UiEvent::NoticeDismiss => {
                    self.timers.notice = None;
                    self.ui.notice = None;
                }
            }
        }
    }

    /// Beendet die Sitzung: ausstehende Ereignisse werden verworfen
    pub fn close(&mut self) {
        self.scheduler.close();
        self.timers = Timers::default();
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    fn show_notice(&mut self) {
        self.ui.notice = Some(SUCCESS_NOTICE);
        self.ui.notices_shown += 1;
        self.rearm(UiEvent::NoticeDismiss, NOTICE_DURATION);
    }

    /// Plant `event` neu; ein noch ausstehendes gleichartiges wird verworfen
    fn rearm(&mut self, event: UiEvent, after: Duration) {
        let slot = match event {
            UiEvent::PhotoFlashEnd => &mut self.timers.photo_flash,
            UiEvent::GenerationDone => &mut self.timers.generation,
            UiEvent::NoticeDismiss => &mut self.timers.notice,
        };
        if let Some(previous) = slot.take() {
            self.scheduler.cancel(previous);
        }
        *slot = Some(self.scheduler.schedule(after, event));
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
