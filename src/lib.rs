//! # lovecert
//!
//! A library and CLI tool for composing decorative marriage-certificate
//! images: fill in a record, pick one of four templates, render, export PNG.
//!
//! The certificate number is a toy hash of the two names. Nothing produced
//! here is verifiable or meant to be.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod number;
pub mod photo;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod template;

// Re-exports
pub use cli::{Cli, Commands};
pub use config::AppConfig;
pub use error::{LovecertError, Result};
pub use export::{ExportOutcome, ExportPipeline, FileSink, RasterCapture};
pub use number::derive_certificate_number;
pub use photo::PhotoAsset;
pub use render::{render, DocumentTree, Renderer};
pub use session::{Session, UiState, View};
pub use template::{
    CertificateRecord, RecordField, Template, TemplateId, TemplateSelector, TEMPLATES,
};
