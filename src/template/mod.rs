pub mod catalog;
pub mod data;

pub use catalog::{Template, TemplateId, TemplateSelector, TEMPLATES};
pub use data::{CertificateRecord, Party, PartyView, RecordField};
