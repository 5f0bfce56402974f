use crate::error::{LovecertError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Die vier Layout-Varianten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Traditional,
    Modern,
    Elegant,
    Vintage,
}

impl TemplateId {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Traditional => "traditional",
            TemplateId::Modern => "modern",
            TemplateId::Elegant => "elegant",
            TemplateId::Vintage => "vintage",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = LovecertError;

    fn from_str(s: &str) -> Result<Self> {
        TEMPLATES
            .iter()
            .map(|t| t.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LovecertError::UnknownTemplate(s.to_string()))
    }
}

/// Beschreibung einer Vorlage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub preview_image: &'static str,
}

/// Feste, geordnete Liste aller Vorlagen
pub static TEMPLATES: [Template; 4] = [
    Template {
        id: TemplateId::Traditional,
        name: "传统红色",
        description: "经典中国红风格，喜庆热烈",
        preview_image: "/certificate-preview-traditional.png",
    },
    Template {
        id: TemplateId::Modern,
        name: "现代简约",
        description: "简约现代的设计风格",
        preview_image: "/certificate-preview-modern.png",
    },
    Template {
        id: TemplateId::Elegant,
        name: "优雅装饰",
        description: "精美装饰的优雅风格",
        preview_image: "/certificate-preview-elegant.png",
    },
    Template {
        id: TemplateId::Vintage,
        name: "复古经典",
        description: "怀旧复古的经典风格",
        preview_image: "/certificate-preview-vintage.png",
    },
];

impl Template {
    pub fn get(id: TemplateId) -> &'static Template {
        // TEMPLATES ist in Enum-Reihenfolge
        &TEMPLATES[id as usize]
    }
}

/// Hält die aktuell gewählte Vorlage
#[derive(Debug, Clone, Default)]
pub struct TemplateSelector {
    selected: TemplateId,
}

impl TemplateSelector {
    pub fn with_selected(id: TemplateId) -> Self {
        Self { selected: id }
    }

    pub fn templates(&self) -> &'static [Template] {
        &TEMPLATES
    }

    pub fn selected(&self) -> TemplateId {
        self.selected
    }

    pub fn current(&self) -> &'static Template {
        Template::get(self.selected)
    }

    pub fn select_id(&mut self, id: TemplateId) {
        debug!("Template selected: {}", id);
        self.selected = id;
    }

    /// Wählt eine Vorlage per String-Id. Unbekannte Ids werden
    /// abgelehnt, die bisherige Auswahl bleibt bestehen.
    pub fn select(&mut self, id: &str) -> Result<TemplateId> {
        match id.parse::<TemplateId>() {
            Ok(template) => {
                self.select_id(template);
                Ok(template)
            }
            Err(e) => {
                warn!("Ignoring selection of unknown template '{}'", id);
                Err(e)
            }
        }
    }
}
