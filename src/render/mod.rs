//! Dokumentbaum und die vier Urkunden-Layouts.
//!
//! Ein Layout ist eine reine Funktion von Datensatz, Foto und Link-Regeln
//! auf einen [`DocumentTree`]. Der Baum wird danach als SVG serialisiert
//! (siehe [`svg`]) und von der Export-Pipeline gerastert.

pub mod elegant;
pub mod modern;
pub mod svg;
pub mod traditional;
pub mod vintage;

use crate::config::AppConfig;
use crate::photo::PhotoAsset;
use crate::template::{CertificateRecord, TemplateId};
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};

pub const PAGE_WIDTH: f32 = 800.0;
pub const PAGE_HEIGHT: f32 = 1000.0;

/// Platzhalter der traditionellen Vorlage
pub const UNDERSCORES: &str = "___________";
/// Platzhalter der übrigen Vorlagen
pub const NOT_FILLED: &str = "未填写";
pub const NOT_GENERATED: &str = "未生成";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: &'static str,
    pub bold: bool,
    pub italic: bool,
    pub anchor: Anchor,
}

impl TextStyle {
    pub const fn new(size: f32, color: &'static str) -> Self {
        Self {
            size,
            color,
            bold: false,
            italic: false,
            anchor: Anchor::Start,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn italic(self) -> Self {
        Self { italic: true, ..self }
    }

    pub const fn centered(self) -> Self {
        Self {
            anchor: Anchor::Middle,
            ..self
        }
    }

    pub const fn end(self) -> Self {
        Self {
            anchor: Anchor::End,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhotoShape {
    Rect { radius: f32 },
    Circle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: Option<&'static str>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<&'static str>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
    Path {
        d: String,
        fill: Option<&'static str>,
        stroke: Option<Stroke>,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        style: TextStyle,
    },
    /// Ausgehender Link, `href` unverändert aus dem Datensatz
    Link {
        x: f32,
        y: f32,
        href: String,
        content: String,
        style: TextStyle,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        href: String,
        shape: PhotoShape,
    },
    Group {
        /// Drehung in Grad um (cx, cy)
        rotate: f32,
        cx: f32,
        cy: f32,
        opacity: f32,
        children: Vec<Node>,
    },
}

impl Node {
    fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        f(self);
        if let Node::Group { children, .. } = self {
            for child in children {
                child.visit(f);
            }
        }
    }
}

/// Fertig gerenderte Seite
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    pub template: TemplateId,
    pub width: f32,
    pub height: f32,
    pub background: &'static str,
    pub nodes: Vec<Node>,
}

impl DocumentTree {
    pub fn new(template: TemplateId, background: &'static str, nodes: Vec<Node>) -> Self {
        Self {
            template,
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            background,
            nodes,
        }
    }

    fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        for node in &self.nodes {
            node.visit(f);
        }
    }

    /// Alle sichtbaren Texte (inklusive Link-Beschriftungen)
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |node| match node {
            Node::Text { content, .. } | Node::Link { content, .. } => out.push(content.as_str()),
            _ => {}
        });
        out
    }

    /// Alle Link-Ziele
    pub fn links(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if let Node::Link { href, .. } = node {
                out.push(href.as_str());
            }
        });
        out
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub fn has_image(&self) -> bool {
        let mut found = false;
        self.walk(&mut |node| {
            if matches!(node, Node::Image { .. }) {
                found = true;
            }
        });
        found
    }
}

/// Welche Link-Ziele als echte Links ausgegeben werden
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    schemes: Vec<String>,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}

impl LinkPolicy {
    pub fn new(schemes: Vec<String>) -> Self {
        Self { schemes }
    }

    pub fn allows(&self, href: &str) -> bool {
        match url::Url::parse(href) {
            Ok(url) => self
                .schemes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(url.scheme())),
            Err(_) => false,
        }
    }
}

/// Rendert Datensätze in eine der vier Vorlagen
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    links: LinkPolicy,
}

impl Renderer {
    pub fn new(links: LinkPolicy) -> Self {
        Self { links }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(LinkPolicy::new(config.link_schemes.clone()))
    }

    pub fn render(
        &self,
        record: &CertificateRecord,
        photo: Option<&PhotoAsset>,
        template: TemplateId,
    ) -> DocumentTree {
        debug!("Rendering template {}", template);
        let ctx = Context {
            record,
            photo,
            links: &self.links,
        };
        match template {
            TemplateId::Traditional => traditional::render(&ctx),
            TemplateId::Modern => modern::render(&ctx),
            TemplateId::Elegant => elegant::render(&ctx),
            TemplateId::Vintage => vintage::render(&ctx),
        }
    }
}

/// Rendert mit der Standard-Link-Policy (`http`, `https`)
pub fn render(
    record: &CertificateRecord,
    photo: Option<&PhotoAsset>,
    template: TemplateId,
) -> DocumentTree {
    Renderer::default().render(record, photo, template)
}

/// Eingaben einer Layout-Funktion
pub(crate) struct Context<'a> {
    pub record: &'a CertificateRecord,
    pub photo: Option<&'a PhotoAsset>,
    pub links: &'a LinkPolicy,
}

impl Context<'_> {
    /// Ausweisnummer als Link, falls das Ziel erlaubt ist, sonst als Text
    pub fn id_link(&self, x: f32, y: f32, href: &str, label: String, style: TextStyle) -> Node {
        if self.links.allows(href) {
            Node::Link {
                x,
                y,
                href: href.to_string(),
                content: label,
                style,
            }
        } else {
            if !href.is_empty() {
                warn!("Rendering verification link '{}' as plain text: scheme not allowed", href);
            }
            text(x, y, label, style)
        }
    }

    /// Foto oder, falls keins hochgeladen wurde, die übergebenen Ersatzknoten
    pub fn photo_or(
        &self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        shape: PhotoShape,
        fallback: Vec<Node>,
    ) -> Vec<Node> {
        match self.photo {
            Some(photo) => vec![Node::Image {
                x,
                y,
                width,
                height,
                href: photo.data_uri().to_string(),
                shape,
            }],
            None => fallback,
        }
    }
}

/// Wert oder Platzhalter
pub fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// `2024-05-20` -> `2024年5月20日`. Leere Eingabe (auch nur Leerzeichen)
/// ergibt einen leeren String, nicht parsbare Werte werden unverändert
/// angezeigt.
pub fn format_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        Err(_) => value.to_string(),
    }
}

/// Datum formatiert oder Platzhalter
pub fn date_or(value: &str, placeholder: &str) -> String {
    or_placeholder(&format_date(value), placeholder)
}

pub(crate) fn text(x: f32, y: f32, content: impl Into<String>, style: TextStyle) -> Node {
    Node::Text {
        x,
        y,
        content: content.into(),
        style,
    }
}

pub(crate) fn rect(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
    fill: Option<&'static str>,
    stroke: Option<Stroke>,
) -> Node {
    Node::Rect {
        x,
        y,
        width,
        height,
        radius,
        fill,
        stroke,
    }
}

pub(crate) fn line(x1: f32, y1: f32, x2: f32, y2: f32, color: &'static str, width: f32) -> Node {
    Node::Line {
        x1,
        y1,
        x2,
        y2,
        stroke: Stroke { color, width },
    }
}

pub(crate) fn stroke(color: &'static str, width: f32) -> Option<Stroke> {
    Some(Stroke { color, width })
}

/// Herzform mit Mittelpunkt (cx, cy) und Breite `size`
pub(crate) fn heart(cx: f32, cy: f32, size: f32, color: &'static str) -> Node {
    let s = size / 2.0;
    Node::Path {
        d: format!(
            "M {:.1} {:.1} C {:.1} {:.1} {:.1} {:.1} {:.1} {:.1} C {:.1} {:.1} {:.1} {:.1} {:.1} {:.1} Z",
            cx,
            cy + s * 0.8,
            cx - s * 1.6,
            cy - s * 0.2,
            cx - s * 0.6,
            cy - s * 1.2,
            cx,
            cy - s * 0.4,
            cx + s * 0.6,
            cy - s * 1.2,
            cx + s * 1.6,
            cy - s * 0.2,
            cx,
            cy + s * 0.8,
        ),
        fill: Some(color),
        stroke: None,
    }
}

/// Kamera-Symbol als Platzhalter für fehlende Fotos
pub(crate) fn camera(cx: f32, cy: f32, color: &'static str) -> Vec<Node> {
    vec![
        rect(cx - 24.0, cy - 14.0, 48.0, 34.0, 5.0, None, stroke(color, 3.0)),
        rect(cx - 8.0, cy - 22.0, 16.0, 8.0, 2.0, None, stroke(color, 3.0)),
        Node::Circle {
            cx,
            cy: cy + 3.0,
            r: 9.0,
            fill: None,
            stroke: stroke(color, 3.0),
        },
    ]
}

/// Runder Stempel "婚姻登记专用章" mit Datum
pub(crate) fn seal(
    cx: f32,
    cy: f32,
    r: f32,
    color: &'static str,
    rotate: f32,
    opacity: f32,
    date: String,
) -> Node {
    Node::Group {
        rotate,
        cx,
        cy,
        opacity,
        children: vec![
            Node::Circle {
                cx,
                cy,
                r,
                fill: None,
                stroke: stroke(color, 1.0),
            },
            Node::Circle {
                cx,
                cy,
                r: r - 5.0,
                fill: None,
                stroke: stroke(color, 2.0),
            },
            text(cx, cy - 2.0, "婚姻登记专用章", TextStyle::new(12.0, color).centered()),
            text(cx, cy + 16.0, date, TextStyle::new(10.0, color).centered()),
        ],
    }
}

/// L-förmige Ecke; `dx`/`dy` geben die Richtung der Schenkel an (±1)
pub(crate) fn corner(
    x: f32,
    y: f32,
    len: f32,
    dx: f32,
    dy: f32,
    color: &'static str,
    width: f32,
) -> Node {
    Node::Path {
        d: format!(
            "M {:.1} {:.1} L {:.1} {:.1} L {:.1} {:.1}",
            x,
            y + dy * len,
            x,
            y,
            x + dx * len,
            y
        ),
        fill: None,
        stroke: stroke(color, width),
    }
}
