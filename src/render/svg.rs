use super::{Anchor, DocumentTree, Node, PhotoShape, Stroke, TextStyle};
use std::fmt::Write;

/// Escaped XML-Sonderzeichen für Text und Attribute
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl DocumentTree {
    /// Serialisiert die Seite als eigenständiges SVG-Dokument
    pub fn to_svg(&self, font_family: &str) -> String {
        let mut out = String::new();
        let mut clip_ids = 0usize;

        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{font}, serif\">",
            w = self.width,
            h = self.height,
            font = escape_xml(font_family),
        );
        let _ = write!(
            out,
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            self.background
        );

        for node in &self.nodes {
            write_node(&mut out, node, &mut clip_ids);
        }

        out.push_str("</svg>");
        out
    }
}

fn paint(fill: Option<&str>, stroke: Option<&Stroke>) -> String {
    let mut attrs = format!(" fill=\"{}\"", fill.unwrap_or("none"));
    if let Some(s) = stroke {
        let _ = write!(attrs, " stroke=\"{}\" stroke-width=\"{}\"", s.color, s.width);
    }
    attrs
}

fn text_attrs(style: &TextStyle) -> String {
    let anchor = match style.anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    };
    let mut attrs = format!(
        " font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\"",
        style.size, style.color, anchor
    );
    if style.bold {
        attrs.push_str(" font-weight=\"bold\"");
    }
    if style.italic {
        attrs.push_str(" font-style=\"italic\"");
    }
    attrs
}

fn write_node(out: &mut String, node: &Node, clip_ids: &mut usize) {
    match node {
        Node::Rect {
            x,
            y,
            width,
            height,
            radius,
            fill,
            stroke,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"{:.1}\"{}/>",
                x,
                y,
                width,
                height,
                radius,
                paint(*fill, stroke.as_ref())
            );
        }
        Node::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
        } => {
            let _ = write!(
                out,
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\"{}/>",
                cx,
                cy,
                r,
                paint(*fill, stroke.as_ref())
            );
        }
        Node::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            let _ = write!(
                out,
                "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                x1, y1, x2, y2, stroke.color, stroke.width
            );
        }
        Node::Path { d, fill, stroke } => {
            let _ = write!(out, "<path d=\"{}\"{}/>", d, paint(*fill, stroke.as_ref()));
        }
        Node::Text {
            x,
            y,
            content,
            style,
        } => {
            let _ = write!(
                out,
                "<text x=\"{:.1}\" y=\"{:.1}\"{}>{}</text>",
                x,
                y,
                text_attrs(style),
                escape_xml(content)
            );
        }
        Node::Link {
            x,
            y,
            href,
            content,
            style,
        } => {
            let _ = write!(
                out,
                "<a xlink:href=\"{href}\" href=\"{href}\" target=\"_blank\"><text x=\"{:.1}\" y=\"{:.1}\"{} text-decoration=\"underline\">{}</text></a>",
                x,
                y,
                text_attrs(style),
                escape_xml(content),
                href = escape_xml(href),
            );
        }
        Node::Image {
            x,
            y,
            width,
            height,
            href,
            shape,
        } => {
            *clip_ids += 1;
            let id = format!("photo-clip-{}", clip_ids);
            let clip = match shape {
                PhotoShape::Rect { radius } => format!(
                    "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"{:.1}\"/>",
                    x, y, width, height, radius
                ),
                PhotoShape::Circle => format!(
                    "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\"/>",
                    x + width / 2.0,
                    y + height / 2.0,
                    width.min(*height) / 2.0
                ),
            };
            let _ = write!(
                out,
                "<defs><clipPath id=\"{id}\">{clip}</clipPath></defs><image x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" preserveAspectRatio=\"xMidYMid slice\" clip-path=\"url(#{id})\" xlink:href=\"{}\"/>",
                x,
                y,
                width,
                height,
                escape_xml(href),
            );
        }
        Node::Group {
            rotate,
            cx,
            cy,
            opacity,
            children,
        } => {
            let _ = write!(
                out,
                "<g transform=\"rotate({:.1} {:.1} {:.1})\" opacity=\"{:.2}\">",
                rotate, cx, cy, opacity
            );
            for child in children {
                write_node(out, child, clip_ids);
            }
            out.push_str("</g>");
        }
    }
}
