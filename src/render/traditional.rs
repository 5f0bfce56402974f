//! Klassisches Rot: Unterstrich-Platzhalter, rotes Fotofeld, Siegel unten rechts.

use super::{
    corner, date_or, line, or_placeholder, rect, seal, stroke, text, Context, DocumentTree, Node,
    PhotoShape, TextStyle, UNDERSCORES,
};
use crate::template::{Party, TemplateId};

const RED: &str = "#dc2626";
const RED_LIGHT: &str = "#f87171";
const RED_CORNER: &str = "#fca5a5";
const GRAY_LABEL: &str = "#374151";
const GRAY_VALUE: &str = "#1f2937";
const GRAY_RULE: &str = "#9ca3af";
const LINK: &str = "#2563eb";

const LABEL: TextStyle = TextStyle::new(16.0, GRAY_LABEL).bold();
const VALUE_RED: TextStyle = TextStyle::new(16.0, RED);
const VALUE: TextStyle = TextStyle::new(16.0, GRAY_VALUE);
const VALUE_LINK: TextStyle = TextStyle::new(16.0, LINK);

/// Beschriftung + unterstrichener Wert
#[allow(clippy::too_many_arguments)]
fn row(
    nodes: &mut Vec<Node>,
    x: f32,
    y: f32,
    label: &str,
    label_width: f32,
    value: String,
    style: TextStyle,
    rule: &'static str,
) {
    nodes.push(text(x, y, label, LABEL));
    let vx = x + label_width;
    nodes.push(text(vx + 6.0, y, value, style));
    nodes.push(line(vx, y + 6.0, vx + 170.0, y + 6.0, rule, 1.0));
}

fn party(ctx: &Context, nodes: &mut Vec<Node>, party: Party, top: f32) {
    let p = ctx.record.party(party);
    let (left, right) = (60.0, 410.0);

    let name = or_placeholder(p.name, UNDERSCORES);
    let gender = or_placeholder(p.gender, UNDERSCORES);
    let place = or_placeholder(p.registration_place, UNDERSCORES);
    let birth = date_or(p.birth_date, UNDERSCORES);

    row(nodes, left, top, "姓名:", 50.0, name, VALUE_RED, RED);
    row(nodes, right, top, "性别:", 50.0, gender, VALUE, GRAY_RULE);
    row(nodes, left, top + 44.0, "办理地:", 66.0, place, VALUE, GRAY_RULE);
    row(nodes, right, top + 44.0, "出生日期:", 82.0, birth, VALUE, GRAY_RULE);

    let y = top + 88.0;
    nodes.push(text(left, y, "身份证件号:", LABEL));
    nodes.push(ctx.id_link(
        left + 104.0,
        y,
        p.id_url,
        or_placeholder(p.id_number, UNDERSCORES),
        VALUE_LINK,
    ));
    nodes.push(line(left + 98.0, y + 6.0, 740.0, y + 6.0, GRAY_RULE, 1.0));
}

pub(crate) fn render(ctx: &Context) -> DocumentTree {
    let record = ctx.record;
    let mut nodes = Vec::new();

    nodes.push(rect(10.0, 10.0, 780.0, 980.0, 8.0, Some("#ffffff"), stroke("#e5e7eb", 1.0)));

    // Kopf
    nodes.push(text(400.0, 90.0, "结婚证书", TextStyle::new(32.0, RED).bold().centered()));
    nodes.push(line(368.0, 108.0, 432.0, 108.0, RED_LIGHT, 2.0));

    // Linke Spalte
    let registrar = or_placeholder(record.registrar(), UNDERSCORES);
    let date = date_or(record.registration_date(), UNDERSCORES);
    row(&mut nodes, 60.0, 170.0, "登记员:", 66.0, registrar, VALUE_RED, RED);
    row(&mut nodes, 60.0, 220.0, "登记日期:", 82.0, date, VALUE_RED, RED);
    row(
        &mut nodes,
        60.0,
        270.0,
        "结婚证书号:",
        98.0,
        or_placeholder(record.certificate_number(), UNDERSCORES),
        VALUE,
        GRAY_RULE,
    );
    nodes.push(text(60.0, 330.0, "备注:", LABEL));

    // Foto
    nodes.push(rect(520.0, 140.0, 220.0, 200.0, 0.0, Some(RED), stroke(RED, 4.0)));
    nodes.extend(ctx.photo_or(
        540.0,
        150.0,
        180.0,
        180.0,
        PhotoShape::Rect { radius: 0.0 },
        vec![text(630.0, 245.0, "请上传合照", TextStyle::new(14.0, "#ffffff").centered())],
    ));

    party(ctx, &mut nodes, Party::First, 420.0);
    party(ctx, &mut nodes, Party::Second, 600.0);

    nodes.push(seal(
        690.0,
        890.0,
        56.0,
        RED,
        12.0,
        0.3,
        date_or(record.registration_date(), "日期"),
    ));

    // Ecken
    for (x, y, dx, dy) in [
        (22.0, 22.0, 1.0, 1.0),
        (778.0, 22.0, -1.0, 1.0),
        (22.0, 978.0, 1.0, -1.0),
        (778.0, 978.0, -1.0, -1.0),
    ] {
        nodes.push(corner(x, y, 48.0, dx, dy, RED_CORNER, 2.0));
    }

    DocumentTree::new(TemplateId::Traditional, "#ffffff", nodes)
}
