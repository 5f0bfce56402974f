//! Modern und schlicht: Kopfzeile mit Logo, zwei farbige Personenkarten.

use super::{
    camera, date_or, heart, line, or_placeholder, rect, stroke, text, Context, DocumentTree,
    Node, PhotoShape, TextStyle, NOT_FILLED, NOT_GENERATED,
};
use crate::template::{Party, TemplateId};

const BLUE: &str = "#3b82f6";
const GRAY_900: &str = "#1f2937";
const GRAY_500: &str = "#6b7280";
const GRAY_400: &str = "#9ca3af";
const GRAY_200: &str = "#e5e7eb";
const GRAY_100: &str = "#f3f4f6";

const CAPTION: TextStyle = TextStyle::new(13.0, GRAY_500);
const VALUE: TextStyle = TextStyle::new(18.0, GRAY_900).bold();

struct CardColors {
    background: &'static str,
    title: &'static str,
    rule: &'static str,
    link: &'static str,
}

const FIRST: CardColors = CardColors {
    background: "#eff6ff",
    title: "#1d4ed8",
    rule: "#dbeafe",
    link: "#2563eb",
};

const SECOND: CardColors = CardColors {
    background: "#fdf2f8",
    title: "#be185d",
    rule: "#fce7f3",
    link: "#db2777",
};

fn card(ctx: &Context, nodes: &mut Vec<Node>, party: Party, x: f32) {
    let (title, colors) = match party {
        Party::First => ("第一位信息", &FIRST),
        Party::Second => ("第二位信息", &SECOND),
    };
    let p = ctx.record.party(party);
    let (top, width) = (450.0, 325.0);
    let right = x + width - 24.0;

    nodes.push(rect(x, top, width, 300.0, 10.0, Some(colors.background), None));
    nodes.push(text(x + 24.0, top + 40.0, title, TextStyle::new(18.0, colors.title).bold()));

    let label = TextStyle::new(15.0, GRAY_500);
    let value = TextStyle::new(15.0, GRAY_900).bold().end();
    let rows = [
        ("姓名", or_placeholder(p.name, NOT_FILLED)),
        ("性别", or_placeholder(p.gender, NOT_FILLED)),
        ("办理地", or_placeholder(p.registration_place, NOT_FILLED)),
        ("出生日期", date_or(p.birth_date, NOT_FILLED)),
    ];
    for (i, (name, content)) in rows.into_iter().enumerate() {
        let y = top + 80.0 + i as f32 * 36.0;
        nodes.push(text(x + 24.0, y, name, label));
        nodes.push(text(right, y, content, value));
    }

    let y = top + 226.0;
    nodes.push(line(x + 24.0, y - 16.0, right, y - 16.0, colors.rule, 1.0));
    nodes.push(text(x + 24.0, y + 4.0, "身份证件号", TextStyle::new(13.0, GRAY_500)));
    nodes.push(ctx.id_link(
        x + 24.0,
        y + 32.0,
        p.id_url,
        or_placeholder(p.id_number, NOT_FILLED),
        TextStyle::new(16.0, colors.link).bold(),
    ));
}

pub(crate) fn render(ctx: &Context) -> DocumentTree {
    let record = ctx.record;
    let mut nodes = Vec::new();

    nodes.push(rect(10.0, 10.0, 780.0, 980.0, 8.0, Some("#ffffff"), stroke(GRAY_200, 1.0)));

    // Kopf mit Logo
    nodes.push(Node::Circle {
        cx: 88.0,
        cy: 100.0,
        r: 28.0,
        fill: Some(BLUE),
        stroke: None,
    });
    nodes.push(heart(88.0, 100.0, 24.0, "#ffffff"));
    nodes.push(text(132.0, 96.0, "婚姻证书", TextStyle::new(24.0, GRAY_900).bold()));
    nodes.push(text(132.0, 120.0, "MARRIAGE CERTIFICATE", CAPTION));
    nodes.push(text(740.0, 92.0, "证书编号", CAPTION.end()));
    nodes.push(text(
        740.0,
        118.0,
        or_placeholder(record.certificate_number(), "N/A"),
        TextStyle::new(16.0, GRAY_900).bold().end(),
    ));

    // Foto
    nodes.push(rect(60.0, 170.0, 230.0, 230.0, 10.0, Some(GRAY_100), None));
    nodes.extend(ctx.photo_or(
        60.0,
        170.0,
        230.0,
        230.0,
        PhotoShape::Rect { radius: 10.0 },
        camera(175.0, 285.0, GRAY_400),
    ));

    // Basisdaten
    nodes.push(text(330.0, 200.0, "登记日期", CAPTION));
    nodes.push(text(330.0, 228.0, date_or(record.registration_date(), NOT_FILLED), VALUE));
    nodes.push(text(540.0, 200.0, "登记员", CAPTION));
    nodes.push(text(540.0, 228.0, or_placeholder(record.registrar(), NOT_FILLED), VALUE));
    nodes.push(line(330.0, 270.0, 740.0, 270.0, GRAY_200, 1.0));
    nodes.push(text(330.0, 300.0, "备注", CAPTION));
    nodes.push(text(
        330.0,
        330.0,
        "此证书证明双方已依法登记结婚，具有法律效力。",
        TextStyle::new(15.0, "#374151").italic(),
    ));

    card(ctx, &mut nodes, Party::First, 60.0);
    card(ctx, &mut nodes, Party::Second, 415.0);

    // Fußzeile mit QR-Platzhalter
    nodes.push(line(60.0, 800.0, 740.0, 800.0, GRAY_200, 1.0));
    nodes.push(text(
        60.0,
        850.0,
        format!("登记日期: {}", date_or(record.registration_date(), NOT_FILLED)),
        CAPTION,
    ));
    nodes.push(text(
        60.0,
        874.0,
        format!("证书编号: {}", or_placeholder(record.certificate_number(), NOT_GENERATED)),
        CAPTION,
    ));
    nodes.push(rect(660.0, 820.0, 80.0, 80.0, 8.0, Some(GRAY_100), None));
    nodes.push(text(700.0, 856.0, "扫描验证", TextStyle::new(11.0, GRAY_400).centered()));
    nodes.push(text(700.0, 872.0, "证书真伪", TextStyle::new(11.0, GRAY_400).centered()));

    DocumentTree::new(TemplateId::Modern, "#ffffff", nodes)
}
