//! Elegant: Bernsteintöne, rundes Foto, Ornamente in den Ecken.

use super::{
    camera, date_or, heart, line, or_placeholder, rect, seal, stroke, text, Context,
    DocumentTree, Node, PhotoShape, TextStyle, NOT_FILLED, NOT_GENERATED,
};
use crate::template::{Party, TemplateId};

const AMBER_50: &str = "#fffbeb";
const AMBER_100: &str = "#fef3c7";
const AMBER_200: &str = "#fde68a";
const AMBER_300: &str = "#fcd34d";
const AMBER_400: &str = "#fbbf24";
const AMBER_600: &str = "#d97706";
const AMBER_700: &str = "#b45309";
const AMBER_800: &str = "#92400e";
const AMBER_900: &str = "#78350f";

const LABEL: TextStyle = TextStyle::new(15.0, AMBER_700);
const VALUE: TextStyle = TextStyle::new(15.0, AMBER_900).bold();

fn column(ctx: &Context, nodes: &mut Vec<Node>, party: Party, x: f32) {
    let title = match party {
        Party::First => "第一位信息",
        Party::Second => "第二位信息",
    };
    let p = ctx.record.party(party);
    let top = 530.0;

    nodes.push(text(x, top, title, TextStyle::new(18.0, AMBER_800).bold()));
    nodes.push(line(x, top + 12.0, x + 300.0, top + 12.0, AMBER_200, 1.0));

    let rows = [
        ("姓名", or_placeholder(p.name, NOT_FILLED)),
        ("性别", or_placeholder(p.gender, NOT_FILLED)),
        ("办理地", or_placeholder(p.registration_place, NOT_FILLED)),
        ("出生日期", date_or(p.birth_date, NOT_FILLED)),
    ];
    for (i, (name, content)) in rows.into_iter().enumerate() {
        let y = top + 48.0 + i as f32 * 34.0;
        nodes.push(text(x, y, name, LABEL));
        nodes.push(text(x + 100.0, y, content, VALUE));
    }

    let y = top + 48.0 + 4.0 * 34.0;
    nodes.push(text(x, y, "身份证件号", LABEL));
    nodes.push(ctx.id_link(
        x + 100.0,
        y,
        p.id_url,
        or_placeholder(p.id_number, NOT_FILLED),
        TextStyle::new(15.0, AMBER_600).bold(),
    ));
}

/// Geschwungenes Eckornament, für die anderen Ecken gedreht
fn ornament(rotate: f32, cx: f32, cy: f32, x: f32, y: f32) -> Node {
    Node::Group {
        rotate,
        cx,
        cy,
        opacity: 0.3,
        children: vec![
            Node::Path {
                d: format!(
                    "M {:.1} {:.1} Q {:.1} {:.1} {:.1} {:.1} M {:.1} {:.1} Q {:.1} {:.1} {:.1} {:.1}",
                    x,
                    y + 64.0,
                    x,
                    y,
                    x + 64.0,
                    y,
                    x + 12.0,
                    y + 48.0,
                    x + 12.0,
                    y + 12.0,
                    x + 48.0,
                    y + 12.0
                ),
                fill: None,
                stroke: stroke(AMBER_700, 2.0),
            },
            Node::Circle {
                cx: x + 18.0,
                cy: y + 18.0,
                r: 4.0,
                fill: Some(AMBER_700),
                stroke: None,
            },
        ],
    }
}

pub(crate) fn render(ctx: &Context) -> DocumentTree {
    let record = ctx.record;
    let mut nodes = Vec::new();

    nodes.push(rect(10.0, 10.0, 780.0, 980.0, 8.0, Some(AMBER_50), stroke(AMBER_200, 1.0)));

    // Kopf
    nodes.push(text(400.0, 84.0, "CERTIFICATE OF", TextStyle::new(13.0, AMBER_800).centered()));
    nodes.push(text(400.0, 128.0, "Marriage", TextStyle::new(36.0, AMBER_700).bold().centered()));
    nodes.push(line(336.0, 146.0, 464.0, 146.0, AMBER_300, 1.0));

    // Rahmen mit Herz
    nodes.push(rect(50.0, 180.0, 700.0, 740.0, 10.0, None, stroke(AMBER_200, 2.0)));
    nodes.push(rect(380.0, 168.0, 40.0, 24.0, 0.0, Some(AMBER_50), None));
    nodes.push(heart(400.0, 180.0, 22.0, AMBER_400));

    // Rundes Foto
    nodes.push(Node::Circle {
        cx: 190.0,
        cy: 330.0,
        r: 100.0,
        fill: Some(AMBER_100),
        stroke: stroke(AMBER_200, 8.0),
    });
    nodes.extend(ctx.photo_or(
        94.0,
        234.0,
        192.0,
        192.0,
        PhotoShape::Circle,
        camera(190.0, 330.0, AMBER_300),
    ));

    let info = [
        ("登记日期", date_or(record.registration_date(), NOT_FILLED)),
        ("登记员", or_placeholder(record.registrar(), NOT_FILLED)),
        ("证书编号", or_placeholder(record.certificate_number(), NOT_GENERATED)),
    ];
    for (i, (name, content)) in info.into_iter().enumerate() {
        let y = 260.0 + i as f32 * 60.0;
        nodes.push(text(340.0, y, name, TextStyle::new(13.0, AMBER_700).bold()));
        nodes.push(text(340.0, y + 26.0, content, TextStyle::new(19.0, AMBER_900)));
    }

    column(ctx, &mut nodes, Party::First, 80.0);
    column(ctx, &mut nodes, Party::Second, 420.0);

    // Schluss mit Stempel
    nodes.push(text(
        80.0,
        860.0,
        "此证书证明双方已依法登记结婚，具有法律效力。",
        TextStyle::new(14.0, AMBER_700).italic(),
    ));
    nodes.push(seal(
        680.0,
        850.0,
        42.0,
        AMBER_800,
        0.0,
        0.6,
        date_or(record.registration_date(), "日期"),
    ));

    nodes.push(ornament(0.0, 400.0, 500.0, 12.0, 12.0));
    nodes.push(ornament(90.0, 400.0, 500.0, -88.0, 112.0));
    nodes.push(ornament(180.0, 400.0, 500.0, 12.0, 12.0));
    nodes.push(ornament(270.0, 400.0, 500.0, -88.0, 112.0));

    DocumentTree::new(TemplateId::Elegant, AMBER_50, nodes)
}
