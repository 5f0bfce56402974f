//! Vintage: Papierton, gekipptes Fotorähmchen, Namen als Kartenüberschrift.

use super::{
    camera, corner, date_or, line, or_placeholder, rect, stroke, text, Context, DocumentTree,
    Node, PhotoShape, TextStyle, NOT_FILLED, NOT_GENERATED,
};
use crate::template::{Party, TemplateId};

const AMBER_50: &str = "#fffbeb";
const AMBER_100: &str = "#fef3c7";
const AMBER_200: &str = "#fde68a";
const AMBER_300: &str = "#fcd34d";
const AMBER_700: &str = "#b45309";
const AMBER_800: &str = "#92400e";
const AMBER_900: &str = "#78350f";

const LABEL: TextStyle = TextStyle::new(15.0, AMBER_800);
const VALUE: TextStyle = TextStyle::new(15.0, AMBER_900).bold().end();

fn card(ctx: &Context, nodes: &mut Vec<Node>, party: Party, x: f32) {
    let heading = match party {
        Party::First => "第一位姓名",
        Party::Second => "第二位姓名",
    };
    let p = ctx.record.party(party);
    let (top, width) = (480.0, 320.0);
    let right = x + width - 20.0;

    nodes.push(rect(x, top, width, 270.0, 4.0, Some(AMBER_50), stroke(AMBER_300, 1.0)));
    nodes.push(text(
        x + width / 2.0,
        top + 36.0,
        or_placeholder(p.name, heading),
        TextStyle::new(19.0, AMBER_900).bold().centered(),
    ));
    nodes.push(line(x + 20.0, top + 50.0, right, top + 50.0, AMBER_300, 1.0));

    let rows = [
        ("性别", or_placeholder(p.gender, NOT_FILLED)),
        ("办理地", or_placeholder(p.registration_place, NOT_FILLED)),
        ("出生日期", date_or(p.birth_date, NOT_FILLED)),
    ];
    for (i, (name, content)) in rows.into_iter().enumerate() {
        let y = top + 84.0 + i as f32 * 34.0;
        nodes.push(text(x + 20.0, y, name, LABEL));
        nodes.push(text(right, y, content, VALUE));
    }

    let y = top + 200.0;
    nodes.push(line(x + 20.0, y - 16.0, right, y - 16.0, AMBER_300, 1.0));
    nodes.push(text(x + 20.0, y + 4.0, "身份证件号", TextStyle::new(13.0, AMBER_800)));
    nodes.push(ctx.id_link(
        x + 20.0,
        y + 32.0,
        p.id_url,
        or_placeholder(p.id_number, NOT_FILLED),
        TextStyle::new(15.0, AMBER_700).bold(),
    ));
}

pub(crate) fn render(ctx: &Context) -> DocumentTree {
    let record = ctx.record;
    let mut nodes = Vec::new();

    nodes.push(rect(8.0, 8.0, 784.0, 984.0, 8.0, Some(AMBER_100), stroke(AMBER_800, 8.0)));

    // Kopf
    nodes.push(line(250.0, 60.0, 550.0, 60.0, AMBER_800, 1.0));
    nodes.push(text(400.0, 115.0, "结婚证书", TextStyle::new(36.0, AMBER_900).bold().centered()));
    nodes.push(text(
        400.0,
        145.0,
        "CERTIFICATE OF MARRIAGE",
        TextStyle::new(13.0, AMBER_800).centered(),
    ));

    nodes.push(rect(50.0, 175.0, 700.0, 745.0, 4.0, Some(AMBER_50), stroke(AMBER_700, 2.0)));

    // Gekipptes Rähmchen hinter dem Foto
    nodes.push(Node::Group {
        rotate: 3.0,
        cx: 170.0,
        cy: 306.0,
        opacity: 1.0,
        children: vec![rect(90.0, 210.0, 160.0, 192.0, 8.0, None, stroke(AMBER_800, 8.0))],
    });
    nodes.push(rect(90.0, 210.0, 160.0, 192.0, 8.0, Some(AMBER_50), stroke(AMBER_200, 4.0)));
    nodes.extend(ctx.photo_or(
        94.0,
        214.0,
        152.0,
        184.0,
        PhotoShape::Rect { radius: 6.0 },
        camera(170.0, 306.0, AMBER_300),
    ));

    nodes.push(text(300.0, 230.0, "婚姻登记证明", TextStyle::new(19.0, AMBER_900).bold()));
    nodes.push(text(300.0, 256.0, "兹证明以下二人已依法办理结婚登记", TextStyle::new(13.0, AMBER_700)));

    nodes.push(text(300.0, 300.0, "登记日期", TextStyle::new(13.0, AMBER_800).bold()));
    nodes.push(text(
        300.0,
        326.0,
        date_or(record.registration_date(), NOT_FILLED),
        TextStyle::new(18.0, AMBER_900),
    ));
    nodes.push(text(520.0, 300.0, "登记员", TextStyle::new(13.0, AMBER_800).bold()));
    nodes.push(text(
        520.0,
        326.0,
        or_placeholder(record.registrar(), NOT_FILLED),
        TextStyle::new(18.0, AMBER_900),
    ));
    nodes.push(text(300.0, 370.0, "证书编号", TextStyle::new(13.0, AMBER_800).bold()));
    nodes.push(text(
        300.0,
        396.0,
        or_placeholder(record.certificate_number(), NOT_GENERATED),
        TextStyle::new(18.0, AMBER_900).bold(),
    ));

    card(ctx, &mut nodes, Party::First, 70.0);
    card(ctx, &mut nodes, Party::Second, 410.0);

    nodes.push(text(
        80.0,
        860.0,
        "兹证明上述二人的结婚登记符合法律规定，特发此证。",
        TextStyle::new(14.0, AMBER_800).italic(),
    ));

    // Siegel
    nodes.push(Node::Group {
        rotate: -8.0,
        cx: 680.0,
        cy: 845.0,
        opacity: 0.7,
        children: vec![
            Node::Circle {
                cx: 680.0,
                cy: 845.0,
                r: 44.0,
                fill: None,
                stroke: stroke(AMBER_800, 3.0),
            },
            Node::Circle {
                cx: 680.0,
                cy: 845.0,
                r: 36.0,
                fill: None,
                stroke: stroke(AMBER_800, 1.0),
            },
            text(680.0, 851.0, "囍", TextStyle::new(22.0, AMBER_800).bold().centered()),
        ],
    });

    for (x, y, dx, dy) in [
        (24.0, 24.0, 1.0, 1.0),
        (776.0, 24.0, -1.0, 1.0),
        (24.0, 976.0, 1.0, -1.0),
        (776.0, 976.0, -1.0, -1.0),
    ] {
        nodes.push(Node::Group {
            rotate: 0.0,
            cx: x,
            cy: y,
            opacity: 0.3,
            children: vec![
                corner(x, y, 64.0, dx, dy, AMBER_800, 3.0),
                corner(x + dx * 8.0, y + dy * 8.0, 40.0, dx, dy, AMBER_800, 1.5),
            ],
        });
    }

    DocumentTree::new(TemplateId::Vintage, AMBER_100, nodes)
}
