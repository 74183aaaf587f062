use glam::DVec2;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path, Rectangle};
use svg::Document;

use crate::normalize::{Level, LEVEL_HEIGHT, LEVEL_WIDTH};

type Num = f32;

//Space around the playing field in the preview
const MARGIN: Num = 0.5;
const STROKE_WIDTH: Num = 0.05;
const START_MARKER_RADIUS: Num = 0.15;

/*
Draws the level the way the game will show it:
- x points right
- y points up
- the first vertex that gets typed is marked, the rest follow counter-clockwise
*/
pub fn scribe(level: &Level) -> Document {
    let (width, height) = (LEVEL_WIDTH as Num, LEVEL_HEIGHT as Num);
    let (half_w, half_h) = (width / 2.0, height / 2.0);

    let field = Rectangle::new()
        .set("x", -half_w)
        .set("y", -half_h)
        .set("width", width)
        .set("height", height)
        .set("fill", "none")
        .set("stroke", "grey")
        .set("stroke-width", STROKE_WIDTH);

    let mut group = Group::new().set("transform", "scale(1,-1)").add(field);

    if let Some((first, rest)) = level.vertices.split_first() {
        let data = rest
            .iter()
            .fold(Data::new().move_to(point(first)), |d, v| d.line_to(point(v)))
            .close();
        let outline = Path::new()
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH)
            .set("d", data);
        let start = Circle::new()
            .set("cx", first.x as Num)
            .set("cy", first.y as Num)
            .set("r", START_MARKER_RADIUS)
            .set("fill", "red");
        group = group.add(outline).add(start);
    }

    Document::new()
        .set(
            "viewBox",
            (
                -half_w - MARGIN,
                -half_h - MARGIN,
                width + 2.0 * MARGIN,
                height + 2.0 * MARGIN,
            ),
        )
        .add(group)
}

fn point(v: &DVec2) -> (Num, Num) {
    (v.x as Num, v.y as Num)
}
