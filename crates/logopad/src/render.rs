//! Painting the canvas.
//!
//! The canvas is painted from scratch every time: a white background, every segment in the
//! turtle's *current* pen, and then a small red dot where the turtle is.

use std::path::Path;

use kurbo::{Circle, Line};
use svg::{
    node::element::{Circle as SvgCircle, Group, Line as SvgLine, Rectangle},
    Document,
};

use crate::{DrawingError, PenColor, Turtle};

pub const MARKER_RADIUS: f64 = 4.0;
pub const MARKER_COLOR: PenColor = PenColor::RED;
pub const BACKGROUND: PenColor = PenColor::WHITE;

/// Everything that goes on the canvas, in painting order.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: PenColor,
    pub stroke_color: PenColor,
    pub stroke_width: f64,
    pub lines: Vec<Line>,
    pub marker: Circle,
    pub marker_color: PenColor,
}

impl Scene {
    pub fn from_turtle(turtle: &Turtle) -> Scene {
        Scene {
            width: turtle.config().width,
            height: turtle.config().height,
            background: BACKGROUND,
            stroke_color: turtle.pen_color(),
            // A zero or negative width means the thinnest line the canvas can draw.
            stroke_width: if turtle.pen_width() > 0.0 {
                turtle.pen_width()
            } else {
                1.0
            },
            lines: turtle
                .segments()
                .iter()
                .map(|s| Line::new(s.start(), s.end()))
                .collect(),
            marker: Circle::new(turtle.position(), MARKER_RADIUS),
            marker_color: MARKER_COLOR,
        }
    }

    pub fn to_document(&self) -> Document {
        let background = Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", self.width)
            .set("height", self.height)
            .set("fill", self.background.to_hex());

        let mut strokes = Group::new()
            .set("fill", "none")
            .set("stroke", self.stroke_color.to_hex())
            .set("stroke-width", self.stroke_width);
        for line in &self.lines {
            strokes = strokes.add(
                SvgLine::new()
                    .set("x1", line.p0.x)
                    .set("y1", line.p0.y)
                    .set("x2", line.p1.x)
                    .set("y2", line.p1.y),
            );
        }

        let marker = SvgCircle::new()
            .set("cx", self.marker.center.x)
            .set("cy", self.marker.center.y)
            .set("r", self.marker.radius)
            .set("fill", self.marker_color.to_hex());

        Document::new()
            .set("viewBox", (0.0, 0.0, self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .add(background)
            .add(strokes)
            .add(marker)
    }
}

pub fn to_svg_string(turtle: &Turtle) -> String {
    Scene::from_turtle(turtle).to_document().to_string()
}

pub fn save_svg(path: impl AsRef<Path>, turtle: &Turtle) -> Result<(), DrawingError> {
    let path = path.as_ref();
    svg::save(path, &Scene::from_turtle(turtle).to_document()).map_err(|source| {
        DrawingError::Open {
            path: path.to_owned(),
            source,
        }
    })?;
    log::info!("wrote canvas to {}", path.display());
    Ok(())
}
