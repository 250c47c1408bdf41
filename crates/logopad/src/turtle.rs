use std::path::Path;

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::{drawing, DrawingError, PenColor};

pub const DEFAULT_PEN_WIDTH: f64 = 1.0;

/// Milliseconds that a front end may wait after each step, for animation.
pub const DEFAULT_SPEED: f64 = 1.0;

/// A straight line that the turtle drew, in canvas pixels.
///
/// Segments don't remember the pen they were drawn with: the canvas strokes all of them
/// with whatever pen is current at render time.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Segment {
        Segment {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

/// The size of the canvas the turtle lives on.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> CanvasConfig {
        CanvasConfig {
            width: 600.0,
            height: 675.0,
        }
    }
}

impl CanvasConfig {
    /// Where the turtle goes home to.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The turtle, together with everything it has drawn so far.
///
/// Coordinates are canvas pixels, with y growing downwards. The heading is in degrees, with 0
/// pointing right and positive angles turning counter-clockwise (as seen on screen). The heading
/// is never normalized, so turning left by 360 twice leaves a heading of 720.
#[derive(Clone, Debug)]
pub struct Turtle {
    config: CanvasConfig,
    pos: Point,
    heading: f64,
    pen_down: bool,
    pen_width: f64,
    pen_color: PenColor,
    speed: f64,
    segments: Vec<Segment>,
    // Bumped every time the canvas needs repainting.
    frame: u64,
}

impl Default for Turtle {
    fn default() -> Turtle {
        Turtle::new(CanvasConfig::default())
    }
}

impl Turtle {
    pub fn new(config: CanvasConfig) -> Turtle {
        Turtle {
            config,
            pos: config.center(),
            heading: 0.0,
            pen_down: true,
            pen_width: DEFAULT_PEN_WIDTH,
            pen_color: PenColor::BLACK,
            speed: DEFAULT_SPEED,
            segments: Vec::new(),
            frame: 0,
        }
    }

    fn request_redraw(&mut self) {
        self.frame += 1;
    }

    /// Moves `dist` pixels along the current heading, drawing a segment if the pen is down.
    pub fn forward(&mut self, dist: f64) {
        let (s, c) = self.heading.to_radians().sin_cos();
        // Screen y points down, so a positive heading has to move the turtle up.
        let to = self.pos + Vec2::new(dist * c, -dist * s);
        if self.pen_down {
            self.segments.push(Segment::new(self.pos, to));
        }
        self.pos = to;
        self.request_redraw();
    }

    /// Moves `dist` pixels against the current heading.
    ///
    /// This turns around, walks forward and turns back, so the heading afterwards is
    /// `(h + 180) - 180`, which is only equal to `h` up to rounding.
    pub fn back(&mut self, dist: f64) {
        self.left(180.0);
        self.forward(dist);
        self.right(180.0);
    }

    pub fn right(&mut self, degrees: f64) {
        self.heading -= degrees;
        self.request_redraw();
    }

    pub fn left(&mut self, degrees: f64) {
        self.heading += degrees;
        self.request_redraw();
    }

    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    pub fn set_pen_size(&mut self, width: f64) {
        self.pen_width = width;
    }

    pub fn set_pen_color(&mut self, color: PenColor) {
        self.pen_color = color;
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Sends the turtle home (to the middle of the canvas, facing right, pen down and
    /// default pen) and wipes the canvas.
    pub fn reset(&mut self) {
        let frame = self.frame;
        *self = Turtle::new(self.config);
        self.frame = frame;
        self.request_redraw();
    }

    /// Wipes the canvas but leaves the turtle where it is.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.request_redraw();
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    pub fn pen_color(&self) -> PenColor {
        self.pen_color
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// A counter that changes whenever the canvas is out of date.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            x: self.pos.x,
            y: self.pos.y,
            heading: self.heading,
            pen_down: self.pen_down,
            pen_width: self.pen_width,
            pen_color: self.pen_color,
            speed: self.speed,
            segments: self.segments.clone(),
        }
    }

    /// Writes the segments (and nothing else about the turtle) to a drawing file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), DrawingError> {
        drawing::save(path, &self.segments)
    }

    /// Replaces the segments with the ones in a drawing file.
    ///
    /// If the file can't be opened, the current segments are left alone.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), DrawingError> {
        self.segments = drawing::load(path)?;
        self.request_redraw();
        Ok(())
    }
}

/// Everything observable about a turtle at one moment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub pen_down: bool,
    pub pen_width: f64,
    pub pen_color: PenColor,
    pub speed: f64,
    pub segments: Vec<Segment>,
}
