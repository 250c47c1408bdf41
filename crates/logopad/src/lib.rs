//! The drawing side of logopad: a turtle that records line segments, the
//! palette its pen draws with, a renderer that turns the recorded segments into
//! an SVG canvas, and the `<Drawing>` file format.

pub mod drawing;
pub mod palette;
pub mod render;
pub mod turtle;

pub use drawing::DrawingError;
pub use palette::PenColor;
pub use render::Scene;
pub use turtle::{CanvasConfig, Segment, Snapshot, Turtle};
