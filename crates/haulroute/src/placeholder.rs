//! Looping "planning" placeholder shown while a route is being fetched.

use crate::canvas::{Canvas, DrawCommand, Rect, StrokeStyle, TextStyle, Transform2D};
use crate::geometry::Point;
use crate::palette::Palette;
use crate::render::truck_parts;

/// Caption drawn under the road
pub const CAPTION: &str = "Planning your route...";

const ROAD_HEIGHT: f64 = 40.0;
const ROAD_LINE_DASH: [f64; 2] = [20.0, 15.0];
const TRUCK_MARGIN: f64 = 30.0;
const CAPTION_GAP: f64 = 40.0;
const CAPTION_FONT: f64 = 16.0;

/// Phase of the placeholder loop, in `[0, 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placeholder {
    phase: f64,
}

impl Placeholder {
    /// Placeholder at the start of its loop
    #[must_use]
    pub const fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> f64 {
        self.phase
    }

    /// Advance by `step` and wrap
    pub fn advance(&mut self, step: f64) {
        self.phase = (self.phase + step).rem_euclid(1.0);
        if self.phase >= 1.0 {
            self.phase = 0.0;
        }
    }

    /// Draw a road across the middle of the surface with a truck crossing it
    pub fn draw(&self, canvas: &mut dyn Canvas, palette: &Palette) {
        let size = canvas.size();
        let center = size.center();
        canvas.draw(DrawCommand::Clear { size });

        canvas.draw(DrawCommand::Rect {
            bounds: Rect::new(0.0, center.y - ROAD_HEIGHT / 2.0, size.width, ROAD_HEIGHT),
            fill: palette.road,
        });
        canvas.draw(DrawCommand::Line {
            from: Point::new(0.0, center.y),
            to: Point::new(size.width, center.y),
            style: StrokeStyle::dashed(palette.road_line, 2.0, &ROAD_LINE_DASH),
        });

        let span = size.width + 2.0 * TRUCK_MARGIN;
        let x = -TRUCK_MARGIN + self.phase * span;
        canvas.draw(DrawCommand::Group {
            children: truck_parts(palette.truck_body, palette.truck_cab, palette.truck_wheel),
            transform: Transform2D::translate(x, center.y - ROAD_HEIGHT / 4.0),
        });

        canvas.draw(DrawCommand::Text {
            content: CAPTION.to_string(),
            position: Point::new(center.x, center.y + CAPTION_GAP),
            style: TextStyle::new(CAPTION_FONT, palette.annotation),
        });
    }
}
