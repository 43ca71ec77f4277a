//! Frame rendering for a laid-out route.
//!
//! Paint order is fixed: clear, edges with their annotations, waypoint
//! nodes with labels, then one truck per marker on top.

use crate::canvas::{Canvas, Color, DrawCommand, Rect, StrokeStyle, TextStyle, Transform2D};
use crate::geometry::Point;
use crate::layout::{Edge, RouteGraph, Waypoint};
use crate::marker::{Marker, MarkerPose};
use crate::palette::Palette;
use tracing::warn;

const EDGE_WIDTH: f64 = 2.0;
const DEADHEAD_DASH: [f64; 2] = [5.0, 5.0];
const ANNOTATION_FONT: f64 = 12.0;
const ANNOTATION_ABOVE: f64 = -15.0;
const ANNOTATION_BELOW: f64 = 5.0;
const NODE_RADIUS: f64 = 8.0;
const NODE_OUTLINE: f64 = 2.0;
const LABEL_FONT: f64 = 14.0;
const LABEL_OFFSET: f64 = 25.0;
const WHEEL_RADIUS: f64 = 3.0;

/// Draw one full frame of the route onto `canvas`.
pub fn draw_frame(canvas: &mut dyn Canvas, graph: &RouteGraph, markers: &[Marker], palette: &Palette) {
    let size = canvas.size();
    canvas.draw(DrawCommand::Clear { size });

    for edge in graph.edges() {
        draw_edge(canvas, graph, edge, palette);
    }

    for waypoint in graph.waypoints() {
        draw_waypoint(canvas, waypoint, palette);
    }

    for marker in markers {
        match marker.pose(graph) {
            Some(pose) => canvas.draw(truck_icon(pose, palette)),
            None => warn!(edge = marker.edge(), "marker rides an edge missing from the graph"),
        }
    }
}

fn draw_edge(canvas: &mut dyn Canvas, graph: &RouteGraph, edge: &Edge, palette: &Palette) {
    let Some((from, to)) = graph.endpoints(edge) else {
        warn!(from = edge.from.index(), to = edge.to.index(), "edge endpoint missing");
        return;
    };

    let style = if edge.is_deadhead {
        StrokeStyle::dashed(palette.deadhead_edge, EDGE_WIDTH, &DEADHEAD_DASH)
    } else {
        StrokeStyle::solid(palette.revenue_edge, EDGE_WIDTH)
    };
    canvas.draw(DrawCommand::Line { from, to, style });

    let mid = from.midpoint(to);
    let text = TextStyle::new(ANNOTATION_FONT, palette.annotation);
    let (headline, dates) = edge_annotation(edge);
    canvas.draw(DrawCommand::Text {
        content: headline,
        position: mid.offset(0.0, ANNOTATION_ABOVE),
        style: text.clone(),
    });
    if let Some(dates) = dates {
        canvas.draw(DrawCommand::Text {
            content: dates,
            position: mid.offset(0.0, ANNOTATION_BELOW),
            style: text,
        });
    }
}

fn draw_waypoint(canvas: &mut dyn Canvas, waypoint: &Waypoint, palette: &Palette) {
    canvas.draw(DrawCommand::Circle {
        center: waypoint.position,
        radius: NODE_RADIUS,
        fill: Some(palette.node_fill),
        stroke: Some(StrokeStyle::solid(palette.node_outline, NODE_OUTLINE)),
    });
    canvas.draw(DrawCommand::Text {
        content: waypoint.name.clone(),
        position: waypoint.position.offset(0.0, LABEL_OFFSET),
        style: TextStyle::new(LABEL_FONT, palette.node_outline),
    });
}

/// Annotation lines for an edge: the distance line, and the date line if
/// there is one to show.
///
/// Deadhead moves show distance and ship date; loaded moves show distance,
/// rate, and `ship → receive` when both dates are known.
#[must_use]
pub fn edge_annotation(edge: &Edge) -> (String, Option<String>) {
    let miles = format_miles(edge.distance);
    let present = |date: &Option<String>| date.as_deref().filter(|d| !d.is_empty()).map(str::to_string);

    if edge.is_deadhead {
        (format!("{miles} mi (Deadhead)"), present(&edge.ship_date))
    } else {
        let rate = edge.rate.unwrap_or(0.0);
        let dates = match (present(&edge.ship_date), present(&edge.receive_date)) {
            (Some(ship), Some(receive)) => Some(format!("{ship} → {receive}")),
            _ => None,
        };
        (format!("{miles} mi - ${rate:.2}/mi"), dates)
    }
}

/// Whole miles, rounding halves up
#[must_use]
pub fn format_miles(distance: f64) -> String {
    format!("{:.0}", (distance + 0.5).floor())
}

/// Truck icon at `pose`, pointing along its heading.
#[must_use]
pub fn truck_icon(pose: MarkerPose, palette: &Palette) -> DrawCommand {
    let transform = Transform2D::translate(pose.position.x, pose.position.y)
        .then(&Transform2D::rotate(pose.heading));
    DrawCommand::Group {
        children: truck_parts(palette.truck_body, palette.truck_cab, palette.truck_wheel),
        transform,
    }
}

/// Truck body, cab and wheels in local coordinates, facing +x
pub(crate) fn truck_parts(body: Color, cab: Color, wheel: Color) -> Vec<DrawCommand> {
    vec![
        DrawCommand::Rect {
            bounds: Rect::new(-15.0, -8.0, 30.0, 16.0),
            fill: body,
        },
        DrawCommand::Rect {
            bounds: Rect::new(-15.0, -8.0, 10.0, 16.0),
            fill: cab,
        },
        DrawCommand::Circle {
            center: Point::new(-10.0, 8.0),
            radius: WHEEL_RADIUS,
            fill: Some(wheel),
            stroke: None,
        },
        DrawCommand::Circle {
            center: Point::new(10.0, 8.0),
            radius: WHEEL_RADIUS,
            fill: Some(wheel),
            stroke: None,
        },
    ]
}
