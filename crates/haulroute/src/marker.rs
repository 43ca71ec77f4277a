//! Truck markers travelling along edges.

use crate::geometry::Point;
use crate::layout::{Edge, RouteGraph};

/// Pose of a marker on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPose {
    /// Interpolated position
    pub position: Point,
    /// Direction of travel in radians
    pub heading: f64,
}

/// One animated token per edge, looping from source to destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    edge: usize,
    progress: f64,
}

impl Marker {
    /// Marker at the start of edge `edge`
    #[must_use]
    pub const fn new(edge: usize) -> Self {
        Self { edge, progress: 0.0 }
    }

    /// One marker per edge of `graph`, all at progress 0
    #[must_use]
    pub fn for_graph(graph: &RouteGraph) -> Vec<Self> {
        (0..graph.edges().len()).map(Self::new).collect()
    }

    /// Index of the edge this marker rides
    #[must_use]
    pub const fn edge(&self) -> usize {
        self.edge
    }

    /// Fractional position along the edge, in `[0, 1)`
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Advance by `step` and wrap to `[0, 1)`
    pub fn advance(&mut self, step: f64) {
        self.progress = wrap_unit(self.progress + step);
    }

    /// Position and heading on `graph`, `None` if the edge is not in it
    #[must_use]
    pub fn pose(&self, graph: &RouteGraph) -> Option<MarkerPose> {
        let edge: &Edge = graph.edges().get(self.edge)?;
        let (from, to) = graph.endpoints(edge)?;
        Some(MarkerPose {
            position: from.lerp(to, self.progress),
            heading: from.heading_to(to),
        })
    }
}

/// Wrap into `[0, 1)`
fn wrap_unit(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for values just below 0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
