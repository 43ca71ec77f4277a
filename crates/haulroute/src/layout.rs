//! Circular layout of a route's stops.
//!
//! Stops are deduplicated by their `"City, ST"` name in first-seen order
//! and stored in an arena; edges refer to stops by [`WaypointId`], so
//! resolving an edge's endpoints never goes back through the names.
//!
//! ```text
//!   legs ──► dedupe names ──► place on circle ──► RouteGraph
//!            (arena ids)      r = 0.7·min(w,h)/2   waypoints + edges
//! ```

use crate::geometry::{Point, Size};
use crate::leg::Leg;
use crate::result::{HaulrouteError, HaulrouteResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Circle radius as a fraction of the smaller half-extent of the surface
    pub radius_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { radius_factor: 0.7 }
    }
}

impl LayoutConfig {
    /// Set the radius factor
    #[must_use]
    pub const fn with_radius_factor(mut self, factor: f64) -> Self {
        self.radius_factor = factor;
        self
    }

    /// Check that the radius factor lies in `(0, 1]`
    pub fn validate(&self) -> HaulrouteResult<()> {
        if !(self.radius_factor > 0.0 && self.radius_factor <= 1.0) {
            return Err(HaulrouteError::invalid_config(format!(
                "radius_factor must be in (0, 1], got {}",
                self.radius_factor
            )));
        }
        Ok(())
    }
}

/// Index of a waypoint in a [`RouteGraph`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaypointId(usize);

impl WaypointId {
    /// Position in the arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A unique named stop with its assigned position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Arena id
    pub id: WaypointId,
    /// Display name, `"City, ST"`
    pub name: String,
    /// Position on the surface
    pub position: Point,
}

/// A directed leg between two waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source waypoint
    pub from: WaypointId,
    /// Destination waypoint
    pub to: WaypointId,
    /// Empty repositioning move
    pub is_deadhead: bool,
    /// Distance in miles
    pub distance: f64,
    /// Estimated rate per mile
    pub rate: Option<f64>,
    /// Ship date
    pub ship_date: Option<String>,
    /// Receive date
    pub receive_date: Option<String>,
}

/// Waypoint arena plus the edges between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteGraph {
    waypoints: Vec<Waypoint>,
    edges: Vec<Edge>,
    center: Point,
    radius: f64,
}

impl RouteGraph {
    /// Lay out `legs` on a surface of the given size.
    ///
    /// A surface without area collapses the circle to its center rather
    /// than failing; the frame is wrong but the animation keeps running.
    #[must_use]
    pub fn build(legs: &[Leg], surface: Size, config: &LayoutConfig) -> Self {
        let mut ids: HashMap<String, WaypointId> = HashMap::new();
        let mut names: Vec<String> = Vec::new();
        let mut endpoints = Vec::with_capacity(legs.len());

        let mut intern = |name: String| -> WaypointId {
            *ids.entry(name).or_insert_with_key(|name| {
                names.push(name.clone());
                WaypointId(names.len() - 1)
            })
        };

        for leg in legs {
            let from = intern(leg.origin_name());
            let to = intern(leg.destination_name());
            endpoints.push((from, to));
        }

        let center = surface.center();
        let radius = if surface.has_area() {
            center.x.min(center.y) * config.radius_factor
        } else {
            if !legs.is_empty() {
                warn!(
                    width = surface.width,
                    height = surface.height,
                    "surface has no area; collapsing layout to center"
                );
            }
            0.0
        };
        let center = if center.x.is_finite() && center.y.is_finite() {
            center
        } else {
            Point::ZERO
        };

        let count = names.len();
        let waypoints: Vec<Waypoint> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let angle = i as f64 / count as f64 * TAU;
                Waypoint {
                    id: WaypointId(i),
                    name,
                    position: Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ),
                }
            })
            .collect();

        let edges = legs
            .iter()
            .zip(endpoints)
            .map(|(leg, (from, to))| Edge {
                from,
                to,
                is_deadhead: leg.is_deadhead,
                distance: leg.distance,
                rate: leg.rate_per_mile_est,
                ship_date: leg.ship_date.clone(),
                receive_date: leg.receive_date.clone(),
            })
            .collect::<Vec<_>>();

        debug!(
            waypoints = waypoints.len(),
            edges = edges.len(),
            radius,
            "route layout built"
        );

        Self {
            waypoints,
            edges,
            center,
            radius,
        }
    }

    /// Waypoints in first-seen order
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Edges in leg order
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a waypoint by id
    #[must_use]
    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id.index())
    }

    /// Source and destination positions of an edge
    #[must_use]
    pub fn endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
        let from = self.waypoint(edge.from)?;
        let to = self.waypoint(edge.to)?;
        Some((from.position, to.position))
    }

    /// Circle center
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Circle radius
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Check if the graph has nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn surface() -> Size {
        Size::new(800.0, 600.0)
    }

    #[test]
    fn test_single_leg() {
        let legs = vec![Leg::new(("Dallas", "TX"), ("Austin", "TX"))
            .with_distance(195.0)
            .with_rate(2.1)];
        let graph = RouteGraph::build(&legs, surface(), &LayoutConfig::default());

        assert_eq!(graph.waypoints().len(), 2);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.waypoints()[0].name, "Dallas, TX");
        assert_eq!(graph.waypoints()[1].name, "Austin, TX");

        let edge = &graph.edges()[0];
        assert_eq!(edge.from.index(), 0);
        assert_eq!(edge.to.index(), 1);
        assert_eq!(edge.rate, Some(2.1));
        assert!(!edge.is_deadhead);
    }

    #[test]
    fn test_radius_and_positions() {
        let legs = vec![
            Leg::new(("A", "TX"), ("B", "TX")),
            Leg::new(("B", "TX"), ("C", "TX")),
            Leg::new(("C", "TX"), ("D", "TX")),
        ];
        let graph = RouteGraph::build(&legs, surface(), &LayoutConfig::default());

        // min(400, 300) * 0.7
        assert!((graph.radius() - 210.0).abs() < 1e-9);
        assert_eq!(graph.center(), Point::new(400.0, 300.0));

        let positions: Vec<Point> = graph.waypoints().iter().map(|w| w.position).collect();
        assert!((positions[0].x - 610.0).abs() < 1e-9);
        assert!((positions[0].y - 300.0).abs() < 1e-9);
        assert!((positions[1].x - 400.0).abs() < 1e-9);
        assert!((positions[1].y - 510.0).abs() < 1e-9);
        assert!((positions[2].x - 190.0).abs() < 1e-9);
        assert!((positions[3].y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_stops_dedupe_in_first_seen_order() {
        let legs = vec![
            Leg::new(("Dallas", "TX"), ("Austin", "TX")),
            Leg::new(("Austin", "TX"), ("Dallas", "TX")).deadhead(true),
            Leg::new(("Dallas", "TX"), ("Tulsa", "OK")),
        ];
        let graph = RouteGraph::build(&legs, surface(), &LayoutConfig::default());
        let names: Vec<&str> = graph.waypoints().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Dallas, TX", "Austin, TX", "Tulsa, OK"]);
        assert_eq!(graph.edges().len(), 3);
        assert_eq!(graph.edges()[1].from.index(), 1);
        assert_eq!(graph.edges()[1].to.index(), 0);
        assert!(graph.edges()[1].is_deadhead);
    }

    #[test]
    fn test_duplicate_legs_stay_separate_edges() {
        let leg = Leg::new(("Dallas", "TX"), ("Austin", "TX"));
        let graph = RouteGraph::build(
            &[leg.clone(), leg.with_distance(10.0)],
            surface(),
            &LayoutConfig::default(),
        );
        assert_eq!(graph.waypoints().len(), 2);
        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.edges()[0].from, graph.edges()[1].from);
        assert_eq!(graph.edges()[0].to, graph.edges()[1].to);
    }

    #[test]
    fn test_names_match_exactly() {
        // Formatting differences produce distinct stops
        let legs = vec![
            Leg::new(("Dallas", "TX"), ("Austin", "TX")),
            Leg::new(("dallas", "TX"), ("Austin", "Tx")),
        ];
        let graph = RouteGraph::build(&legs, surface(), &LayoutConfig::default());
        assert_eq!(graph.waypoints().len(), 4);
    }

    #[test]
    fn test_empty_route() {
        let graph = RouteGraph::build(&[], surface(), &LayoutConfig::default());
        assert!(graph.is_empty());
        assert!(graph.waypoints().is_empty());
    }

    #[test]
    fn test_self_loop_is_kept() {
        let legs = vec![Leg::new(("Dallas", "TX"), ("Dallas", "TX"))];
        let graph = RouteGraph::build(&legs, surface(), &LayoutConfig::default());
        assert_eq!(graph.waypoints().len(), 1);
        let (from, to) = graph.endpoints(&graph.edges()[0]).unwrap();
        assert_eq!(from, to);
    }

    #[test]
    fn test_zero_surface_collapses() {
        let legs = vec![Leg::new(("Dallas", "TX"), ("Austin", "TX"))];
        let graph = RouteGraph::build(&legs, Size::new(0.0, 0.0), &LayoutConfig::default());
        assert_eq!(graph.radius(), 0.0);
        for waypoint in graph.waypoints() {
            assert_eq!(waypoint.position, Point::ZERO);
        }
    }

    #[test]
    fn test_flat_surface_collapses_to_its_center() {
        let legs = vec![Leg::new(("Dallas", "TX"), ("Austin", "TX"))];
        let graph = RouteGraph::build(&legs, Size::new(0.0, 600.0), &LayoutConfig::default());
        assert_eq!(graph.radius(), 0.0);
        assert_eq!(graph.center(), Point::new(0.0, 300.0));
        for waypoint in graph.waypoints() {
            assert_eq!(waypoint.position, Point::new(0.0, 300.0));
        }
    }

    #[test]
    fn test_non_finite_surface_falls_back_to_origin() {
        let legs = vec![Leg::new(("Dallas", "TX"), ("Austin", "TX"))];
        let graph = RouteGraph::build(&legs, Size::new(f64::NAN, 600.0), &LayoutConfig::default());
        assert_eq!(graph.center(), Point::ZERO);
    }

    #[test]
    fn test_custom_radius_factor() {
        let legs = vec![Leg::new(("A", "TX"), ("B", "TX"))];
        let config = LayoutConfig::default().with_radius_factor(0.5);
        let graph = RouteGraph::build(&legs, surface(), &config);
        assert!((graph.radius() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_radius_factor() {
        assert!(LayoutConfig::default().validate().is_ok());
        assert!(LayoutConfig::default().with_radius_factor(1.0).validate().is_ok());
        assert!(LayoutConfig::default().with_radius_factor(0.0).validate().is_err());
        assert!(LayoutConfig::default().with_radius_factor(1.5).validate().is_err());
        assert!(LayoutConfig::default()
            .with_radius_factor(f64::NAN)
            .validate()
            .is_err());
    }

    fn arb_legs() -> impl Strategy<Value = Vec<Leg>> {
        let city = prop::sample::select(vec!["Dallas", "Austin", "Tulsa", "Reno", "Boise", "Waco"]);
        prop::collection::vec((city.clone(), city, any::<bool>()), 0..12).prop_map(|raw| {
            raw.into_iter()
                .map(|(a, b, deadhead)| Leg::new((a, "TX"), (b, "TX")).deadhead(deadhead))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_counts_match_unique_names(legs in arb_legs()) {
            let graph = RouteGraph::build(&legs, surface(), &LayoutConfig::default());
            let mut unique: Vec<String> = Vec::new();
            for leg in &legs {
                for name in [leg.origin_name(), leg.destination_name()] {
                    if !unique.contains(&name) {
                        unique.push(name);
                    }
                }
            }
            prop_assert_eq!(graph.edges().len(), legs.len());
            let names: Vec<String> = graph.waypoints().iter().map(|w| w.name.clone()).collect();
            prop_assert_eq!(names, unique);
        }

        #[test]
        fn prop_waypoints_on_circle(legs in arb_legs(), w in 50.0f64..2000.0, h in 50.0f64..2000.0) {
            let graph = RouteGraph::build(&legs, Size::new(w, h), &LayoutConfig::default());
            let expected_radius = (w / 2.0).min(h / 2.0) * 0.7;
            let count = graph.waypoints().len();
            for (i, waypoint) in graph.waypoints().iter().enumerate() {
                let angle = i as f64 / count as f64 * TAU;
                prop_assert!((graph.center().distance_to(waypoint.position) - expected_radius).abs() < 1e-6);
                prop_assert!((waypoint.position.x - (w / 2.0 + expected_radius * angle.cos())).abs() < 1e-6);
                prop_assert!((waypoint.position.y - (h / 2.0 + expected_radius * angle.sin())).abs() < 1e-6);
            }
        }

        #[test]
        fn prop_every_edge_resolves(legs in arb_legs()) {
            let graph = RouteGraph::build(&legs, surface(), &LayoutConfig::default());
            for edge in graph.edges() {
                prop_assert!(graph.endpoints(edge).is_some());
            }
        }
    }
}
