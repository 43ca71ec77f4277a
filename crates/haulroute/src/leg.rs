//! Route legs and the trip-plan envelope they arrive in.
//!
//! The planner backend answers with either a full trip plan (the route
//! plus totals it computed) or, in saved snapshots, a bare array of legs.
//! Both shapes load into [`TripPlan`].

use crate::result::{HaulrouteError, HaulrouteResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One directed segment of a trip, loaded or empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Origin city
    pub origin_city: String,
    /// Origin state code
    pub origin_state: String,
    /// Destination city
    pub destination_city: String,
    /// Destination state code
    pub destination_state: String,
    /// Repositioning move with no paid cargo
    #[serde(default)]
    pub is_deadhead: bool,
    /// Distance in miles
    #[serde(default)]
    pub distance: f64,
    /// Estimated rate per mile in dollars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_per_mile_est: Option<f64>,
    /// Ship date as sent by the backend (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
    /// Receive date as sent by the backend (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_date: Option<String>,
    /// Load weight in pounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Equipment code (e.g. `V` for dry van)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
}

impl Leg {
    /// Create a loaded leg between two `(city, state)` pairs
    #[must_use]
    pub fn new(origin: (&str, &str), destination: (&str, &str)) -> Self {
        Self {
            origin_city: origin.0.to_string(),
            origin_state: origin.1.to_string(),
            destination_city: destination.0.to_string(),
            destination_state: destination.1.to_string(),
            is_deadhead: false,
            distance: 0.0,
            rate_per_mile_est: None,
            ship_date: None,
            receive_date: None,
            weight: None,
            equipment_type: None,
        }
    }

    /// Mark as a deadhead move
    #[must_use]
    pub const fn deadhead(mut self, is_deadhead: bool) -> Self {
        self.is_deadhead = is_deadhead;
        self
    }

    /// Set distance in miles
    #[must_use]
    pub const fn with_distance(mut self, miles: f64) -> Self {
        self.distance = miles;
        self
    }

    /// Set estimated rate per mile
    #[must_use]
    pub const fn with_rate(mut self, rate: f64) -> Self {
        self.rate_per_mile_est = Some(rate);
        self
    }

    /// Set ship and receive dates
    #[must_use]
    pub fn with_dates(mut self, ship: &str, receive: &str) -> Self {
        self.ship_date = Some(ship.to_string());
        self.receive_date = Some(receive.to_string());
        self
    }

    /// Display name of the origin stop, `"City, ST"`
    #[must_use]
    pub fn origin_name(&self) -> String {
        stop_name(&self.origin_city, &self.origin_state)
    }

    /// Display name of the destination stop, `"City, ST"`
    #[must_use]
    pub fn destination_name(&self) -> String {
        stop_name(&self.destination_city, &self.destination_state)
    }
}

fn stop_name(city: &str, state: &str) -> String {
    format!("{city}, {state}")
}

/// Trip plan as returned by the planner backend.
///
/// Totals are computed server-side and only displayed here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Ordered legs; `None` before a plan exists
    #[serde(default)]
    pub route: Option<Vec<Leg>>,
    /// Total revenue in dollars
    #[serde(default)]
    pub total_revenue: f64,
    /// Total miles, loaded and empty
    #[serde(default)]
    pub total_miles: f64,
    /// Empty miles
    #[serde(default)]
    pub total_deadhead: f64,
    /// Revenue per loaded mile
    #[serde(default)]
    pub rate_per_mile: f64,
    /// Calendar days from first ship to last receive
    #[serde(default)]
    pub total_days: u32,
    /// Number of paid loads
    #[serde(default)]
    pub total_loads: u32,
}

impl TripPlan {
    /// Wrap bare legs in a plan with zeroed totals
    #[must_use]
    pub fn from_legs(legs: Vec<Leg>) -> Self {
        Self {
            route: Some(legs),
            ..Self::default()
        }
    }

    /// Parse either a full plan object or a bare array of legs
    pub fn from_json_str(json: &str) -> HaulrouteResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            let legs: Vec<Leg> = serde_json::from_value(value)?;
            Ok(Self::from_legs(legs))
        } else if value.is_object() {
            Ok(serde_json::from_value(value)?)
        } else {
            Err(HaulrouteError::invalid_route(
                "expected a trip plan object or an array of legs",
            ))
        }
    }

    /// Load a plan from a JSON file
    pub fn load(path: &Path) -> HaulrouteResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Legs of the plan, empty when no route is present
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        self.route.as_deref().unwrap_or(&[])
    }

    /// Check if the plan carries at least one leg
    #[must_use]
    pub fn has_route(&self) -> bool {
        !self.legs().is_empty()
    }
}
