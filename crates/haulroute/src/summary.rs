//! Trip summary figures and per-leg segment cards.
//!
//! Totals come from the backend; this module only formats them the way
//! the planner page shows them.

use crate::leg::{Leg, TripPlan};
use serde::Serialize;
use std::fmt;

/// Headline figures of a trip plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripSummary {
    /// `$12,345`
    pub revenue: String,
    /// `1,234`
    pub total_miles: String,
    /// Number of paid loads
    pub total_loads: u32,
    /// Trip length in days
    pub total_days: u32,
    /// `$2.15`
    pub rate_per_mile: String,
}

impl TripSummary {
    /// Format the totals of `plan`
    #[must_use]
    pub fn from_plan(plan: &TripPlan) -> Self {
        Self {
            revenue: format!("${}", thousands(round_half_up(plan.total_revenue))),
            total_miles: thousands(round_half_up(plan.total_miles)),
            total_loads: plan.total_loads,
            total_days: plan.total_days,
            rate_per_mile: format!("${:.2}", plan.rate_per_mile),
        }
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Revenue:       {}", self.revenue)?;
        writeln!(f, "Total Miles:   {}", self.total_miles)?;
        writeln!(f, "Total Loads:   {}", self.total_loads)?;
        writeln!(f, "Days:          {}", self.total_days)?;
        write!(f, "Rate per Mile: {}", self.rate_per_mile)
    }
}

/// Cargo details shown for loaded legs only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadDetails {
    /// `42,000 lbs` or `N/A`
    pub weight: String,
    /// Equipment code or `N/A`
    pub equipment: String,
    /// Receive date, empty when unknown
    pub delivery: String,
}

/// One leg as a planner card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentCard {
    /// `Load #3` or `Deadhead Move`
    pub title: String,
    /// Ship date, empty when unknown
    pub ship_date: String,
    /// `City, ST`
    pub origin: String,
    /// `City, ST`
    pub destination: String,
    /// `195 miles`
    pub miles: String,
    /// `$2.10/mile`, loaded legs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    /// Loaded legs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<LoadDetails>,
}

impl SegmentCard {
    /// Card for the leg at `index` in the route; loads are numbered by
    /// route position, deadheads included
    #[must_use]
    pub fn new(leg: &Leg, index: usize) -> Self {
        let title = if leg.is_deadhead {
            "Deadhead Move".to_string()
        } else {
            format!("Load #{}", index + 1)
        };

        let (rate, details) = if leg.is_deadhead {
            (None, None)
        } else {
            let rate = leg.rate_per_mile_est.unwrap_or(0.0);
            let weight = leg
                .weight
                .filter(|w| *w > 0.0)
                .map_or_else(|| "N/A".to_string(), |w| format!("{} lbs", thousands(round_half_up(w))));
            let equipment = leg
                .equipment_type
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "N/A".to_string());
            (
                Some(format!("${rate:.2}/mile")),
                Some(LoadDetails {
                    weight,
                    equipment,
                    delivery: leg.receive_date.clone().unwrap_or_default(),
                }),
            )
        };

        Self {
            title,
            ship_date: leg.ship_date.clone().unwrap_or_default(),
            origin: leg.origin_name(),
            destination: leg.destination_name(),
            miles: format!("{} miles", round_half_up(leg.distance)),
            rate,
            details,
        }
    }
}

impl fmt::Display for SegmentCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if !self.ship_date.is_empty() {
            write!(f, "  [{}]", self.ship_date)?;
        }
        write!(f, "\n  {} -> {}  {}", self.origin, self.destination, self.miles)?;
        if let Some(rate) = &self.rate {
            write!(f, "  {rate}")?;
        }
        if let Some(details) = &self.details {
            write!(
                f,
                "\n  {} | {} | Delivery: {}",
                details.weight, details.equipment, details.delivery
            )?;
        }
        Ok(())
    }
}

/// Cards for every leg, in route order
#[must_use]
pub fn segment_cards(legs: &[Leg]) -> Vec<SegmentCard> {
    legs.iter()
        .enumerate()
        .map(|(index, leg)| SegmentCard::new(leg, index))
        .collect()
}

fn round_half_up(value: f64) -> i64 {
    if value.is_finite() {
        (value + 0.5).floor() as i64
    } else {
        0
    }
}

/// Group digits in threes with commas
fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
