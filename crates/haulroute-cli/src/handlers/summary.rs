//! Summary command handler

use super::load_plan;
use crate::commands::{LayoutFormat, SummaryArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{write_result, Reporter};
use haulroute::{segment_cards, SegmentCard, TripPlan, TripSummary};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Serialize)]
struct SummaryDocument {
    summary: TripSummary,
    segments: Vec<SegmentCard>,
}

/// Execute the summary command
pub fn execute_summary(config: &CliConfig, args: &SummaryArgs) -> CliResult<()> {
    let plan = load_plan(&args.file)?;
    let content = match args.format {
        LayoutFormat::Json => serde_json::to_string_pretty(&SummaryDocument {
            summary: TripSummary::from_plan(&plan),
            segments: segment_cards(plan.legs()),
        })?,
        LayoutFormat::Text => render_text(&plan, &Reporter::from_config(config)),
    };
    write_result(&content, None)
}

/// Totals block followed by one card per leg
#[must_use]
pub fn render_text(plan: &TripPlan, reporter: &Reporter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", reporter.heading("Trip Summary"));
    let _ = writeln!(out, "{}", TripSummary::from_plan(plan));

    if !plan.has_route() {
        out.push_str("\nNo route planned\n");
        return out;
    }

    let _ = writeln!(out, "\n{}", reporter.heading("Route Details"));
    for card in segment_cards(plan.legs()) {
        let _ = writeln!(out, "{card}");
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const PLAN: &str = r#"{
        "route": [
            {"origin_city": "Dallas", "origin_state": "TX", "destination_city": "Austin",
             "destination_state": "TX", "distance": 195, "rate_per_mile_est": 2.1,
             "ship_date": "2024-03-01", "receive_date": "2024-03-02", "weight": 42000,
             "equipment_type": "V"},
            {"origin_city": "Austin", "origin_state": "TX", "destination_city": "Houston",
             "destination_state": "TX", "distance": 162, "is_deadhead": true}
        ],
        "total_revenue": 409.5, "total_miles": 357, "total_deadhead": 162,
        "rate_per_mile": 2.1, "total_days": 2, "total_loads": 1
    }"#;

    #[test]
    fn test_render_text() {
        let plan = TripPlan::from_json_str(PLAN).unwrap();
        let text = render_text(&plan, &Reporter::new(false, false));
        assert!(text.contains("Revenue:       $410"));
        assert!(text.contains("Total Miles:   357"));
        assert!(text.contains("Load #1  [2024-03-01]"));
        assert!(text.contains("42,000 lbs | V | Delivery: 2024-03-02"));
        assert!(text.contains("Deadhead Move"));
        assert!(text.contains("Austin, TX -> Houston, TX  162 miles"));
    }

    #[test]
    fn test_render_text_without_route() {
        let plan = TripPlan::from_json_str(r#"{"total_revenue": 0}"#).unwrap();
        let text = render_text(&plan, &Reporter::new(false, false));
        assert!(text.contains("No route planned"));
        assert!(!text.contains("Route Details"));
    }
}
