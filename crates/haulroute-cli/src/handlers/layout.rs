//! Layout command handler

use super::{load_plan, resolve_surface};
use crate::commands::{LayoutArgs, LayoutFormat};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{write_result, Reporter};
use haulroute::{edge_annotation, RouteGraph};
use std::fmt::Write as _;

/// Execute the layout command
pub fn execute_layout(config: &CliConfig, args: &LayoutArgs) -> CliResult<()> {
    let plan = load_plan(&args.file)?;
    let surface = resolve_surface(config, args.surface)?;
    let graph = RouteGraph::build(plan.legs(), surface, &config.animation.layout);

    let content = match args.format {
        LayoutFormat::Json => serde_json::to_string_pretty(&graph)?,
        LayoutFormat::Text => render_text(&graph, &Reporter::from_config(config)),
    };
    write_result(&content, None)
}

/// Waypoints with positions, then edges with their annotations
#[must_use]
pub fn render_text(graph: &RouteGraph, reporter: &Reporter) -> String {
    if graph.is_empty() {
        return "No route to lay out\n".to_string();
    }

    let mut out = String::new();
    let center = graph.center();
    let _ = writeln!(
        out,
        "{} ({}) on r={:.1} around ({:.1}, {:.1})",
        reporter.heading("Waypoints"),
        graph.waypoints().len(),
        graph.radius(),
        center.x,
        center.y
    );
    for waypoint in graph.waypoints() {
        let _ = writeln!(
            out,
            "  [{}] {:<24} ({:.1}, {:.1})",
            waypoint.id.index(),
            waypoint.name,
            waypoint.position.x,
            waypoint.position.y
        );
    }

    let _ = writeln!(out, "{} ({})", reporter.heading("Edges"), graph.edges().len());
    for edge in graph.edges() {
        let name = |id| graph.waypoint(id).map_or("?", |w| w.name.as_str());
        let (headline, dates) = edge_annotation(edge);
        let _ = write!(out, "  {} -> {}  {headline}", name(edge.from), name(edge.to));
        if let Some(dates) = dates {
            let _ = write!(out, "  ({dates})");
        }
        out.push('\n');
    }
    out
}
