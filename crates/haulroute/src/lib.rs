//! Haulroute: route layout and truck animation for multi-stop freight trips
//!
//! Takes the ordered legs of a planned trip, places every distinct stop on
//! a circle, and loops one truck per leg along its edge, one frame at a
//! time, onto any [`Canvas`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌──────────────┐    ┌────────────┐
//! │ TripPlan │───►│ RouteGraph  │───►│ draw_frame   │───►│ Canvas     │
//! │ (legs)   │    │ (waypoints, │    │ (edges,      │    │ (recorder, │
//! │          │    │  edges)     │    │  nodes,      │    │  SVG,      │
//! └──────────┘    └─────────────┘    │  trucks)     │    │  browser)  │
//!                        ▲           └──────────────┘    └────────────┘
//!                        │                  ▲
//!                 ┌──────┴───────────────────┴──┐    ┌────────────────┐
//!                 │ RouteAnimator               │◄──►│ FrameScheduler │
//!                 │ (idle / running, markers)   │    │ (one pending)  │
//!                 └─────────────────────────────┘    └────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use haulroute::{
//!     AnimationConfig, AnimationState, Leg, ManualScheduler, Palette, RecordingCanvas,
//!     RouteAnimator, Size,
//! };
//!
//! let leg = Leg::new(("Dallas", "TX"), ("Austin", "TX")).with_distance(195.0);
//! let canvas = RecordingCanvas::new(Size::new(800.0, 600.0));
//! let mut animator = RouteAnimator::new(
//!     ManualScheduler::new(),
//!     canvas,
//!     AnimationConfig::default(),
//!     Palette::default(),
//! )?;
//!
//! animator.set_route(Some(vec![leg]))?;
//! assert_eq!(animator.state(), AnimationState::Running);
//! animator.run_frames(10)?;
//! assert!((animator.markers()[0].progress() - 0.05).abs() < 1e-9);
//! # Ok::<(), haulroute::HaulrouteError>(())
//! ```

#![warn(missing_docs)]

mod canvas;
mod context;
mod driver;
mod geometry;
mod layout;
mod leg;
mod marker;
mod palette;
mod placeholder;
mod render;
mod result;
mod scheduler;
mod summary;
mod svg;

/// Browser bindings (`wasm32` only)
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use canvas::{
    Canvas, Color, DrawCommand, Rect, RecordingCanvas, StrokeStyle, TextAlign, TextStyle,
    Transform2D,
};
pub use context::{
    AppContext, ContextStore, FileStore, MemoryStore, PersistedContext, Session, UserProfile,
};
pub use driver::{AnimationConfig, AnimationState, RouteAnimator};
pub use geometry::{Point, Size};
pub use layout::{Edge, LayoutConfig, RouteGraph, Waypoint, WaypointId};
pub use leg::{Leg, TripPlan};
pub use marker::{Marker, MarkerPose};
pub use palette::{Palette, Theme};
pub use placeholder::{Placeholder, CAPTION as PLACEHOLDER_CAPTION};
pub use render::{draw_frame, edge_annotation, format_miles, truck_icon};
pub use result::{HaulrouteError, HaulrouteResult};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use summary::{segment_cards, LoadDetails, SegmentCard, TripSummary};
pub use svg::{SvgCompression, SvgConfig, SvgExporter};
