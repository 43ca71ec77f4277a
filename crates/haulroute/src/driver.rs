//! Animation driver for the route view.
//!
//! # State machine
//!
//! ```text
//!            route non-empty && !loading
//!   ┌──────┐ ───────────────────────────► ┌─────────┐
//!   │ Idle │                              │ Running │ ──┐ frame: advance,
//!   └──────┘ ◄─────────────────────────── └─────────┘ ◄─┘ draw, re-arm
//!      ▲      route gone / loading / teardown
//!      │
//!      └─ while loading: placeholder loop, no layout
//! ```
//!
//! The animator owns its surface and its one pending frame. Every input
//! change cancels that frame and rebuilds from scratch; dropping the
//! animator cancels it too, so no callback outlives the view.

use crate::canvas::{Canvas, DrawCommand};
use crate::layout::{LayoutConfig, RouteGraph};
use crate::leg::Leg;
use crate::marker::Marker;
use crate::palette::Palette;
use crate::placeholder::Placeholder;
use crate::render::draw_frame;
use crate::result::{HaulrouteError, HaulrouteResult};
use crate::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Animation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Marker progress added per frame; every edge takes the same time
    pub step: f64,
    /// Placeholder phase added per frame
    pub placeholder_step: f64,
    /// Layout parameters
    pub layout: LayoutConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step: 0.005,
            placeholder_step: 0.004,
            layout: LayoutConfig::default(),
        }
    }
}

impl AnimationConfig {
    /// Set the marker step
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the layout parameters
    #[must_use]
    pub const fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Check that steps lie in `(0, 1)` and the layout is valid
    pub fn validate(&self) -> HaulrouteResult<()> {
        for (name, value) in [("step", self.step), ("placeholder_step", self.placeholder_step)] {
            if !(value > 0.0 && value < 1.0) {
                return Err(HaulrouteError::invalid_config(format!(
                    "{name} must be in (0, 1), got {value}"
                )));
            }
        }
        self.layout.validate()
    }
}

/// Observable animator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Nothing to animate; placeholder shown only while loading
    Idle,
    /// Markers looping over a laid-out route
    Running,
}

impl std::fmt::Display for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
        }
    }
}

#[derive(Debug)]
enum Phase {
    Idle { placeholder: Option<Placeholder> },
    Running { graph: RouteGraph, markers: Vec<Marker> },
}

/// Drives layout, rendering and the frame loop for one route view.
#[derive(Debug)]
pub struct RouteAnimator<S: FrameScheduler, C: Canvas> {
    scheduler: S,
    canvas: C,
    config: AnimationConfig,
    palette: Palette,
    route: Option<Vec<Leg>>,
    loading: bool,
    phase: Phase,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl<S: FrameScheduler, C: Canvas> RouteAnimator<S, C> {
    /// Create an idle animator that owns `canvas`
    pub fn new(
        scheduler: S,
        canvas: C,
        config: AnimationConfig,
        palette: Palette,
    ) -> HaulrouteResult<Self> {
        config.validate()?;
        Ok(Self {
            scheduler,
            canvas,
            config,
            palette,
            route: None,
            loading: false,
            phase: Phase::Idle { placeholder: None },
            pending: None,
            frames: 0,
        })
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> AnimationState {
        match self.phase {
            Phase::Idle { .. } => AnimationState::Idle,
            Phase::Running { .. } => AnimationState::Running,
        }
    }

    /// Check if the loading placeholder is on screen
    #[must_use]
    pub const fn shows_placeholder(&self) -> bool {
        matches!(self.phase, Phase::Idle { placeholder: Some(_) })
    }

    /// Laid-out route while running
    #[must_use]
    pub const fn graph(&self) -> Option<&RouteGraph> {
        match &self.phase {
            Phase::Running { graph, .. } => Some(graph),
            Phase::Idle { .. } => None,
        }
    }

    /// Markers while running, empty otherwise
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        match &self.phase {
            Phase::Running { markers, .. } => markers,
            Phase::Idle { .. } => &[],
        }
    }

    /// The frame currently requested from the host, if any
    #[must_use]
    pub const fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames drawn since creation
    #[must_use]
    pub const fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Owned surface
    #[must_use]
    pub const fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Owned surface, mutably (e.g. to resize; layout is not redone)
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Owned scheduler
    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Change colors; takes effect on the next frame
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Replace the route; a changed route restarts from progress 0
    pub fn set_route(&mut self, route: Option<Vec<Leg>>) -> HaulrouteResult<()> {
        let loading = self.loading;
        self.update(route, loading)
    }

    /// Set the loading flag; loading suppresses layout entirely
    pub fn set_loading(&mut self, loading: bool) -> HaulrouteResult<()> {
        let route = self.route.clone();
        self.update(route, loading)
    }

    /// Apply new inputs. Unchanged inputs leave the running loop alone;
    /// any change tears the current loop down and starts over.
    pub fn update(&mut self, route: Option<Vec<Leg>>, loading: bool) -> HaulrouteResult<()> {
        if route == self.route && loading == self.loading {
            return Ok(());
        }
        self.route = route;
        self.loading = loading;
        self.restart()
    }

    /// Tear down and rebuild from the current inputs
    pub fn restart(&mut self) -> HaulrouteResult<()> {
        let drew_last_frame = !matches!(self.phase, Phase::Idle { placeholder: None });
        self.teardown();

        if self.loading {
            debug!("route loading; showing placeholder");
            let placeholder = Placeholder::new();
            placeholder.draw(&mut self.canvas, &self.palette);
            self.frames += 1;
            self.phase = Phase::Idle {
                placeholder: Some(placeholder),
            };
            return self.arm();
        }

        let legs = self.route.as_deref().unwrap_or(&[]);
        if legs.is_empty() {
            debug!("no route; idle");
            if drew_last_frame {
                let size = self.canvas.size();
                self.canvas.draw(DrawCommand::Clear { size });
            }
            return Ok(());
        }

        let graph = RouteGraph::build(legs, self.canvas.size(), &self.config.layout);
        let markers = Marker::for_graph(&graph);
        draw_frame(&mut self.canvas, &graph, &markers, &self.palette);
        self.frames += 1;
        debug!(edges = markers.len(), "route animation running");
        self.phase = Phase::Running { graph, markers };
        self.arm()
    }

    /// Cancel the pending frame and drop the graph. Safe to call twice.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.pending.take() {
            trace!(frame = handle.id(), "cancelling pending frame");
            self.scheduler.cancel_frame(handle);
        }
        if matches!(self.phase, Phase::Running { .. }) {
            debug!("route animation stopped");
        }
        self.phase = Phase::Idle { placeholder: None };
    }

    /// Host callback for a fired frame. Frames other than the pending
    /// one are stale (cancelled or already handled) and are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) -> HaulrouteResult<()> {
        if self.pending != Some(handle) {
            warn!(frame = handle.id(), "ignoring stale frame");
            return Ok(());
        }
        self.pending = None;

        match &mut self.phase {
            Phase::Running { graph, markers } => {
                for marker in markers.iter_mut() {
                    marker.advance(self.config.step);
                }
                draw_frame(&mut self.canvas, graph, markers, &self.palette);
            }
            Phase::Idle {
                placeholder: Some(placeholder),
            } => {
                placeholder.advance(self.config.placeholder_step);
                placeholder.draw(&mut self.canvas, &self.palette);
            }
            Phase::Idle { placeholder: None } => return Ok(()),
        }
        self.frames += 1;
        trace!(frame = handle.id(), "frame drawn");
        self.arm()
    }

    fn arm(&mut self) -> HaulrouteResult<()> {
        debug_assert!(self.pending.is_none(), "only one frame may be pending");
        let handle = self.scheduler.request_frame()?;
        self.pending = Some(handle);
        Ok(())
    }
}

impl<C: Canvas> RouteAnimator<ManualScheduler, C> {
    /// Fire the pending frame, if any. Returns whether a frame was delivered.
    pub fn step(&mut self) -> HaulrouteResult<bool> {
        match self.scheduler.fire() {
            Some(handle) => {
                self.on_frame(handle)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fire up to `frames` frames, stopping early if the loop goes idle
    pub fn run_frames(&mut self, frames: u64) -> HaulrouteResult<u64> {
        let mut delivered = 0;
        while delivered < frames && self.step()? {
            delivered += 1;
        }
        Ok(delivered)
    }
}

impl<S: FrameScheduler, C: Canvas> Drop for RouteAnimator<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
