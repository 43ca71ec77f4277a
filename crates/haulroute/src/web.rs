//! Browser bindings.
//!
//! Replays draw commands onto a `<canvas>` 2D context, schedules frames
//! with `requestAnimationFrame`, and keeps the application context in
//! `localStorage`. [`RouteCanvas`] is the JavaScript entry point.

use crate::canvas::{Canvas, DrawCommand, StrokeStyle};
use crate::context::{AppContext, ContextStore, PersistedContext};
use crate::driver::{AnimationConfig, RouteAnimator};
use crate::geometry::Size;
use crate::leg::TripPlan;
use crate::palette::Theme;
use crate::result::{HaulrouteError, HaulrouteResult};
use crate::scheduler::{FrameHandle, FrameScheduler};
use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Storage, Window};

/// `localStorage` key holding the serialized context
pub const STORAGE_KEY: &str = "haulroute.context";

fn js_error(context: &str, err: &JsValue) -> HaulrouteError {
    HaulrouteError::host(format!("{context}: {err:?}"))
}

fn to_js(err: HaulrouteError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window() -> HaulrouteResult<Window> {
    web_sys::window().ok_or_else(|| HaulrouteError::host("no global window"))
}

/// [`Canvas`] backed by a browser 2D context
#[derive(Debug)]
pub struct BrowserCanvas {
    element: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl BrowserCanvas {
    /// Attach to the `<canvas>` element with `id`
    ///
    /// # Errors
    ///
    /// Returns error if the element is missing, is not a canvas, or has
    /// no 2D context
    pub fn from_element_id(id: &str) -> HaulrouteResult<Self> {
        let document = window()?
            .document()
            .ok_or_else(|| HaulrouteError::host("no document"))?;
        let element = document
            .get_element_by_id(id)
            .ok_or_else(|| HaulrouteError::host(format!("no element #{id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| HaulrouteError::host(format!("#{id} is not a canvas")))?;
        let context = element
            .get_context("2d")
            .map_err(|e| js_error("getContext", &e))?
            .ok_or_else(|| HaulrouteError::host("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HaulrouteError::host("unexpected context type"))?;
        Ok(Self { element, context })
    }

    fn apply_stroke(&self, style: &StrokeStyle) -> Result<(), JsValue> {
        let dash = js_sys::Array::new();
        for segment in &style.dash {
            dash.push(&JsValue::from_f64(*segment));
        }
        self.context.set_line_dash(&dash)?;
        self.context.set_stroke_style_str(&style.color.to_css());
        self.context.set_line_width(style.width);
        Ok(())
    }

    fn replay(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.context;
        match command {
            DrawCommand::Clear { size } => ctx.clear_rect(0.0, 0.0, size.width, size.height),
            DrawCommand::Line { from, to, style } => {
                self.apply_stroke(style)?;
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
                ctx.set_line_dash(&js_sys::Array::new())?;
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0.0, TAU)?;
                if let Some(color) = fill {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill();
                }
                if let Some(style) = stroke {
                    self.apply_stroke(style)?;
                    ctx.stroke();
                }
            }
            DrawCommand::Rect { bounds, fill } => {
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_rect(bounds.x, bounds.y, bounds.width, bounds.height);
            }
            DrawCommand::Text {
                content,
                position,
                style,
            } => {
                ctx.set_font(&style.font());
                ctx.set_text_align(style.align.as_str());
                ctx.set_fill_style_str(&style.color.to_css());
                ctx.fill_text(content, position.x, position.y)?;
            }
            DrawCommand::Group {
                children,
                transform,
            } => {
                let [a, b, c, d, e, f] = transform.matrix;
                ctx.save();
                ctx.transform(a, b, c, d, e, f)?;
                let result = children.iter().try_for_each(|child| self.replay(child));
                ctx.restore();
                result?;
            }
        }
        Ok(())
    }
}

impl Canvas for BrowserCanvas {
    fn draw(&mut self, command: DrawCommand) {
        if let Err(err) = self.replay(&command) {
            warn!(op = command.name(), error = ?err, "canvas call failed");
        }
    }

    fn size(&self) -> Size {
        Size::new(f64::from(self.element.width()), f64::from(self.element.height()))
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// [`FrameScheduler`] over `requestAnimationFrame`.
///
/// The JavaScript callback is installed after construction because it
/// needs a handle back to the animator that owns this scheduler.
#[derive(Debug)]
pub struct BrowserScheduler {
    window: Window,
    callback: FrameCallback,
    scheduled: Rc<Cell<Option<FrameHandle>>>,
}

impl BrowserScheduler {
    fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
            scheduled: Rc::new(Cell::new(None)),
        }
    }
}

impl FrameScheduler for BrowserScheduler {
    fn request_frame(&mut self) -> HaulrouteResult<FrameHandle> {
        let callback = self.callback.borrow();
        let function = callback
            .as_ref()
            .ok_or_else(|| HaulrouteError::host("frame callback not installed"))?;
        let id = self
            .window
            .request_animation_frame(function.as_ref().unchecked_ref())
            .map_err(|e| js_error("requestAnimationFrame", &e))?;
        let handle = FrameHandle::new(u64::from(id.unsigned_abs()));
        self.scheduled.set(Some(handle));
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Ok(id) = i32::try_from(handle.id()) {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                warn!(frame = handle.id(), error = ?err, "cancelAnimationFrame failed");
            }
        }
        if self.scheduled.get() == Some(handle) {
            self.scheduled.set(None);
        }
    }
}

/// [`ContextStore`] in the browser's `localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Open the window's `localStorage`
    ///
    /// # Errors
    ///
    /// Returns error if storage is disabled
    pub fn open() -> HaulrouteResult<Self> {
        let storage = window()?
            .local_storage()
            .map_err(|e| js_error("localStorage", &e))?
            .ok_or_else(|| HaulrouteError::host("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl ContextStore for LocalStorageStore {
    fn load(&self) -> HaulrouteResult<Option<PersistedContext>> {
        let raw = self
            .storage
            .get_item(STORAGE_KEY)
            .map_err(|e| js_error("getItem", &e))?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, context: &PersistedContext) -> HaulrouteResult<()> {
        let json = serde_json::to_string(context)?;
        self.storage
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| js_error("setItem", &e))
    }
}

type BrowserAnimator = RouteAnimator<BrowserScheduler, BrowserCanvas>;

/// Animated route view bound to a `<canvas>` element.
///
/// Dropping it (or calling `free()` from JavaScript) cancels the pending
/// frame.
#[derive(Debug)]
#[wasm_bindgen]
pub struct RouteCanvas {
    animator: Rc<RefCell<BrowserAnimator>>,
    callback: FrameCallback,
}

#[wasm_bindgen]
impl RouteCanvas {
    /// Attach to the canvas with `canvas_id`, themed from stored context
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<RouteCanvas, JsValue> {
        let canvas = BrowserCanvas::from_element_id(canvas_id).map_err(to_js)?;
        let scheduler = BrowserScheduler::new(window().map_err(to_js)?);
        let callback = Rc::clone(&scheduler.callback);
        let scheduled = Rc::clone(&scheduler.scheduled);

        let theme = match LocalStorageStore::open() {
            Ok(store) => AppContext::load(&store).theme(),
            Err(err) => {
                warn!(error = %err, "no persisted context; using default theme");
                Theme::default()
            }
        };

        let animator = RouteAnimator::new(scheduler, canvas, AnimationConfig::default(), theme.palette())
            .map_err(to_js)?;
        let animator = Rc::new(RefCell::new(animator));

        let weak: Weak<RefCell<BrowserAnimator>> = Rc::downgrade(&animator);
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            let Some(animator) = weak.upgrade() else {
                return;
            };
            let Some(handle) = scheduled.take() else {
                return;
            };
            let Ok(mut animator) = animator.try_borrow_mut() else {
                warn!(frame = handle.id(), "animator busy; frame dropped");
                return;
            };
            if let Err(err) = animator.on_frame(handle) {
                warn!(error = %err, "frame failed");
            }
        });
        *callback.borrow_mut() = Some(on_frame);

        Ok(Self { animator, callback })
    }

    /// Show the route in `json`: a trip plan or a bare array of legs
    pub fn set_route(&mut self, json: &str) -> Result<(), JsValue> {
        let plan = TripPlan::from_json_str(json).map_err(to_js)?;
        self.animator.borrow_mut().set_route(plan.route).map_err(to_js)
    }

    /// Remove the route and go idle
    pub fn clear_route(&mut self) -> Result<(), JsValue> {
        self.animator.borrow_mut().set_route(None).map_err(to_js)
    }

    /// Toggle the loading placeholder
    pub fn set_loading(&mut self, loading: bool) -> Result<(), JsValue> {
        self.animator.borrow_mut().set_loading(loading).map_err(to_js)
    }

    /// Switch palette by theme name (`light` or `dark`)
    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        let theme: Theme = theme.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.animator.borrow_mut().set_palette(theme.palette());
        Ok(())
    }

    /// `idle` or `running`
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.animator.borrow().state().to_string()
    }

    /// Frames drawn so far
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.animator.borrow().frames_drawn() as f64
    }
}

impl Drop for RouteCanvas {
    fn drop(&mut self) {
        if let Ok(mut animator) = self.animator.try_borrow_mut() {
            animator.teardown();
        }
        self.callback.borrow_mut().take();
    }
}
