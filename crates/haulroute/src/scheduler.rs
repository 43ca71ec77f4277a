//! Per-frame callback scheduling.
//!
//! The host decides when frames happen (a browser's
//! `requestAnimationFrame`, a headless loop, a test). The animator only
//! asks for the next frame and cancels it on teardown.

use crate::result::HaulrouteResult;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Opaque id of a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wrap a host-issued id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Host-issued id
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Host primitive that calls back once per display frame
pub trait FrameScheduler {
    /// Request one callback on the next frame
    fn request_frame(&mut self) -> HaulrouteResult<FrameHandle>;

    /// Cancel a requested callback; unknown handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Default)]
struct ManualState {
    next_id: u64,
    outstanding: BTreeSet<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

/// Scheduler driven by hand, for headless rendering and tests.
///
/// Clones share state, so a test can keep a clone to inspect requests
/// after the animator that owns the original has been dropped.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    /// Create a scheduler with nothing requested
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet fired or cancelled
    #[must_use]
    pub fn outstanding(&self) -> Vec<FrameHandle> {
        self.state.borrow().outstanding.iter().copied().collect()
    }

    /// Total frames ever requested
    #[must_use]
    pub fn requested(&self) -> usize {
        self.state.borrow().requested
    }

    /// Total frames cancelled before firing
    #[must_use]
    pub fn cancelled(&self) -> usize {
        self.state.borrow().cancelled
    }

    /// Fire the oldest outstanding frame, returning its handle for delivery
    pub fn fire(&self) -> Option<FrameHandle> {
        self.state.borrow_mut().outstanding.pop_first()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> HaulrouteResult<FrameHandle> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let handle = FrameHandle(state.next_id);
        state.outstanding.insert(handle);
        state.requested += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut state = self.state.borrow_mut();
        if state.outstanding.remove(&handle) {
            state.cancelled += 1;
        }
    }
}
