use crate::component::FlowFieldCanvas;
use crate::foundation::core::Viewport;
use crate::host::{FrameHandle, Host, ListenerHandle};
use crate::surface::context::Surface;
use std::collections::BTreeSet;

/// Counters of every scheduling call a [`HeadlessHost`] has seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostStats {
    /// `request_frame` calls.
    pub frames_requested: u64,
    /// `cancel_frame` calls that removed a pending callback.
    pub frames_cancelled: u64,
    /// Frame callbacks delivered through [`HeadlessHost::take_pending_frame`].
    pub frames_fired: u64,
    /// Highest number of simultaneously pending frame callbacks.
    pub max_frames_in_flight: usize,
    /// `add_resize_listener` calls.
    pub listeners_added: u64,
    /// `remove_resize_listener` calls that removed a live listener.
    pub listeners_removed: u64,
}

/// In-process host: frame callbacks and resize events are queued and delivered on demand.
#[derive(Debug)]
pub struct HeadlessHost<S> {
    viewport: Viewport,
    reduced_motion: bool,
    surface: Option<S>,

    next_handle: u64,
    pending_frames: BTreeSet<FrameHandle>,
    listeners: BTreeSet<ListenerHandle>,
    stats: HostStats,
}

impl<S: Surface> HeadlessHost<S> {
    /// Host with `viewport` that hands out `surface` once.
    pub fn new(viewport: Viewport, surface: S) -> Self {
        Self::with_optional_surface(viewport, Some(surface))
    }

    /// Host whose drawing surface cannot be acquired.
    pub fn without_surface(viewport: Viewport) -> Self {
        Self::with_optional_surface(viewport, None)
    }

    fn with_optional_surface(viewport: Viewport, surface: Option<S>) -> Self {
        Self {
            viewport,
            reduced_motion: false,
            surface,
            next_handle: 1,
            pending_frames: BTreeSet::new(),
            listeners: BTreeSet::new(),
            stats: HostStats::default(),
        }
    }

    /// Return a copy with the reduced-motion preference set.
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Scheduling counters.
    pub fn stats(&self) -> HostStats {
        self.stats
    }

    /// Number of frame callbacks currently scheduled.
    pub fn pending_frames(&self) -> usize {
        self.pending_frames.len()
    }

    /// Number of live resize listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Change viewport metrics without notifying anyone.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Pop the oldest pending frame callback, as the host's repaint would.
    pub fn take_pending_frame(&mut self) -> Option<FrameHandle> {
        let handle = self.pending_frames.pop_first()?;
        self.stats.frames_fired += 1;
        Some(handle)
    }

    fn alloc_handle(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

impl<S: Surface> Host for HeadlessHost<S> {
    type Surface = S;

    fn acquire_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.alloc_handle());
        self.pending_frames.insert(handle);
        self.stats.frames_requested += 1;
        self.stats.max_frames_in_flight = self
            .stats
            .max_frames_in_flight
            .max(self.pending_frames.len());
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frames.remove(&handle) {
            self.stats.frames_cancelled += 1;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerHandle {
        let handle = ListenerHandle(self.alloc_handle());
        self.listeners.insert(handle);
        self.stats.listeners_added += 1;
        handle
    }

    fn remove_resize_listener(&mut self, handle: ListenerHandle) {
        if self.listeners.remove(&handle) {
            self.stats.listeners_removed += 1;
        }
    }
}

impl<S: Surface> FlowFieldCanvas<HeadlessHost<S>> {
    /// Deliver the pending frame callback, if any. Returns `false` when nothing was scheduled.
    pub fn pump_frame(&mut self) -> bool {
        let Some(handle) = self.host_mut().take_pending_frame() else {
            return false;
        };
        self.on_frame(handle);
        true
    }

    /// Deliver up to `n` frame callbacks; returns how many fired.
    pub fn pump_frames(&mut self, n: u64) -> u64 {
        let mut fired = 0;
        while fired < n && self.pump_frame() {
            fired += 1;
        }
        fired
    }

    /// Change the viewport and dispatch a resize event to live listeners.
    pub fn resize_viewport(&mut self, viewport: Viewport) {
        self.host_mut().set_viewport(viewport);
        if self.host().listener_count() > 0 {
            self.on_resize();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
