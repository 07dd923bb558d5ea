//! Host seam: everything the flow field needs from its environment.
//!
//! A browser host would back these with `requestAnimationFrame`, `matchMedia` and resize
//! listeners. [`headless::HeadlessHost`] backs them with in-process queues so the loop can be
//! driven explicitly.

/// In-process host with explicit frame and resize delivery.
pub mod headless;

use crate::foundation::core::Viewport;
use crate::surface::context::Surface;

/// Handle of a scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Handle of a registered resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerHandle(pub u64);

/// Environment the flow field is mounted into.
///
/// Callbacks flow the other way: when a requested frame comes due the host calls
/// [`crate::FlowFieldCanvas::on_frame`] with its handle, and on viewport changes it calls
/// [`crate::FlowFieldCanvas::on_resize`] while a listener is registered.
pub trait Host {
    /// Drawing surface type this host hands out.
    type Surface: Surface;

    /// Acquire the drawing surface and its 2D context; `None` when either is unavailable.
    fn acquire_surface(&mut self) -> Option<Self::Surface>;

    /// Current viewport metrics.
    fn viewport(&self) -> Viewport;

    /// The user's reduced-motion accessibility preference.
    fn prefers_reduced_motion(&self) -> bool;

    /// Schedule one callback before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a scheduled callback. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start delivering resize notifications.
    fn add_resize_listener(&mut self) -> ListenerHandle;

    /// Stop delivering resize notifications for `handle`.
    fn remove_resize_listener(&mut self, handle: ListenerHandle);
}
