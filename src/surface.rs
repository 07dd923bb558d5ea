//! Drawing seam: the 2D context the flow field draws with, the surface it owns, and the built-in
//! recording and CPU raster implementations.

/// Drawing context and surface traits.
pub mod context;
/// CPU raster surface (`vello_cpu`).
pub mod cpu;
/// Backing-store sizing.
pub mod layout;
/// Call-recording surface.
pub mod recording;
