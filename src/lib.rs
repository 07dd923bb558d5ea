//! heroflow renders the ambient flow-field layer that sits behind a hero section: a few dozen
//! translucent cubic strokes drifting toward the text block, brightest near a focal point.
//!
//! The engine is host-agnostic:
//!
//! - Implement [`Host`] (viewport, reduced-motion, frame scheduling, resize listeners) and
//!   [`Surface`] (a 2D drawing context), or use [`HeadlessHost`] with [`RecordingSurface`] /
//!   [`CpuSurface`]
//! - [`FlowFieldCanvas::mount`] the component and forward frame and resize callbacks
//! - Or render offline with [`session::render_range`] into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Component lifecycle and accessibility guard.
pub mod component;
/// Encoding sinks.
pub mod encode;
pub mod field;
pub mod host;
pub mod session;
pub mod surface;

pub use crate::foundation::core::{
    Affine, BezPath, Fps, FrameIndex, Point, Rect, Rgb8, Size, Vec2, Viewport,
};
pub use crate::foundation::error::{HeroflowError, HeroflowResult};
pub use crate::foundation::math::Rng64;

pub use crate::component::{
    BASE_CLASS, FlowFieldCanvas, FlowFieldProps, MountStatus, SkipReason,
};
pub use crate::encode::ffmpeg::FfmpegSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::field::config::{FlowFieldConfig, ReadingDirection, ValueRange};
pub use crate::field::curve::{Curve, CurvePopulation};
pub use crate::field::engine::{FieldEngine, FrameStats};
pub use crate::host::headless::{HeadlessHost, HostStats};
pub use crate::host::{FrameHandle, Host, ListenerHandle};
pub use crate::session::{RenderRequest, RenderStats};
pub use crate::surface::context::{DrawContext, LineCap, StrokeColor, Surface};
pub use crate::surface::cpu::{CpuSurface, CpuSurfaceOpts, FrameRGBA, StrokeBlend};
pub use crate::surface::layout::SurfaceLayout;
pub use crate::surface::recording::{DrawCmd, RecordingSurface};
