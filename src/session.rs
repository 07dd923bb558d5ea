//! Offline rendering: mount the flow field on a headless host with a CPU surface and capture
//! the frames it draws.

use crate::component::{FlowFieldCanvas, FlowFieldProps, MountStatus, SkipReason};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::field::config::FlowFieldConfig;
use crate::foundation::core::{Fps, FrameIndex, Viewport};
use crate::foundation::error::{HeroflowError, HeroflowResult};
use crate::host::headless::HeadlessHost;
use crate::surface::cpu::{CpuSurface, CpuSurfaceOpts, FrameRGBA};
use crate::surface::layout::SurfaceLayout;

/// Everything needed to render the flow field offline.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Host viewport.
    pub viewport: Viewport,
    /// Component props.
    pub props: FlowFieldProps,
    /// Engine tuning.
    pub config: FlowFieldConfig,
    /// CPU surface options.
    pub surface: CpuSurfaceOpts,
    /// Simulate the reduced-motion preference.
    pub reduced_motion: bool,
}

impl RenderRequest {
    /// Request with default props, config and surface options.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            props: FlowFieldProps::default(),
            config: FlowFieldConfig::default(),
            surface: CpuSurfaceOpts::default(),
            reduced_motion: false,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed into the sink.
    pub frames_total: u64,
    /// Frames that came from a running animation (the rest show the bare backdrop).
    pub frames_animated: u64,
    /// Set when the component mounted without animating.
    pub skipped: Option<SkipReason>,
}

struct Driver {
    canvas: FlowFieldCanvas<HeadlessHost<CpuSurface>>,
    width: u32,
    height: u32,
    backdrop: [u8; 4],
}

impl Driver {
    fn mount(req: &RenderRequest) -> HeroflowResult<Self> {
        let layout = SurfaceLayout::from_viewport(req.viewport);
        if layout.backing_width == 0 || layout.backing_height == 0 {
            return Err(HeroflowError::validation(
                "viewport must be at least one pixel in each dimension",
            ));
        }
        let host = HeadlessHost::new(req.viewport, CpuSurface::new(req.surface))
            .with_reduced_motion(req.reduced_motion);
        let canvas = FlowFieldCanvas::mount(host, req.props.clone(), req.config.clone())?;
        if canvas.status() == MountStatus::Skipped(SkipReason::EnvironmentUnavailable) {
            return Err(HeroflowError::render(format!(
                "cpu surface cannot back a {}x{} frame",
                layout.backing_width, layout.backing_height
            )));
        }
        Ok(Self {
            canvas,
            width: layout.backing_width,
            height: layout.backing_height,
            backdrop: req.surface.backdrop_rgba.unwrap_or([0, 0, 0, 0]),
        })
    }

    fn skipped(&self) -> Option<SkipReason> {
        match self.canvas.status() {
            MountStatus::Skipped(reason) => Some(reason),
            MountStatus::Running | MountStatus::Unmounted => None,
        }
    }

    /// Frame 0 is drawn during mount; every later index is one more host callback.
    fn advance_to(&mut self, idx: FrameIndex, current: FrameIndex) -> HeroflowResult<()> {
        let steps = idx.0.saturating_sub(current.0);
        if self.canvas.is_running() && self.canvas.pump_frames(steps) != steps {
            return Err(HeroflowError::render(
                "frame loop stopped before the requested frame",
            ));
        }
        Ok(())
    }

    fn capture(&self) -> HeroflowResult<FrameRGBA> {
        match self.canvas.surface() {
            Some(surface) if self.canvas.is_running() => surface.snapshot(),
            _ => Ok(FrameRGBA::solid(self.width, self.height, self.backdrop)),
        }
    }
}

/// Render frame `idx` (0 is the frame drawn at mount).
pub fn render_frame(req: &RenderRequest, idx: FrameIndex) -> HeroflowResult<FrameRGBA> {
    let mut driver = Driver::mount(req)?;
    driver.advance_to(idx, FrameIndex(0))?;
    driver.capture()
}

/// Render `frames` consecutive frames starting at mount into `sink`.
pub fn render_range(
    req: &RenderRequest,
    frames: u64,
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> HeroflowResult<RenderStats> {
    let mut driver = Driver::mount(req)?;
    let skipped = driver.skipped();
    if let Some(reason) = skipped {
        tracing::info!(%reason, "flow field skipped; rendering backdrop only");
    }

    sink.begin(SinkConfig {
        width: driver.width,
        height: driver.height,
        fps,
        backdrop: req.surface.backdrop_rgba.unwrap_or([0, 0, 0, 255]),
    })?;

    let mut stats = RenderStats {
        skipped,
        ..RenderStats::default()
    };
    for i in 0..frames {
        let idx = FrameIndex(i);
        if i > 0 {
            driver.advance_to(idx, FrameIndex(i - 1))?;
        }
        let frame = driver.capture()?;
        if driver.canvas.is_running() {
            stats.frames_animated += 1;
        }
        sink.push_frame(idx, &frame)?;
        stats.frames_total += 1;
    }

    sink.end()?;
    tracing::debug!(?stats, "render range finished");
    Ok(stats)
}
