use crate::field::config::{FlowFieldConfig, ReadingDirection};
use crate::field::curve::CurvePopulation;
use crate::field::engine::{FieldEngine, FrameStats};
use crate::foundation::error::HeroflowResult;
use crate::host::{FrameHandle, Host, ListenerHandle};
use crate::surface::context::{DrawContext, Surface};
use crate::surface::layout::SurfaceLayout;

/// Class list every flow-field surface carries; the caller's style hook is appended.
pub const BASE_CLASS: &str = "absolute inset-0 w-full h-full pointer-events-none mix-blend-screen";

/// The component's public configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlowFieldProps {
    /// Caller-supplied styling hook, merged after [`BASE_CLASS`].
    pub style: Option<String>,
    /// Orient the flow for right-to-left layouts.
    pub is_right_to_left: bool,
}

impl FlowFieldProps {
    /// Props for a right-to-left page.
    pub fn rtl() -> Self {
        Self {
            is_right_to_left: true,
            ..Self::default()
        }
    }

    /// Full class list handed to the surface.
    pub fn class_list(&self) -> String {
        match self.style.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("{BASE_CLASS} {extra}"),
            _ => BASE_CLASS.to_string(),
        }
    }
}

/// Why a mounted flow field is not animating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// No drawing surface/context, or the surface refused its layout.
    #[error("drawing surface unavailable")]
    EnvironmentUnavailable,
    /// The user asked for reduced motion.
    #[error("reduced motion requested")]
    ReducedMotion,
}

/// Observable lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountStatus {
    /// A frame callback is scheduled.
    Running,
    /// Mounted without animation.
    Skipped(SkipReason),
    /// Torn down.
    Unmounted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running { pending: FrameHandle },
}

/// The ambient flow-field layer mounted into a host.
///
/// Owns its host handle, surface and engine for its whole lifetime. Dropping it tears the loop
/// down exactly like [`FlowFieldCanvas::unmount`].
pub struct FlowFieldCanvas<H: Host> {
    host: H,
    surface: Option<H::Surface>,
    props: FlowFieldProps,
    config: FlowFieldConfig,
    engine: Option<FieldEngine>,
    layout: Option<SurfaceLayout>,

    state: LoopState,
    resize_listener: Option<ListenerHandle>,
    status: MountStatus,
    last_stats: FrameStats,
}

impl<H: Host> FlowFieldCanvas<H> {
    /// Mount into `host`.
    ///
    /// Only an invalid `config` is an error. A missing surface or a reduced-motion preference
    /// mounts successfully in a skipped state.
    pub fn mount(host: H, props: FlowFieldProps, config: FlowFieldConfig) -> HeroflowResult<Self> {
        config.validate()?;
        let mut this = Self {
            host,
            surface: None,
            props,
            config,
            engine: None,
            layout: None,
            state: LoopState::Idle,
            resize_listener: None,
            status: MountStatus::Unmounted,
            last_stats: FrameStats::default(),
        };
        this.start()?;
        Ok(this)
    }

    /// Current lifecycle state.
    pub fn status(&self) -> MountStatus {
        self.status
    }

    /// `true` while a frame callback is scheduled.
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Props the component is currently mounted with.
    pub fn props(&self) -> &FlowFieldProps {
        &self.props
    }

    /// Current curve population, if the engine has started.
    pub fn population(&self) -> Option<&CurvePopulation> {
        self.engine.as_ref().map(FieldEngine::population)
    }

    /// Shared time accumulator (`0.0` before the first frame).
    pub fn time(&self) -> f64 {
        self.engine.as_ref().map_or(0.0, FieldEngine::time)
    }

    /// Surface layout from the last resize.
    pub fn layout(&self) -> Option<SurfaceLayout> {
        self.layout
    }

    /// Statistics of the most recent frame.
    pub fn last_frame_stats(&self) -> FrameStats {
        self.last_stats
    }

    /// The acquired surface, if any.
    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    pub(crate) fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Frame callback entry point. Stale handles and callbacks after teardown are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        match self.state {
            LoopState::Running { pending } if pending == handle => {}
            _ => {
                tracing::trace!(?handle, "ignoring stale frame callback");
                return;
            }
        }
        self.draw_frame();
        let next = self.host.request_frame();
        self.state = LoopState::Running { pending: next };
    }

    /// Resize notification entry point: re-size the surface and regenerate the population.
    pub fn on_resize(&mut self) {
        if self.resize_listener.is_none() {
            return;
        }
        if let Err(err) = self.resize() {
            tracing::warn!(error = %err, "flow-field surface resize failed, tearing down");
            self.teardown();
            self.status = MountStatus::Skipped(SkipReason::EnvironmentUnavailable);
        }
    }

    /// Apply new props. A change tears the loop down and mounts again with the same surface.
    pub fn update_props(&mut self, props: FlowFieldProps) -> HeroflowResult<()> {
        if props == self.props {
            return Ok(());
        }
        self.teardown();
        self.props = props;
        self.start()
    }

    /// Cancel the pending frame and remove the resize listener. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.teardown();
        self.status = MountStatus::Unmounted;
    }

    fn start(&mut self) -> HeroflowResult<()> {
        if self.surface.is_none() {
            self.surface = self.host.acquire_surface();
        }
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("no drawing surface, flow field disabled");
            self.status = MountStatus::Skipped(SkipReason::EnvironmentUnavailable);
            return Ok(());
        };
        surface.apply_style(&self.props.class_list());

        if self.host.prefers_reduced_motion() {
            tracing::debug!("reduced motion requested, flow field disabled");
            self.status = MountStatus::Skipped(SkipReason::ReducedMotion);
            return Ok(());
        }

        let direction = ReadingDirection::from_rtl(self.props.is_right_to_left);
        self.engine = Some(FieldEngine::new(self.config.clone(), direction)?);

        if let Err(err) = self.resize() {
            tracing::warn!(error = %err, "flow-field surface setup failed");
            self.teardown();
            self.engine = None;
            self.status = MountStatus::Skipped(SkipReason::EnvironmentUnavailable);
            return Ok(());
        }

        self.draw_frame();
        let pending = self.host.request_frame();
        self.state = LoopState::Running { pending };
        self.resize_listener = Some(self.host.add_resize_listener());
        self.status = MountStatus::Running;
        tracing::debug!(?direction, "flow field running");
        Ok(())
    }

    fn resize(&mut self) -> HeroflowResult<()> {
        let layout = SurfaceLayout::from_viewport(self.host.viewport());
        let (Some(surface), Some(engine)) = (self.surface.as_mut(), self.engine.as_mut()) else {
            return Ok(());
        };
        surface.configure(&layout)?;
        surface.set_transform(layout.transform());
        engine.regenerate(layout.logical);
        self.layout = Some(layout);
        Ok(())
    }

    fn draw_frame(&mut self) {
        let (Some(surface), Some(engine)) = (self.surface.as_mut(), self.engine.as_mut()) else {
            return;
        };
        self.last_stats = engine.tick(surface);
        surface.present();
    }

    fn teardown(&mut self) {
        if let LoopState::Running { pending } = self.state {
            self.host.cancel_frame(pending);
        }
        self.state = LoopState::Idle;
        if let Some(listener) = self.resize_listener.take() {
            self.host.remove_resize_listener(listener);
        }
    }
}

impl<H: Host> Drop for FlowFieldCanvas<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<H: Host> std::fmt::Debug for FlowFieldCanvas<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowFieldCanvas")
            .field("props", &self.props)
            .field("status", &self.status)
            .field("layout", &self.layout)
            .field("curves", &self.population().map(CurvePopulation::len))
            .finish_non_exhaustive()
    }
}
