use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::HeroflowResult;
use crate::surface::context::{DrawContext, LineCap, StrokeColor, Surface};
use crate::surface::layout::SurfaceLayout;

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCmd {
    /// `Surface::configure`.
    Configure {
        /// Layout applied.
        layout: SurfaceLayout,
    },
    /// `Surface::apply_style`.
    ApplyStyle {
        /// Class list.
        class: String,
    },
    /// `DrawContext::set_transform`.
    SetTransform {
        /// Affine coefficients.
        coeffs: [f64; 6],
    },
    /// `DrawContext::clear_rect`.
    ClearRect {
        /// Cleared rect.
        rect: Rect,
    },
    /// `DrawContext::begin_path`.
    BeginPath,
    /// `DrawContext::move_to`.
    MoveTo {
        /// Target point.
        p: Point,
    },
    /// `DrawContext::bezier_curve_to`.
    BezierCurveTo {
        /// First control point.
        c1: Point,
        /// Second control point.
        c2: Point,
        /// End point.
        end: Point,
    },
    /// `DrawContext::set_stroke_color`.
    SetStrokeColor {
        /// Stroke color.
        color: StrokeColor,
    },
    /// `DrawContext::set_line_width`.
    SetLineWidth {
        /// Width.
        width: f64,
    },
    /// `DrawContext::set_line_cap`.
    SetLineCap {
        /// Cap.
        cap: LineCap,
    },
    /// `DrawContext::stroke`.
    Stroke,
    /// `Surface::present`.
    Present,
}

impl DrawCmd {
    /// `true` for calls that touch pixels or drawing state (everything but setup and style).
    pub fn is_draw_call(&self) -> bool {
        !matches!(self, Self::Configure { .. } | Self::ApplyStyle { .. })
    }
}

/// Surface that records every call instead of rasterizing.
///
/// Used by tests to observe exactly what the flow field asked the canvas to do, and by the
/// `trace` CLI command.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    cmds: Vec<DrawCmd>,
    layout: Option<SurfaceLayout>,
    refuse_configure: bool,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose `configure` fails, for exercising setup-failure paths.
    pub fn refusing_configure() -> Self {
        Self {
            refuse_configure: true,
            ..Self::default()
        }
    }

    /// All recorded calls in order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Layout from the last successful `configure`.
    pub fn layout(&self) -> Option<SurfaceLayout> {
        self.layout
    }

    /// Number of recorded draw calls (see [`DrawCmd::is_draw_call`]).
    pub fn draw_calls(&self) -> usize {
        self.cmds.iter().filter(|c| c.is_draw_call()).count()
    }

    /// Number of `stroke` calls.
    pub fn strokes(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Stroke))
            .count()
    }

    /// Stroke colors in issue order.
    pub fn stroke_colors(&self) -> impl Iterator<Item = StrokeColor> + '_ {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::SetStrokeColor { color } => Some(*color),
            _ => None,
        })
    }

    /// Most recent transform set on the surface.
    pub fn current_transform(&self) -> Option<Affine> {
        self.cmds.iter().rev().find_map(|c| match c {
            DrawCmd::SetTransform { coeffs } => Some(Affine::new(*coeffs)),
            _ => None,
        })
    }
}

impl DrawContext for RecordingSurface {
    fn set_transform(&mut self, transform: Affine) {
        self.cmds.push(DrawCmd::SetTransform {
            coeffs: transform.as_coeffs(),
        });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.cmds.push(DrawCmd::ClearRect { rect });
    }

    fn begin_path(&mut self) {
        self.cmds.push(DrawCmd::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.cmds.push(DrawCmd::MoveTo { p });
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.cmds.push(DrawCmd::BezierCurveTo { c1, c2, end });
    }

    fn set_stroke_color(&mut self, color: StrokeColor) {
        self.cmds.push(DrawCmd::SetStrokeColor { color });
    }

    fn set_line_width(&mut self, width: f64) {
        self.cmds.push(DrawCmd::SetLineWidth { width });
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.cmds.push(DrawCmd::SetLineCap { cap });
    }

    fn stroke(&mut self) {
        self.cmds.push(DrawCmd::Stroke);
    }
}

impl Surface for RecordingSurface {
    fn configure(&mut self, layout: &SurfaceLayout) -> HeroflowResult<()> {
        if self.refuse_configure {
            return Err(crate::HeroflowError::render(
                "recording surface configured to refuse layout",
            ));
        }
        self.layout = Some(*layout);
        self.cmds.push(DrawCmd::Configure { layout: *layout });
        Ok(())
    }

    fn apply_style(&mut self, class: &str) {
        self.cmds.push(DrawCmd::ApplyStyle {
            class: class.to_string(),
        });
    }

    fn present(&mut self) {
        self.cmds.push(DrawCmd::Present);
    }
}
