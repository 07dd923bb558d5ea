use crate::foundation::core::{Affine, Point, Rect, Rgb8};
use crate::foundation::error::HeroflowResult;
use crate::surface::layout::SurfaceLayout;

/// Stroke end cap, mirroring the 2D canvas `lineCap` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat cap at the endpoint.
    Butt,
    /// Semicircular cap.
    #[default]
    Round,
    /// Square cap extending half the width.
    Square,
}

/// Stroke color: palette RGB plus a per-frame opacity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StrokeColor {
    /// Base color.
    pub rgb: Rgb8,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl StrokeColor {
    /// Build a stroke color.
    pub fn new(rgb: Rgb8, alpha: f64) -> Self {
        Self { rgb, alpha }
    }

    /// Straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.rgb.with_alpha(self.alpha)
    }
}

/// The subset of a 2D canvas context the flow field draws with.
///
/// Coordinates are in logical units; implementations map them through the current transform.
/// Every call is infallible, matching the immediate-mode canvas API.
pub trait DrawContext {
    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);
    /// Clear `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);
    /// Start a new path, discarding the current one.
    fn begin_path(&mut self);
    /// Begin a subpath at `p`.
    fn move_to(&mut self, p: Point);
    /// Append a cubic Bézier segment.
    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point);
    /// Set the stroke paint.
    fn set_stroke_color(&mut self, color: StrokeColor);
    /// Set the stroke width in logical units.
    fn set_line_width(&mut self, width: f64);
    /// Set the stroke cap.
    fn set_line_cap(&mut self, cap: LineCap);
    /// Stroke the current path with the current stroke state.
    fn stroke(&mut self);
}

/// A drawing surface owned by the flow field for its mounted lifetime.
pub trait Surface: DrawContext {
    /// Resize the backing store to `layout.backing_*` while keeping the displayed size logical.
    fn configure(&mut self, layout: &SurfaceLayout) -> HeroflowResult<()>;

    /// Attach the caller's styling hook (a class list for DOM hosts).
    fn apply_style(&mut self, _class: &str) {}

    /// End-of-frame hook for backends that batch draw calls.
    fn present(&mut self) {}
}
