//! Per-frame stroke shape and opacity for a single curve.

use crate::field::config::{FlowFieldConfig, ReadingDirection};
use crate::field::curve::Curve;
use crate::foundation::core::{Point, Size};

const FIRST_CONTROL_SPAN: f64 = 0.3;
const SECOND_CONTROL_SPAN: f64 = 0.6;

/// Cubic stroke of one curve at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeShape {
    /// Start point (anchor plus sway).
    pub start: Point,
    /// First control point (30% span).
    pub c1: Point,
    /// Second control point (60% span).
    pub c2: Point,
    /// End point.
    pub end: Point,
}

/// Compute the stroke for `curve` at accumulated `time`.
pub fn stroke_shape(curve: &Curve, time: f64, cfg: &FlowFieldConfig) -> StrokeShape {
    let sway = (time + curve.phase).sin() * curve.amplitude;
    let start = Point::new(curve.position.x + sway, curve.position.y);

    let bend = curve.amplitude * cfg.control_bend;
    let drift = time * cfg.drift_rate;

    let c1 = Point::new(
        start.x + curve.length * FIRST_CONTROL_SPAN + drift.cos() * bend,
        start.y - bend,
    );
    let c2 = Point::new(
        start.x + curve.length * SECOND_CONTROL_SPAN + drift.sin() * bend,
        start.y + bend,
    );
    let end = Point::new(start.x + curve.length, start.y);

    StrokeShape { start, c1, c2, end }
}

/// Stroke opacity: depth-scaled base plus a spotlight boost near the focal point.
///
/// Always in `[0, cfg.opacity_cap]`.
pub fn curve_opacity(
    curve: &Curve,
    bounds: Size,
    direction: ReadingDirection,
    cfg: &FlowFieldConfig,
) -> f64 {
    let base = curve.depth * cfg.base_opacity;

    let spotlight = if bounds.width > 0.0 && bounds.height > 0.0 {
        let focal = direction.focal_point(cfg);
        let nx = curve.position.x / bounds.width;
        let ny = curve.position.y / bounds.height;
        let dist = (nx - focal.x).hypot(ny - focal.y);
        (1.0 - dist / cfg.spotlight_radius).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let opacity = base + spotlight * cfg.spotlight_gain;
    if opacity.is_finite() {
        opacity.clamp(0.0, cfg.opacity_cap)
    } else {
        0.0
    }
}
