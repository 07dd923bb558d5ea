use crate::foundation::core::{Point, Rgb8, Size};

/// Smallest depth a curve can have (exclusive).
pub const MIN_DEPTH: f64 = 0.2;

/// One animated flowing stroke.
///
/// Only `position` changes after creation; recycling moves a curve instead of replacing it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Curve {
    /// Anchor of the stroke in logical units.
    pub position: Point,
    /// Horizontal span of the stroke.
    pub length: f64,
    /// Signed horizontal velocity in logical units per frame.
    pub speed: f64,
    /// Starting phase of the sway sinusoid, in radians.
    pub phase: f64,
    /// Palette color; alpha is computed per frame.
    pub color: Rgb8,
    /// Stroke width.
    pub thickness: f64,
    /// Horizontal sway magnitude.
    pub amplitude: f64,
    /// Simulated nearness in `(MIN_DEPTH, 1.0]`.
    pub depth: f64,
}

impl Curve {
    /// Distance past either viewport edge at which this curve is recycled.
    pub fn wrap_margin(&self, buffer: f64) -> f64 {
        self.length + buffer
    }
}

/// The full curve population for one viewport-size epoch.
#[derive(Clone, Debug, Default)]
pub struct CurvePopulation {
    pub(crate) curves: Vec<Curve>,
    pub(crate) bounds: Size,
    pub(crate) epoch: u64,
}

impl CurvePopulation {
    /// Curves in update order.
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// `true` when there are no curves (e.g. a zero-width viewport).
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Logical viewport size this population was generated for.
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Generation counter; bumps on every regeneration.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
