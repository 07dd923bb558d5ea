use crate::foundation::core::{Point, Rgb8};
use crate::foundation::error::{HeroflowError, HeroflowResult};
use crate::surface::context::LineCap;
use std::path::Path;

/// Closed sampling range `[min, max]` for a per-curve base quantity.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValueRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl ValueRange {
    /// Build a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &str) -> HeroflowResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(HeroflowError::validation(format!(
                "{name} range must be finite"
            )));
        }
        if self.min > self.max {
            return Err(HeroflowError::validation(format!(
                "{name} range min must be <= max"
            )));
        }
        Ok(())
    }
}

/// Tuning constants for the flow field.
///
/// Every field has a default, so a JSON config only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowFieldConfig {
    /// Upper bound on the population size.
    pub max_curves: usize,
    /// One curve per this many logical units of viewport width.
    pub density_divisor: f64,
    /// Fixed per-frame increment of the shared time accumulator.
    pub time_step: f64,
    /// Extra horizontal margin beyond a curve's length before it is recycled.
    pub wrap_buffer: f64,
    /// Hard ceiling for stroke opacity.
    pub opacity_cap: f64,
    /// Opacity of a curve at depth 1.0 before the spotlight boost.
    pub base_opacity: f64,
    /// Opacity added at the focal point itself.
    pub spotlight_gain: f64,
    /// Normalized distance from the focal point at which the boost reaches zero.
    pub spotlight_radius: f64,
    /// Probability of spawning in the half of the viewport opposite the text.
    pub source_bias: f64,
    /// Focal point in normalized coordinates for left-to-right layouts.
    pub focal_point: [f64; 2],
    /// Base stroke length, scaled by depth.
    pub length: ValueRange,
    /// Base speed magnitude in logical units per frame, scaled by depth.
    pub speed: ValueRange,
    /// Base stroke width, scaled by depth.
    pub thickness: ValueRange,
    /// Base horizontal sway, scaled by depth.
    pub amplitude: ValueRange,
    /// Control point bend as a fraction of amplitude.
    pub control_bend: f64,
    /// Multiplier on `time` for control point drift.
    pub drift_rate: f64,
    /// Stroke colors.
    pub palette: Vec<Rgb8>,
    /// Stroke cap style.
    pub line_cap: LineCap,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for FlowFieldConfig {
    fn default() -> Self {
        Self {
            max_curves: 60,
            density_divisor: 20.0,
            time_step: 0.005,
            wrap_buffer: 100.0,
            opacity_cap: 0.3,
            base_opacity: 0.12,
            spotlight_gain: 0.18,
            spotlight_radius: 0.6,
            source_bias: 0.6,
            focal_point: [0.25, 0.45],
            length: ValueRange::new(100.0, 300.0),
            speed: ValueRange::new(0.05, 0.25),
            thickness: ValueRange::new(0.5, 2.0),
            amplitude: ValueRange::new(30.0, 50.0),
            control_bend: 0.4,
            drift_rate: 0.5,
            palette: vec![
                Rgb8::new(56, 189, 248),
                Rgb8::new(45, 212, 191),
                Rgb8::new(167, 139, 250),
            ],
            line_cap: LineCap::Round,
            seed: None,
        }
    }
}

impl FlowFieldConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(s: &str) -> HeroflowResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> HeroflowResult<Self> {
        use anyhow::Context as _;
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read flow-field config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check every constant for a value the engine cannot work with.
    pub fn validate(&self) -> HeroflowResult<()> {
        if !(self.density_divisor.is_finite() && self.density_divisor > 0.0) {
            return Err(HeroflowError::validation("density_divisor must be > 0"));
        }
        if !(self.time_step.is_finite() && self.time_step >= 0.0) {
            return Err(HeroflowError::validation("time_step must be >= 0"));
        }
        if !(self.wrap_buffer.is_finite() && self.wrap_buffer >= 0.0) {
            return Err(HeroflowError::validation("wrap_buffer must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.opacity_cap) {
            return Err(HeroflowError::validation("opacity_cap must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.base_opacity) {
            return Err(HeroflowError::validation("base_opacity must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.spotlight_gain) {
            return Err(HeroflowError::validation(
                "spotlight_gain must be in [0, 1]",
            ));
        }
        if !(self.spotlight_radius.is_finite() && self.spotlight_radius > 0.0) {
            return Err(HeroflowError::validation("spotlight_radius must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.source_bias) {
            return Err(HeroflowError::validation("source_bias must be in [0, 1]"));
        }
        if !self.focal_point.iter().all(|v| (0.0..=1.0).contains(v)) {
            return Err(HeroflowError::validation(
                "focal_point coordinates must be in [0, 1]",
            ));
        }

        self.length.validate("length")?;
        self.speed.validate("speed")?;
        self.thickness.validate("thickness")?;
        self.amplitude.validate("amplitude")?;
        if self.length.min < 0.0 || self.amplitude.min < 0.0 {
            return Err(HeroflowError::validation(
                "length and amplitude must be >= 0",
            ));
        }
        if self.speed.min <= 0.0 {
            return Err(HeroflowError::validation("speed min must be > 0"));
        }
        if self.thickness.min <= 0.0 {
            return Err(HeroflowError::validation("thickness min must be > 0"));
        }
        if !(self.control_bend.is_finite() && self.drift_rate.is_finite()) {
            return Err(HeroflowError::validation(
                "control_bend and drift_rate must be finite",
            ));
        }
        if self.palette.is_empty() {
            return Err(HeroflowError::validation("palette must not be empty"));
        }
        Ok(())
    }
}

/// Text-reading direction of the hosting page.
///
/// This is the single global input that orients the whole composition: which way curves flow,
/// which half they spawn in, and where the spotlight sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingDirection {
    /// Left-to-right text; the text block sits on the left.
    Ltr,
    /// Right-to-left text; the text block sits on the right.
    Rtl,
}

impl ReadingDirection {
    /// Map the component's `is_right_to_left` flag.
    pub fn from_rtl(is_right_to_left: bool) -> Self {
        if is_right_to_left { Self::Rtl } else { Self::Ltr }
    }

    /// Sign applied to every curve speed: flow runs toward the text.
    pub fn flow_sign(self) -> f64 {
        match self {
            Self::Ltr => -1.0,
            Self::Rtl => 1.0,
        }
    }

    /// Normalized focal point, mirrored horizontally for RTL.
    pub fn focal_point(self, cfg: &FlowFieldConfig) -> Point {
        let [x, y] = cfg.focal_point;
        match self {
            Self::Ltr => Point::new(x, y),
            Self::Rtl => Point::new(1.0 - x, y),
        }
    }

    /// Horizontal span `[lo, hi]` of the source half for a viewport of `width`.
    pub fn source_span(self, width: f64) -> (f64, f64) {
        let half = width * 0.5;
        match self {
            Self::Ltr => (half, width),
            Self::Rtl => (0.0, half),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/config.rs"]
mod tests;
