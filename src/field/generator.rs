use crate::field::config::{FlowFieldConfig, ReadingDirection};
use crate::field::curve::{Curve, MIN_DEPTH};
use crate::foundation::core::{Point, Rgb8, Size};
use crate::foundation::math::Rng64;

/// Population size for a viewport of logical `width`.
///
/// `min(max_curves, floor(width / density_divisor))`, and `0` for widths that are not positive.
pub fn curve_count(width: f64, cfg: &FlowFieldConfig) -> usize {
    if !width.is_finite() || width <= 0.0 || cfg.density_divisor <= 0.0 {
        return 0;
    }
    let n = (width / cfg.density_divisor).floor();
    if n >= cfg.max_curves as f64 {
        cfg.max_curves
    } else {
        n as usize
    }
}

/// Sample a depth in `(MIN_DEPTH, 1.0]`.
pub(crate) fn sample_depth(rng: &mut Rng64) -> f64 {
    1.0 - rng.next_f64_01() * (1.0 - MIN_DEPTH)
}

/// Generate one curve for a viewport of `bounds`.
pub fn spawn_curve(
    bounds: Size,
    direction: ReadingDirection,
    cfg: &FlowFieldConfig,
    rng: &mut Rng64,
) -> Curve {
    let depth = sample_depth(rng);

    let x = if rng.chance(cfg.source_bias) {
        let (lo, hi) = direction.source_span(bounds.width);
        rng.range(lo, hi)
    } else {
        rng.range(0.0, bounds.width)
    };
    let y = rng.range(0.0, bounds.height);

    let length = rng.range(cfg.length.min, cfg.length.max) * depth;
    let speed = rng.range(cfg.speed.min, cfg.speed.max) * depth * direction.flow_sign();
    let thickness = rng.range(cfg.thickness.min, cfg.thickness.max) * depth;
    let amplitude = rng.range(cfg.amplitude.min, cfg.amplitude.max) * depth;
    let phase = rng.range(0.0, std::f64::consts::TAU);
    let color = if cfg.palette.is_empty() {
        Rgb8::new(255, 255, 255)
    } else {
        cfg.palette[rng.index(cfg.palette.len())]
    };

    Curve {
        position: Point::new(x, y),
        length,
        speed,
        phase,
        color,
        thickness,
        amplitude,
        depth,
    }
}

/// Generate a full population for `bounds`.
pub fn generate_curves(
    bounds: Size,
    direction: ReadingDirection,
    cfg: &FlowFieldConfig,
    rng: &mut Rng64,
) -> Vec<Curve> {
    let count = curve_count(bounds.width, cfg);
    (0..count)
        .map(|_| spawn_curve(bounds, direction, cfg, rng))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/field/generator.rs"]
mod tests;
