use crate::field::curve::Curve;
use crate::foundation::core::Size;
use crate::foundation::math::Rng64;

/// Advance `curve` by its speed, then recycle it if it has left the viewport.
///
/// Returns `true` when the curve was recycled.
pub fn advance_and_wrap(curve: &mut Curve, bounds: Size, buffer: f64, rng: &mut Rng64) -> bool {
    curve.position.x += curve.speed;
    wrap_curve(curve, bounds, buffer, rng)
}

/// Recycle a curve that has fully exited on its trailing side.
///
/// The curve re-enters from the opposite edge at exactly `length + buffer` outside the viewport
/// with a fresh vertical position. Nothing else about the curve changes.
pub fn wrap_curve(curve: &mut Curve, bounds: Size, buffer: f64, rng: &mut Rng64) -> bool {
    let margin = curve.wrap_margin(buffer);

    let new_x = if curve.speed < 0.0 && curve.position.x < -margin {
        bounds.width + margin
    } else if curve.speed > 0.0 && curve.position.x > bounds.width + margin {
        -margin
    } else {
        return false;
    };

    curve.position.x = new_x;
    curve.position.y = rng.range(0.0, bounds.height);
    true
}

#[cfg(test)]
#[path = "../../tests/unit/field/wrap.rs"]
mod tests;
