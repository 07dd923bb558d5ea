use super::*;
use crate::foundation::core::{Point, Rgb8};

fn curve(x: f64, speed: f64) -> Curve {
    Curve {
        position: Point::new(x, 100.0),
        length: 150.0,
        speed,
        phase: 1.0,
        color: Rgb8::new(45, 212, 191),
        thickness: 1.0,
        amplitude: 30.0,
        depth: 0.8,
    }
}

#[test]
fn leftward_curve_recycles_to_exact_right_margin() {
    let bounds = Size::new(1000.0, 800.0);
    let mut rng = Rng64::new(1);
    let mut c = curve(-249.0, -2.0);

    assert!(advance_and_wrap(&mut c, bounds, 100.0, &mut rng));
    assert_eq!(c.position.x, 1000.0 + 150.0 + 100.0);
    assert!((0.0..=800.0).contains(&c.position.y));
}

#[test]
fn rightward_curve_recycles_to_exact_left_margin() {
    let bounds = Size::new(1000.0, 800.0);
    let mut rng = Rng64::new(2);
    let mut c = curve(1249.5, 1.0);

    assert!(advance_and_wrap(&mut c, bounds, 100.0, &mut rng));
    assert_eq!(c.position.x, -250.0);
}

#[test]
fn curve_at_margin_is_not_recycled() {
    let bounds = Size::new(1000.0, 800.0);
    let mut rng = Rng64::new(3);
    let mut c = curve(-250.0, -2.0);
    assert!(!wrap_curve(&mut c, bounds, 100.0, &mut rng));
    assert_eq!(c.position, Point::new(-250.0, 100.0));
}

#[test]
fn recycle_only_touches_position() {
    let bounds = Size::new(500.0, 300.0);
    let mut rng = Rng64::new(4);
    let mut c = curve(-400.0, -0.5);
    let before = c.clone();
    assert!(wrap_curve(&mut c, bounds, 100.0, &mut rng));
    assert_eq!(
        (c.length, c.speed, c.phase, c.color, c.thickness, c.amplitude, c.depth),
        (
            before.length,
            before.speed,
            before.phase,
            before.color,
            before.thickness,
            before.amplitude,
            before.depth
        )
    );
}

#[test]
fn containment_holds_over_many_frames() {
    let bounds = Size::new(640.0, 360.0);
    let mut rng = Rng64::new(5);
    for speed in [-3.7, -0.05, 0.05, 3.7] {
        let mut c = curve(320.0, speed);
        let margin = c.wrap_margin(100.0);
        for _ in 0..5_000 {
            advance_and_wrap(&mut c, bounds, 100.0, &mut rng);
            assert!(c.position.x >= -margin);
            assert!(c.position.x <= bounds.width + margin);
        }
    }
}
