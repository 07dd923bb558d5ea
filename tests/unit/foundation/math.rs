use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn unit_samples_stay_half_open() {
    let mut rng = Rng64::new(7);
    for _ in 0..10_000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn range_and_index_bounds() {
    let mut rng = Rng64::new(99);
    for _ in 0..1_000 {
        let v = rng.range(-3.0, 5.0);
        assert!((-3.0..5.0).contains(&v));
        assert!(rng.index(3) < 3);
    }
    assert_eq!(rng.range(2.0, 2.0), 2.0);
    assert_eq!(rng.range(4.0, 1.0), 4.0);
}

#[test]
fn chance_extremes() {
    let mut rng = Rng64::new(5);
    assert!((0..100).all(|_| !rng.chance(0.0)));
    assert!((0..100).all(|_| rng.chance(1.0)));
}

#[test]
fn premul_rounds_like_div255() {
    assert_eq!(premul_rgba8([255, 128, 0, 255]), [255, 128, 0, 255]);
    assert_eq!(premul_rgba8([255, 255, 255, 0]), [0, 0, 0, 0]);
    assert_eq!(premul_rgba8([200, 100, 50, 128]), [100, 50, 25, 128]);
}
