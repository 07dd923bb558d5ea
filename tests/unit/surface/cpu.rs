use super::*;
use crate::foundation::core::{Rgb8, Viewport};

fn layout(w: f64, h: f64, dpr: f64) -> SurfaceLayout {
    SurfaceLayout::from_viewport(Viewport::new(w, h).with_device_pixel_ratio(dpr))
}

fn draw_diagonal(s: &mut CpuSurface, w: f64, h: f64) {
    s.clear_rect(Rect::new(0.0, 0.0, w, h));
    s.set_line_cap(LineCap::Round);
    s.begin_path();
    s.move_to(Point::new(2.0, 2.0));
    s.bezier_curve_to(
        Point::new(w * 0.3, 2.0),
        Point::new(w * 0.6, h - 2.0),
        Point::new(w - 2.0, h - 2.0),
    );
    s.set_stroke_color(StrokeColor::new(Rgb8::new(255, 255, 255), 1.0));
    s.set_line_width(4.0);
    s.stroke();
    s.present();
}

#[test]
fn unconfigured_surface_has_no_snapshot() {
    let s = CpuSurface::new(CpuSurfaceOpts::default());
    assert!(s.snapshot().is_err());
    assert_eq!(s.backing_size(), None);
}

#[test]
fn zero_sized_layout_drops_backing_until_regrown() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    s.configure(&layout(16.0, 16.0, 1.0)).unwrap();
    assert_eq!(s.backing_size(), Some((16, 16)));

    s.configure(&layout(0.0, 10.0, 1.0)).unwrap();
    assert_eq!(s.backing_size(), None);
    draw_diagonal(&mut s, 0.0, 10.0);
    assert!(s.snapshot().is_err());

    s.configure(&layout(24.0, 12.0, 1.0)).unwrap();
    assert_eq!(s.backing_size(), Some((24, 12)));
    draw_diagonal(&mut s, 24.0, 12.0);
    assert!(s.snapshot().unwrap().data.iter().any(|&b| b != 0));
}

#[test]
fn oversized_layout_is_rejected() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    assert!(s.configure(&layout(70_000.0, 10.0, 1.0)).is_err());
}

#[test]
fn backing_store_follows_pixel_ratio() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    s.configure(&layout(32.0, 16.0, 2.0)).unwrap();
    assert_eq!(s.backing_size(), Some((64, 32)));
    let f = s.snapshot().unwrap();
    assert_eq!(f.data.len(), 64 * 32 * 4);
    assert!(f.premultiplied);
}

#[test]
fn stroke_paints_pixels() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default().with_blend(StrokeBlend::Normal));
    s.configure(&layout(64.0, 64.0, 1.0)).unwrap();
    draw_diagonal(&mut s, 64.0, 64.0);
    let f = s.snapshot().unwrap();
    assert!(f.data.chunks_exact(4).any(|px| px[3] > 0));
}

#[test]
fn full_clear_restores_backdrop() {
    let backdrop = [10, 20, 30, 255];
    let mut s = CpuSurface::new(CpuSurfaceOpts::default().with_backdrop(Some(backdrop)));
    s.configure(&layout(32.0, 32.0, 1.0)).unwrap();
    draw_diagonal(&mut s, 32.0, 32.0);
    assert_ne!(s.snapshot().unwrap(), FrameRGBA::solid(32, 32, backdrop));

    s.clear_rect(Rect::new(0.0, 0.0, 32.0, 32.0));
    s.present();
    assert_eq!(s.snapshot().unwrap(), FrameRGBA::solid(32, 32, backdrop));
}

#[test]
fn transparent_stroke_is_skipped() {
    let mut s = CpuSurface::new(CpuSurfaceOpts::default());
    s.configure(&layout(16.0, 16.0, 1.0)).unwrap();
    s.clear_rect(Rect::new(0.0, 0.0, 16.0, 16.0));
    s.begin_path();
    s.move_to(Point::new(0.0, 0.0));
    s.bezier_curve_to(Point::new(4.0, 4.0), Point::new(8.0, 8.0), Point::new(16.0, 16.0));
    s.set_stroke_color(StrokeColor::new(Rgb8::new(255, 0, 0), 0.0));
    s.stroke();
    s.present();
    assert!(s.snapshot().unwrap().data.iter().all(|&b| b == 0));
}

#[test]
fn straight_alpha_conversion_unpremultiplies() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![50, 25, 0, 128],
        premultiplied: true,
    };
    assert_eq!(f.to_straight_rgba8(), vec![100, 50, 0, 128]);
}
