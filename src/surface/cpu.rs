use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::foundation::error::{HeroflowError, HeroflowResult};
use crate::foundation::math::premul_rgba8;
use crate::surface::context::{DrawContext, LineCap, StrokeColor, Surface};
use crate::surface::layout::SurfaceLayout;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag is kept to make this explicit at
/// sink boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A frame filled with one straight-alpha color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let px = premul_rgba8(rgba);
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for chunk in data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
            premultiplied: true,
        }
    }

    /// Convert to straight alpha for encoders that expect it (e.g. PNG).
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// How strokes combine with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeBlend {
    /// Source-over.
    Normal,
    /// Screen; lightens the backdrop like the hero layer's `mix-blend-screen`.
    #[default]
    Screen,
}

/// Options for [`CpuSurface`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CpuSurfaceOpts {
    /// If set, cleared regions are filled with this straight-alpha color instead of transparency.
    pub backdrop_rgba: Option<[u8; 4]>,
    /// Stroke blend mode.
    pub blend: StrokeBlend,
}

impl CpuSurfaceOpts {
    /// Return options with a backdrop color.
    pub fn with_backdrop(mut self, backdrop: Option<[u8; 4]>) -> Self {
        self.backdrop_rgba = backdrop;
        self
    }

    /// Return options with a stroke blend mode.
    pub fn with_blend(mut self, blend: StrokeBlend) -> Self {
        self.blend = blend;
        self
    }
}

struct Raster {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
}

/// CPU raster surface powered by `vello_cpu`.
///
/// Draw calls accumulate in a render context and are rasterized into the pixmap on
/// [`Surface::present`]. Until `configure` succeeds the surface has no backing store and drops
/// draw calls.
pub struct CpuSurface {
    opts: CpuSurfaceOpts,
    raster: Option<Raster>,

    transform: Affine,
    path: BezPath,
    stroke_rgba: [u8; 4],
    line_width: f64,
    line_cap: LineCap,
}

impl CpuSurface {
    /// Create an unconfigured surface.
    pub fn new(opts: CpuSurfaceOpts) -> Self {
        Self {
            opts,
            raster: None,
            transform: Affine::IDENTITY,
            path: BezPath::new(),
            stroke_rgba: [0, 0, 0, 255],
            line_width: 1.0,
            line_cap: LineCap::Butt,
        }
    }

    /// Surface options.
    pub fn opts(&self) -> CpuSurfaceOpts {
        self.opts
    }

    /// Backing size in pixels, if configured.
    pub fn backing_size(&self) -> Option<(u32, u32)> {
        self.raster
            .as_ref()
            .map(|r| (u32::from(r.width), u32::from(r.height)))
    }

    /// Copy out the last presented frame.
    pub fn snapshot(&self) -> HeroflowResult<FrameRGBA> {
        let raster = self
            .raster
            .as_ref()
            .ok_or_else(|| HeroflowError::render("cpu surface has no backing store"))?;
        Ok(FrameRGBA {
            width: u32::from(raster.width),
            height: u32::from(raster.height),
            data: raster.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn backdrop_premul(&self) -> [u8; 4] {
        self.opts
            .backdrop_rgba
            .map(premul_rgba8)
            .unwrap_or([0, 0, 0, 0])
    }
}

impl DrawContext for CpuSurface {
    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn clear_rect(&mut self, rect: Rect) {
        let backdrop = self.backdrop_premul();
        let transform = self.transform;
        let Some(raster) = self.raster.as_mut() else {
            return;
        };

        let device = transform.transform_rect_bbox(rect);
        let full = Rect::new(0.0, 0.0, f64::from(raster.width), f64::from(raster.height));
        let covers_all = device.x0 <= full.x0
            && device.y0 <= full.y0
            && device.x1 >= full.x1
            && device.y1 >= full.y1;

        if covers_all {
            // Pending strokes are fully overwritten, start the frame over.
            raster.ctx.reset();
            clear_pixmap(&mut raster.pixmap, [0, 0, 0, 0]);
        }

        let compose = if covers_all {
            vello_cpu::peniko::Compose::SrcOver
        } else {
            vello_cpu::peniko::Compose::Copy
        };
        if covers_all && backdrop[3] == 0 {
            return;
        }

        raster.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        raster.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        raster
            .ctx
            .set_blend_mode(vello_cpu::peniko::BlendMode::new(
                vello_cpu::peniko::Mix::Normal,
                compose,
            ));
        let [r, g, b, a] = self.opts.backdrop_rgba.unwrap_or([0, 0, 0, 0]);
        raster
            .ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        let clipped = device.intersect(full);
        raster.ctx.fill_rect(&rect_to_cpu(clipped));
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.path.curve_to(c1, c2, end);
    }

    fn set_stroke_color(&mut self, color: StrokeColor) {
        self.stroke_rgba = color.to_rgba8();
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.line_cap = cap;
    }

    fn stroke(&mut self) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        if self.path.elements().is_empty() || self.stroke_rgba[3] == 0 {
            return;
        }

        let mix = match self.opts.blend {
            StrokeBlend::Normal => vello_cpu::peniko::Mix::Normal,
            StrokeBlend::Screen => vello_cpu::peniko::Mix::Screen,
        };
        raster.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::new(
            mix,
            vello_cpu::peniko::Compose::SrcOver,
        ));
        raster.ctx.set_transform(affine_to_cpu(self.transform));
        raster.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let [r, g, b, a] = self.stroke_rgba;
        raster
            .ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        raster.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(self.line_width).with_caps(cap_to_cpu(self.line_cap)),
        );
        raster.ctx.stroke_path(&bezpath_to_cpu(&self.path));
    }
}

impl Surface for CpuSurface {
    fn configure(&mut self, layout: &SurfaceLayout) -> HeroflowResult<()> {
        let width: u16 = layout
            .backing_width
            .try_into()
            .map_err(|_| HeroflowError::render("surface width exceeds u16"))?;
        let height: u16 = layout
            .backing_height
            .try_into()
            .map_err(|_| HeroflowError::render("surface height exceeds u16"))?;
        // Resizing a canvas resets its context state.
        self.transform = Affine::IDENTITY;
        self.path = BezPath::new();

        if width == 0 || height == 0 {
            // A collapsed viewport has nothing to draw into; draws are dropped until it grows.
            self.raster = None;
            return Ok(());
        }

        let reuse = self
            .raster
            .as_ref()
            .is_some_and(|r| r.width == width && r.height == height);
        if !reuse {
            self.raster = Some(Raster {
                width,
                height,
                pixmap: vello_cpu::Pixmap::new(width, height),
                ctx: vello_cpu::RenderContext::new(width, height),
            });
        }

        let backdrop = self.backdrop_premul();
        if let Some(raster) = self.raster.as_mut() {
            raster.ctx.reset();
            clear_pixmap(&mut raster.pixmap, backdrop);
        }
        Ok(())
    }

    fn present(&mut self) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        raster.ctx.flush();
        raster.ctx.render_to_pixmap(&mut raster.pixmap);
        raster.ctx.reset();
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn cap_to_cpu(cap: LineCap) -> vello_cpu::kurbo::Cap {
    match cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
        LineCap::Square => vello_cpu::kurbo::Cap::Square,
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
