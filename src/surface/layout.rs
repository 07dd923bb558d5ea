use crate::foundation::core::{Affine, Size, Viewport};

/// Backing size and coordinate transform derived from the host viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceLayout {
    /// Displayed size in logical units.
    pub logical: Size,
    /// Density ratio applied to the backing store.
    pub device_pixel_ratio: f64,
    /// Backing store width in physical pixels.
    pub backing_width: u32,
    /// Backing store height in physical pixels.
    pub backing_height: u32,
}

impl SurfaceLayout {
    /// Size a surface for `viewport`: backing = `floor(logical × dpr)`, display = logical.
    pub fn from_viewport(viewport: Viewport) -> Self {
        let logical = viewport.logical_size();
        let dpr = viewport.effective_pixel_ratio();
        Self {
            logical,
            device_pixel_ratio: dpr,
            backing_width: to_pixels(logical.width * dpr),
            backing_height: to_pixels(logical.height * dpr),
        }
    }

    /// Transform that lets drawing happen in logical units.
    ///
    /// Absolute, so re-applying it after a resize never compounds.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio)
    }
}

fn to_pixels(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
