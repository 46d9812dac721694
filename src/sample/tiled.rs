//! Periodic extension of a raster with bilinear interpolation.

use crate::foundation::core::{PlanePoint, Raster, validate_raster};
use crate::foundation::error::{DomainError, DomainResult, TilewarpResult};
use crate::foundation::math::{fract_pos, lerp_u8, wrap_index};
use crate::transform::affine::ScaleTranslate;

/// Read-only view of a raster as an infinite tiling of itself.
///
/// Plane points are converted to raw pixel units through the sampler's window, then wrapped
/// modulo the raster size. The default window is [`ScaleTranslate::pixel_extent`]: the plane
/// origin sits on the top-left pixel and one plane unit spans the shorter side.
#[derive(Debug)]
pub struct TiledSampler<'a, P>
where
    P: image::Pixel<Subpixel = u8>,
{
    source: &'a Raster<P>,
    window: ScaleTranslate,
}

impl<'a, P> TiledSampler<'a, P>
where
    P: image::Pixel<Subpixel = u8>,
{
    /// Wrap `source` with the default tiling window.
    pub fn new(source: &'a Raster<P>) -> TilewarpResult<Self> {
        let (w, h) = source.dimensions();
        Self::with_window(source, ScaleTranslate::pixel_extent(w, h))
    }

    /// Wrap `source` with an explicit tiling window.
    pub fn with_window(source: &'a Raster<P>, window: ScaleTranslate) -> TilewarpResult<Self> {
        validate_raster(source)?;
        window.validate()?;
        Ok(Self { source, window })
    }

    pub fn window(&self) -> ScaleTranslate {
        self.window
    }

    /// Interpolated color at plane point `z`.
    pub fn sample(&self, z: PlanePoint) -> DomainResult<P> {
        let (x, y) = self.window.plane_to_pixel(z);
        self.sample_pixel(x, y)
    }

    /// Interpolated color at raw pixel coordinates (any real values).
    ///
    /// Each axis is first reduced modulo the raster size, which is exact for every finite
    /// value. Lerps vertically in both columns, then horizontally between them.
    pub fn sample_pixel(&self, x: f64, y: f64) -> DomainResult<P> {
        if !x.is_finite() || !y.is_finite() {
            return Err(DomainError::InvalidDomainInput);
        }
        let x = x.rem_euclid(f64::from(self.source.width()));
        let y = y.rem_euclid(f64::from(self.source.height()));
        let (x0, y0) = (x.floor() as i64, y.floor() as i64);
        let (rx, ry) = (fract_pos(x), fract_pos(y));

        let left = lerp_pixel(self.texel(x0, y0), self.texel(x0, y0 + 1), ry);
        let right = lerp_pixel(self.texel(x0 + 1, y0), self.texel(x0 + 1, y0 + 1), ry);
        Ok(lerp_pixel(left, right, rx))
    }

    /// Source pixel at wrapped lattice position.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> P {
        let ix = wrap_index(x, self.source.width());
        let iy = wrap_index(y, self.source.height());
        *self.source.get_pixel(ix, iy)
    }
}

#[inline]
fn lerp_pixel<P>(lower: P, upper: P, r: f64) -> P
where
    P: image::Pixel<Subpixel = u8>,
{
    lower.map2(&upper, |l, u| lerp_u8(l, u, r))
}

#[cfg(test)]
#[path = "../../tests/unit/sample/tiled.rs"]
mod tests;
