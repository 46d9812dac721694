//! Affine bridge between pixel grids and the normalized complex plane.

use crate::foundation::core::{Complex64, PlanePoint};
use crate::foundation::error::{TilewarpError, TilewarpResult};

/// Positive scale plus complex translation.
///
/// `plane = (pixel - translate) / scale` and `pixel = plane * scale + translate`, so
/// `translate` is the pixel position of the plane origin and `scale` is the number of
/// pixels per plane unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleTranslate {
    pub scale: f64,
    pub translate: Complex64,
}

impl ScaleTranslate {
    /// Build a transform, rejecting non-finite values and `scale <= 0`.
    pub fn new(scale: f64, translate: Complex64) -> TilewarpResult<Self> {
        let st = Self { scale, translate };
        st.validate()?;
        Ok(st)
    }

    pub fn validate(&self) -> TilewarpResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TilewarpError::validation(format!(
                "scale must be finite and > 0 (got {})",
                self.scale
            )));
        }
        if !self.translate.re.is_finite() || !self.translate.im.is_finite() {
            return Err(TilewarpError::validation("translate must be finite"));
        }
        Ok(())
    }

    /// Default output framing for a `width x height` grid: one plane unit per shorter side,
    /// grid centre at the plane origin.
    pub fn centered(width: u32, height: u32) -> Self {
        Self {
            scale: f64::from(width.min(height)),
            translate: Complex64::new(0.5 * f64::from(width), 0.5 * f64::from(height)),
        }
    }

    /// Resolve optional overrides against [`ScaleTranslate::centered`].
    pub fn centered_with(
        width: u32,
        height: u32,
        scale: Option<f64>,
        translate: Option<Complex64>,
    ) -> TilewarpResult<Self> {
        let base = Self::centered(width, height);
        Self::new(
            scale.unwrap_or(base.scale),
            translate.unwrap_or(base.translate),
        )
    }

    /// Framing by the grid's own pixel extent: origin at the top-left pixel, one plane unit
    /// per shorter side.
    pub fn pixel_extent(width: u32, height: u32) -> Self {
        Self {
            scale: f64::from(width.min(height)),
            translate: Complex64::new(0.0, 0.0),
        }
    }

    #[inline]
    pub fn pixel_to_plane(&self, x: f64, y: f64) -> PlanePoint {
        (Complex64::new(x, y) - self.translate) / self.scale
    }

    #[inline]
    pub fn plane_to_pixel(&self, z: PlanePoint) -> (f64, f64) {
        let p = z * self.scale + self.translate;
        (p.re, p.im)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
