//! Complex maps used as the inverse geometric transform of a render.

use std::f64::consts::PI;

use crate::foundation::core::{Complex64, PlanePoint};
use crate::foundation::error::{
    DomainError, DomainResult, TilewarpError, TilewarpResult, ensure_finite,
};

/// A function `C -> C` that may be undefined at some points.
///
/// Implementations must return `Err` instead of a NaN or infinite value.
pub trait ComplexMap: Send + Sync {
    /// Evaluate the map at `z`.
    fn evaluate(&self, z: PlanePoint) -> DomainResult<PlanePoint>;
}

impl<M: ComplexMap + ?Sized> ComplexMap for &M {
    fn evaluate(&self, z: PlanePoint) -> DomainResult<PlanePoint> {
        (**self).evaluate(z)
    }
}

impl<M: ComplexMap + ?Sized> ComplexMap for Box<M> {
    fn evaluate(&self, z: PlanePoint) -> DomainResult<PlanePoint> {
        (**self).evaluate(z)
    }
}

/// Adapter for plain closures.
#[derive(Clone, Copy, Debug)]
pub struct FnMap<F>(pub F);

impl<F> ComplexMap for FnMap<F>
where
    F: Fn(PlanePoint) -> DomainResult<PlanePoint> + Send + Sync,
{
    fn evaluate(&self, z: PlanePoint) -> DomainResult<PlanePoint> {
        ensure_finite((self.0)(z)?)
    }
}

/// `z -> z`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Identity;

impl ComplexMap for Identity {
    fn evaluate(&self, z: PlanePoint) -> DomainResult<PlanePoint> {
        ensure_finite(z)
    }
}

#[inline]
fn is_zero(z: Complex64) -> bool {
    z.re == 0.0 && z.im == 0.0
}

#[inline]
fn checked_div(num: Complex64, den: Complex64) -> DomainResult<Complex64> {
    if is_zero(den) {
        return Err(DomainError::MapSingularity);
    }
    ensure_finite(num / den)
}

/// Mobius transformation `(a z + b) / (c z + d)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mobius {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

impl Mobius {
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { a, b, c, d }
    }

    pub fn identity() -> Self {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        Self::new(one, zero, zero, one)
    }

    /// `a d - b c`; the map is invertible iff this is non-zero.
    pub fn determinant(&self) -> Complex64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse map built from the same coefficients.
    pub fn inverse(&self) -> MobiusInverse {
        MobiusInverse::new(self.a, self.b, self.c, self.d)
    }
}

impl ComplexMap for Mobius {
    fn evaluate(&self, z: PlanePoint) -> DomainResult<PlanePoint> {
        checked_div(self.a * z + self.b, self.c * z + self.d)
    }
}

/// Inverse of [`Mobius`] with the same coefficients: `(d z - b) / (-c z + a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobiusInverse {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

impl MobiusInverse {
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { a, b, c, d }
    }
}

impl ComplexMap for MobiusInverse {
    fn evaluate(&self, z: PlanePoint) -> DomainResult<PlanePoint> {
        checked_div(self.d * z - self.b, -self.c * z + self.a)
    }
}

/// Preimage under a spiral map for a `width x height` region.
///
/// Computes `log(z) * e^(i phi) * diagonal / 2pi` with `phi = atan(height / width)`. Forward
/// `exp` sends vertical lines to circles, so the image diagonal is scaled to `2pi` and turned
/// upright. Undefined at `z = 0`. The principal logarithm jumps across the negative real
/// axis, which shows up as a visible seam in the render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralInverse {
    rotation: Complex64,
    radial_scale: f64,
}

impl SpiralInverse {
    pub fn new(height: u32, width: u32) -> TilewarpResult<Self> {
        if height == 0 || width == 0 {
            return Err(TilewarpError::validation(
                "spiral height/width must be > 0",
            ));
        }
        let (h, w) = (f64::from(height), f64::from(width));
        let diagonal = h.hypot(w);
        let phi = (h / w).atan();
        Ok(Self {
            rotation: Complex64::from_polar(1.0, phi),
            radial_scale: diagonal / (2.0 * PI),
        })
    }

    /// Spiral sized to a raster's own dimensions.
    pub fn for_raster<P>(raster: &crate::Raster<P>) -> TilewarpResult<Self>
    where
        P: image::Pixel<Subpixel = u8>,
    {
        Self::new(raster.height(), raster.width())
    }
}

impl ComplexMap for SpiralInverse {
    fn evaluate(&self, z: PlanePoint) -> DomainResult<PlanePoint> {
        if is_zero(z) {
            return Err(DomainError::MapSingularity);
        }
        ensure_finite(z.ln() * self.rotation * self.radial_scale)
    }
}

/// Serializable map selection, e.g. `{"kind": "mobius", "a": [1, 0], ...}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapSpec {
    Identity,
    Mobius {
        a: Complex64,
        b: Complex64,
        c: Complex64,
        d: Complex64,
    },
    MobiusInverse {
        a: Complex64,
        b: Complex64,
        c: Complex64,
        d: Complex64,
    },
    SpiralInverse {
        height: u32,
        width: u32,
    },
}

impl MapSpec {
    pub fn validate(&self) -> TilewarpResult<()> {
        match self {
            Self::Identity => Ok(()),
            Self::Mobius { a, b, c, d } | Self::MobiusInverse { a, b, c, d } => {
                for (name, v) in [("a", a), ("b", b), ("c", c), ("d", d)] {
                    if !v.re.is_finite() || !v.im.is_finite() {
                        return Err(TilewarpError::validation(format!(
                            "mobius coefficient '{name}' must be finite"
                        )));
                    }
                }
                Ok(())
            }
            Self::SpiralInverse { height, width } => {
                SpiralInverse::new(*height, *width).map(|_| ())
            }
        }
    }

    /// Validate and instantiate the selected map.
    pub fn build(&self) -> TilewarpResult<Box<dyn ComplexMap>> {
        self.validate()?;
        Ok(match *self {
            Self::Identity => Box::new(Identity),
            Self::Mobius { a, b, c, d } => {
                let m = Mobius::new(a, b, c, d);
                if is_zero(m.determinant()) {
                    tracing::warn!("mobius coefficients are degenerate (ad - bc = 0)");
                }
                Box::new(m)
            }
            Self::MobiusInverse { a, b, c, d } => Box::new(MobiusInverse::new(a, b, c, d)),
            Self::SpiralInverse { height, width } => Box::new(SpiralInverse::new(height, width)?),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/non_linear.rs"]
mod tests;
