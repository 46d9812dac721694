use crate::foundation::error::{TilewarpError, TilewarpResult};

pub use num_complex::Complex64;

/// A location in the continuous, normalized complex plane.
pub type PlanePoint = Complex64;

/// Immutable pixel grid, origin top-left, row-major.
///
/// Any 8-bit `image` pixel type works; its channel count is carried through sampling unchanged.
pub type Raster<P> = image::ImageBuffer<P, Vec<u8>>;

/// Output raster dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub fn new(width: u32, height: u32) -> TilewarpResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(self) -> TilewarpResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TilewarpError::validation(
                "output width/height must be > 0",
            ));
        }
        Ok(())
    }

    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

pub(crate) fn validate_raster<P>(raster: &Raster<P>) -> TilewarpResult<()>
where
    P: image::Pixel<Subpixel = u8>,
{
    let (w, h) = raster.dimensions();
    if w == 0 || h == 0 {
        return Err(TilewarpError::validation(
            "source raster width/height must be > 0",
        ));
    }
    Ok(())
}

/// Pixel with every channel set to zero, substituted where a map or sample fails.
pub fn fallback_pixel<P>() -> P
where
    P: image::Pixel<Subpixel = u8>,
{
    const ZEROS: [u8; 4] = [0; 4];
    *P::from_slice(&ZEROS[..usize::from(P::CHANNEL_COUNT)])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
