//! Tilewarp renders conformally warped copies of an image.
//!
//! The source raster is treated as an infinite periodic tiling of itself and sampled with
//! bilinear interpolation at the preimage of every output pixel under a complex map.
//!
//! # Pipeline overview
//!
//! 1. **Frame**: output pixel `(x, y)` -> plane point via the output [`ScaleTranslate`]
//! 2. **Map**: plane point -> preimage via a [`ComplexMap`] (Mobius, inverse Mobius, spiral, ...)
//! 3. **Sample**: preimage -> color via [`TiledSampler`] (modular wraparound + bilinear lerp)
//! 4. **Fallback**: singular or non-finite points get an all-zero pixel instead of an error
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO**: decoding and encoding stay with the caller; rasters are `image` buffers.
//! - **Deterministic**: sequential and parallel renders are byte-identical.
#![forbid(unsafe_code)]

mod foundation;
mod render;
mod sample;

/// Pixel/plane framing and complex maps.
pub mod transform;

pub use foundation::core::{Complex64, OutputSize, PlanePoint, Raster, fallback_pixel};
pub use foundation::error::{
    DomainError, DomainResult, TilewarpError, TilewarpResult, ensure_finite,
};
pub use render::pipeline::{
    RenderStats, render, render_frames, render_frames_with_stats, render_with_stats,
};
pub use render::settings::{RenderConfig, RenderSettings, RenderThreading};
pub use sample::tiled::TiledSampler;
pub use transform::affine::ScaleTranslate;
pub use transform::non_linear::{
    ComplexMap, FnMap, Identity, MapSpec, Mobius, MobiusInverse, SpiralInverse,
};
