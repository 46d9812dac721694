use num_complex::Complex64;

/// Convenience result type used by configuration and render entry points.
pub type TilewarpResult<T> = Result<T, TilewarpError>;

/// Hard errors. These abort a render before any pixel is written.
#[derive(thiserror::Error, Debug)]
pub enum TilewarpError {
    /// Invalid caller-provided configuration (scale, sizes, thread counts).
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal failure while scheduling or assembling a render.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TilewarpError {
    /// Build a [`TilewarpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TilewarpError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TilewarpError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Result of evaluating a map or sampling at a single point.
pub type DomainResult<T> = Result<T, DomainError>;

/// Per-pixel failures. The renderer swaps these for the fallback pixel.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// The map is undefined here (zero denominator, logarithm of zero).
    #[error("map singularity")]
    MapSingularity,

    /// An intermediate value was NaN or infinite.
    #[error("non-finite value in map domain")]
    InvalidDomainInput,
}

/// Pass `z` through if both parts are finite.
#[inline]
pub fn ensure_finite(z: Complex64) -> DomainResult<Complex64> {
    if z.re.is_finite() && z.im.is_finite() {
        Ok(z)
    } else {
        Err(DomainError::InvalidDomainInput)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
