use crate::{
    foundation::core::{Complex64, OutputSize},
    foundation::error::{TilewarpError, TilewarpResult},
    transform::affine::ScaleTranslate,
    transform::non_linear::MapSpec,
};

/// Threading controls for pixel and frame rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderThreading {
    /// Render rows (or frames) on a rayon pool when `true`.
    #[serde(default)]
    pub parallel: bool,
    /// Optional explicit worker thread count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

/// Output framing and scheduling for a render.
///
/// `scale` and `translate` default to [`ScaleTranslate::centered`] for the output size.
/// `tile_window` defaults to the sampler's own window ([`ScaleTranslate::pixel_extent`] of the
/// source).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate: Option<Complex64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_window: Option<ScaleTranslate>,
    #[serde(default)]
    pub threading: RenderThreading,
}

impl RenderSettings {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: None,
            translate: None,
            tile_window: None,
            threading: RenderThreading::default(),
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_translate(mut self, translate: Complex64) -> Self {
        self.translate = Some(translate);
        self
    }

    pub fn with_tile_window(mut self, window: ScaleTranslate) -> Self {
        self.tile_window = Some(window);
        self
    }

    pub fn with_threading(mut self, threading: RenderThreading) -> Self {
        self.threading = threading;
        self
    }

    pub fn output_size(&self) -> TilewarpResult<OutputSize> {
        OutputSize::new(self.width, self.height)
    }

    /// Resolved pixel-to-plane transform for the output grid.
    pub fn output_window(&self) -> TilewarpResult<ScaleTranslate> {
        ScaleTranslate::centered_with(self.width, self.height, self.scale, self.translate)
    }

    pub fn validate(&self) -> TilewarpResult<()> {
        self.output_size()?;
        self.output_window()?;
        if let Some(window) = &self.tile_window {
            window.validate()?;
        }
        if self.threading.threads == Some(0) {
            return Err(TilewarpError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Settings plus map selection, loadable from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    pub settings: RenderSettings,
    pub map: MapSpec,
}

impl RenderConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(s: &str) -> TilewarpResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| TilewarpError::serde(format!("parse render config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> TilewarpResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TilewarpError::serde(format!("write render config: {e}")))
    }

    pub fn validate(&self) -> TilewarpResult<()> {
        self.settings.validate()?;
        self.map.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
