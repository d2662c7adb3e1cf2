use crate::surface::ImageSurface;

/// Default device-pixel multiplier, high enough for sharp page images.
pub const DEFAULT_RENDER_SCALE: f32 = 2.0;

/// Layout constraints handed to the rendering collaborator: a fixed content
/// width in output-medium units and a pixel-scale multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConstraints {
    pub content_width_units: f64,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct RenderError(pub String);

/// Rendering collaborator: rasterizes cleaned markup at the given
/// constraints. Acquiring the raster is the pipeline's only suspension
/// point; the collaborator may fail with a generic render error.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    async fn render(
        &self,
        markup: &str,
        constraints: RenderConstraints,
    ) -> Result<ImageSurface, RenderError>;
}
