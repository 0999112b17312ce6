//! Markup capture
//!
//! Compiles quote markup in a [`QuoteWorld`] and renders the single
//! auto-height page into an RGBA pixel buffer.

use crate::error::RenderError;
use crate::world::QuoteWorld;
use crate::DEFAULT_SCALE;

/// A captured surface: tightly packed RGBA, row-major, no padding.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width_px: u32,
    pub height_px: u32,
    pub rgba: Vec<u8>,
}

impl Raster {
    /// Byte length a well-formed buffer must have.
    pub fn expected_len(&self) -> usize {
        self.width_px as usize * self.height_px as usize * 4
    }
}

/// Seam between layout capture and everything downstream. Pagination and
/// PDF assembly only need pixel dimensions and bytes, so tests substitute
/// a fake that returns a fixed-size buffer.
pub trait Rasterizer: Send + Sync {
    fn capture(&self, markup: &str) -> Result<Raster, RenderError>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn capture(&self, markup: &str) -> Result<Raster, RenderError> {
        (**self).capture(markup)
    }
}

/// Production rasterizer: in-memory Typst compile, then a raster render of
/// the first (and only) page.
#[derive(Debug, Clone, Copy)]
pub struct TypstRasterizer {
    /// Capture scale. 2.0 doubles the pixel density over the logical layout.
    pub pixels_per_point: f32,
}

impl Default for TypstRasterizer {
    fn default() -> Self {
        Self {
            pixels_per_point: DEFAULT_SCALE,
        }
    }
}

impl TypstRasterizer {
    pub fn new(pixels_per_point: f32) -> Self {
        Self { pixels_per_point }
    }
}

impl Rasterizer for TypstRasterizer {
    fn capture(&self, markup: &str) -> Result<Raster, RenderError> {
        let world = QuoteWorld::new(markup.to_string());

        let warned = typst::compile(&world);
        let document = warned.output.map_err(|diagnostics| {
            let joined = diagnostics
                .iter()
                .map(|d| d.message.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            RenderError::Compile(joined)
        })?;

        for warning in &warned.warnings {
            tracing::warn!(message = %warning.message, "markup compile warning");
        }

        let page = document.pages.first().ok_or(RenderError::NoPages)?;
        let pixmap = typst_render::render(page, self.pixels_per_point);

        let (width_px, height_px) = (pixmap.width(), pixmap.height());
        if width_px == 0 || height_px == 0 {
            return Err(RenderError::ZeroSize {
                width: width_px,
                height: height_px,
            });
        }

        let raster = Raster {
            width_px,
            height_px,
            rgba: pixmap.data().to_vec(),
        };
        if raster.rgba.len() != raster.expected_len() {
            return Err(RenderError::EmptyCapture);
        }

        tracing::debug!(width_px, height_px, "captured quote surface");
        Ok(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_plain_markup() {
        let rasterizer = TypstRasterizer::default();
        let raster = rasterizer
            .capture("#set page(width: 800pt, height: auto, margin: 40pt)\nHello")
            .unwrap();
        assert!(raster.width_px > 0);
        assert!(raster.height_px > 0);
        assert_eq!(raster.rgba.len(), raster.expected_len());
    }

    #[test]
    fn scale_doubles_pixel_width() {
        let markup = "#set page(width: 800pt, height: auto, margin: 40pt)\nHello";
        let at_one = TypstRasterizer::new(1.0).capture(markup).unwrap();
        let at_two = TypstRasterizer::new(2.0).capture(markup).unwrap();
        assert_eq!(at_two.width_px, at_one.width_px * 2);
    }

    #[test]
    fn compile_errors_are_reported() {
        let rasterizer = TypstRasterizer::default();
        let err = rasterizer.capture("#unknown-function()").unwrap_err();
        assert!(matches!(err, RenderError::Compile(_)));
    }
}
