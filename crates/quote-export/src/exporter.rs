//! The export pipeline
//!
//! Capture, paginate, assemble, name. Rendering is CPU-bound, so the async
//! entry point pushes the whole pipeline onto a blocking thread and races it
//! against a deadline.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use quote_model::{quote_filename, CompanyInfo, Quote};
use render_engine::{quote_markup, Rasterizer, TypstRasterizer};

use crate::assemble::assemble_pdf;
use crate::error::ExportError;
use crate::paginate::{PageGeometry, Pagination};

/// Deadline for a full export when the caller does not set one.
pub const DEFAULT_EXPORT_TIMEOUT_MS: u64 = 20_000;

/// A finished export, ready to stream as a download or attach to an email.
#[derive(Debug, Clone)]
pub struct ExportedQuote {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl ExportedQuote {
    /// Package the document as an email attachment.
    pub fn attachment(&self) -> quote_mail::Attachment {
        quote_mail::Attachment::pdf(self.filename.clone(), BASE64.encode(&self.bytes))
    }
}

/// Turns quotes into paginated PDFs. Generic over the rasterizer so tests
/// can drive the pagination and assembly stages with synthetic captures.
pub struct Exporter<R> {
    rasterizer: R,
    company: CompanyInfo,
    geometry: PageGeometry,
}

impl Exporter<TypstRasterizer> {
    pub fn with_defaults(company: CompanyInfo) -> Self {
        Self::new(TypstRasterizer::default(), company)
    }
}

impl<R: Rasterizer> Exporter<R> {
    pub fn new(rasterizer: R, company: CompanyInfo) -> Self {
        Self {
            rasterizer,
            company,
            geometry: PageGeometry::default(),
        }
    }

    pub fn export(&self, quote: &Quote) -> Result<ExportedQuote, ExportError> {
        let markup = quote_markup(quote, &self.company);
        let raster = self.rasterizer.capture(&markup)?;
        let pagination = Pagination::plan(raster.width_px, raster.height_px, self.geometry);
        let bytes = assemble_pdf(&raster, &pagination)?;
        let filename = quote_filename(&quote.quote_number, &quote.customer.name);

        tracing::info!(
            quote_number = %quote.quote_number,
            pages = pagination.page_count,
            size = bytes.len(),
            "exported quote"
        );

        Ok(ExportedQuote {
            filename,
            bytes,
            page_count: pagination.page_count,
        })
    }
}

/// Run an export on the blocking pool with a deadline.
pub async fn export_with_timeout<R>(
    exporter: Arc<Exporter<R>>,
    quote: Quote,
    timeout_ms: u64,
) -> Result<ExportedQuote, ExportError>
where
    R: Rasterizer + 'static,
{
    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || exporter.export(&quote)),
    )
    .await;

    match result {
        Ok(Ok(exported)) => exported,
        Ok(Err(join_error)) => Err(ExportError::CaptureFailed(format!(
            "export task panicked: {join_error}"
        ))),
        Err(_elapsed) => Err(ExportError::Timeout(timeout_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quote_model::{Customer, DiscountKind, LineItem};
    use render_engine::{Raster, RenderError};

    struct FakeRasterizer {
        width_px: u32,
        height_px: u32,
        delay: Option<Duration>,
    }

    impl FakeRasterizer {
        fn sized(width_px: u32, height_px: u32) -> Self {
            Self {
                width_px,
                height_px,
                delay: None,
            }
        }
    }

    impl Rasterizer for FakeRasterizer {
        fn capture(&self, _markup: &str) -> Result<Raster, RenderError> {
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            Ok(Raster {
                width_px: self.width_px,
                height_px: self.height_px,
                rgba: vec![0xff; (self.width_px * self.height_px * 4) as usize],
            })
        }
    }

    fn sample_quote() -> Quote {
        Quote::draft(
            "QUO-2025-0007",
            Customer {
                name: "Jane O'Brien & Co.".into(),
                email: "jane@example.com".into(),
                phone: String::new(),
                address: String::new(),
                postcode: String::new(),
            },
            vec![LineItem::new("s", "Skimming", "per room", 1, 150.0)],
            0.0,
            DiscountKind::Percentage,
            "",
        )
    }

    #[test]
    fn short_quote_exports_as_a_single_page() {
        let exporter = Exporter::new(FakeRasterizer::sized(1600, 1000), CompanyInfo::default());
        let exported = exporter.export(&sample_quote()).unwrap();

        assert_eq!(exported.page_count, 1);
        assert!(exported.bytes.starts_with(b"%PDF-"));
        assert_eq!(exported.filename, "Quote-QUO-2025-0007-Jane_O_Brien___Co..pdf");
    }

    #[test]
    fn tall_capture_exports_multiple_pages() {
        let exporter = Exporter::new(FakeRasterizer::sized(1600, 16000), CompanyInfo::default());
        let exported = exporter.export(&sample_quote()).unwrap();

        // 210 * 16000/1600 = 2100mm over 297mm pages
        assert_eq!(exported.page_count, 8);
    }

    #[test]
    fn attachment_carries_base64_of_the_document() {
        let exporter = Exporter::new(FakeRasterizer::sized(800, 600), CompanyInfo::default());
        let exported = exporter.export(&sample_quote()).unwrap();

        let attachment = exported.attachment();
        assert_eq!(attachment.filename, exported.filename);
        assert_eq!(BASE64.decode(&attachment.content).unwrap(), exported.bytes);
    }

    #[tokio::test]
    async fn slow_export_times_out() {
        let exporter = Arc::new(Exporter::new(
            FakeRasterizer {
                width_px: 800,
                height_px: 600,
                delay: Some(Duration::from_millis(500)),
            },
            CompanyInfo::default(),
        ));

        let err = export_with_timeout(exporter, sample_quote(), 20)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Timeout(20)));
    }

    #[tokio::test]
    async fn fast_export_beats_the_deadline() {
        let exporter = Arc::new(Exporter::new(
            FakeRasterizer::sized(800, 600),
            CompanyInfo::default(),
        ));

        let exported = export_with_timeout(exporter, sample_quote(), DEFAULT_EXPORT_TIMEOUT_MS)
            .await
            .unwrap();
        assert_eq!(exported.page_count, 1);
    }
}
