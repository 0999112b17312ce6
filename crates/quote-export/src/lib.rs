//! Paginated PDF export
//!
//! A quote is laid out once as a single tall surface, captured to pixels,
//! sliced into A4 pages, and assembled into a PDF with the capture embedded
//! once as a shared image XObject.
//!
//! The pipeline is deliberately staged so each step is testable on its own:
//! pagination is pure arithmetic, assembly takes any pixel buffer, and the
//! [`Exporter`] wires them behind a [`render_engine::Rasterizer`].

pub mod assemble;
pub mod error;
pub mod exporter;
pub mod paginate;

pub use assemble::assemble_pdf;
pub use error::ExportError;
pub use exporter::{
    export_with_timeout, ExportedQuote, Exporter, DEFAULT_EXPORT_TIMEOUT_MS,
};
pub use paginate::{PageGeometry, Pagination};
