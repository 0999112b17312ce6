//! Off-screen quote rendering
//!
//! This crate turns a [`quote_model::Quote`] into a raster image, in two
//! decoupled halves:
//!
//! - a pure markup builder ([`markup::quote_markup`]) that lays the quote out
//!   at a fixed logical width, independent of any viewport,
//! - a rasterizer ([`TypstRasterizer`]) that compiles the markup in an
//!   in-memory Typst world and captures it into an RGBA pixel buffer.
//!
//! The [`Rasterizer`] trait is the seam between them: callers that only care
//! about pagination can substitute a fake returning a fixed-size buffer.

pub mod error;
pub mod fonts;
pub mod markup;
pub mod raster;
pub mod world;

pub use error::RenderError;
pub use markup::quote_markup;
pub use raster::{Raster, Rasterizer, TypstRasterizer};
pub use world::QuoteWorld;

/// Logical width of the rendered surface, in points. Fixed so output does not
/// depend on the caller's environment.
pub const SURFACE_WIDTH_PT: f64 = 800.0;

/// Default capture scale (pixels per point), chosen for print resolution.
pub const DEFAULT_SCALE: f32 = 2.0;
