//! Embedded font cache
//!
//! Fonts come from the `typst-assets` bundle so captures are reproducible
//! across machines. The cache is loaded once per process and shared between
//! renders.

use std::sync::OnceLock;

use typst::foundations::Bytes;
use typst::text::{Font, FontBook};

static FONT_CACHE: OnceLock<FontCache> = OnceLock::new();

/// Get the process-wide font cache, loading it on first use.
pub fn global_font_cache() -> &'static FontCache {
    FONT_CACHE.get_or_init(FontCache::new)
}

#[derive(Debug)]
pub struct FontCache {
    book: FontBook,
    fonts: Vec<Font>,
}

impl FontCache {
    pub fn new() -> Self {
        let mut book = FontBook::new();
        let mut fonts = Vec::new();

        for data in typst_assets::fonts() {
            let buffer = Bytes::from_static(data);
            for font in Font::iter(buffer) {
                book.push(font.info().clone());
                fonts.push(font);
            }
        }

        tracing::debug!("font cache initialized with {} fonts", fonts.len());

        Self { book, fonts }
    }

    pub fn book(&self) -> &FontBook {
        &self.book
    }

    pub fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fonts_are_present() {
        let cache = FontCache::new();
        assert!(!cache.is_empty(), "font cache should not be empty");
    }

    #[test]
    fn global_cache_is_a_singleton() {
        let a = global_font_cache();
        let b = global_font_cache();
        assert!(std::ptr::eq(a, b));
    }
}
