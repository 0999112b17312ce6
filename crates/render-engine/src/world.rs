//! In-memory Typst world for quote compilation
//!
//! Quote markup is self-contained (no includes, no image assets), so the
//! world mounts exactly one source file and serves fonts from the embedded
//! cache. Nothing touches the real filesystem.

use chrono::{DateTime, Datelike, Timelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

use crate::fonts::{global_font_cache, FontCache};

pub struct QuoteWorld {
    source: Source,
    font_cache: &'static FontCache,
    /// Capture timestamp, fixed at construction for deterministic output
    time: DateTime<Utc>,
    library: LazyHash<Library>,
}

impl QuoteWorld {
    pub fn new(markup: String) -> Self {
        let id = FileId::new(None, VirtualPath::new("/quote.typ"));
        Self {
            source: Source::new(id, markup),
            font_cache: global_font_cache(),
            time: Utc::now(),
            library: LazyHash::new(Library::builder().build()),
        }
    }
}

impl World for QuoteWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        static BOOK: std::sync::OnceLock<LazyHash<FontBook>> = std::sync::OnceLock::new();
        BOOK.get_or_init(|| LazyHash::new(self.font_cache.book().clone()))
    }

    fn main(&self) -> FileId {
        self.source.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.source.id() {
            Ok(self.source.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        // No binary assets are mounted
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.font_cache.font(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let adjusted = self.time + chrono::Duration::hours(offset.unwrap_or(0));
        Datetime::from_ymd_hms(
            adjusted.year(),
            adjusted.month() as u8,
            adjusted.day() as u8,
            adjusted.hour() as u8,
            adjusted.minute() as u8,
            adjusted.second() as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_the_mounted_source() {
        let world = QuoteWorld::new("Hello, World!".to_string());
        let main = world.main();
        let source = world.source(main).unwrap();
        assert!(source.text().contains("Hello"));
    }

    #[test]
    fn unknown_files_are_not_found() {
        let world = QuoteWorld::new("test".to_string());
        let other = FileId::new(None, VirtualPath::new("/other.typ"));
        assert!(world.source(other).is_err());
        assert!(world.file(other).is_err());
    }
}
