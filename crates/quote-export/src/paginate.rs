//! Page slicing math
//!
//! The captured surface is one tall image at a fixed aspect ratio. Mapping it
//! onto paper is pure arithmetic in millimetres: the image is scaled to the
//! page width, and the resulting height is walked in page-height steps until
//! nothing remains.

/// Paper dimensions, in millimetres. Defaults to portrait A4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
        }
    }
}

/// The slicing plan for one capture on one paper size.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub geometry: PageGeometry,
    /// Image width after scaling, always equal to the page width.
    pub image_width_mm: f64,
    /// Image height after scaling, preserving the capture's aspect ratio.
    pub image_height_mm: f64,
    pub page_count: usize,
}

impl Pagination {
    /// Plan the slicing of a `width_px` x `height_px` capture.
    ///
    /// A capture whose scaled height is an exact multiple of the page height
    /// fills its last page with no blank trailing page.
    pub fn plan(width_px: u32, height_px: u32, geometry: PageGeometry) -> Self {
        debug_assert!(width_px > 0 && height_px > 0);

        let image_width_mm = geometry.width_mm;
        let image_height_mm = geometry.width_mm * height_px as f64 / width_px as f64;

        let mut page_count = 0;
        let mut remaining = image_height_mm;
        while remaining > 0.0 {
            page_count += 1;
            remaining -= geometry.height_mm;
        }

        Self {
            geometry,
            image_width_mm,
            image_height_mm,
            page_count,
        }
    }

    /// Vertical offset of page `index` into the image, in millimetres from
    /// the image top.
    pub fn offset_mm(&self, index: usize) -> f64 {
        index as f64 * self.geometry.height_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn single_page_when_image_fits() {
        let p = Pagination::plan(1600, 1000, PageGeometry::default());
        // 210 * 1000/1600 = 131.25mm, under one A4 page
        assert_eq!(p.page_count, 1);
        assert!((p.image_height_mm - 131.25).abs() < 1e-9);
    }

    #[test]
    fn tall_image_spans_pages() {
        let p = Pagination::plan(1600, 8000, PageGeometry::default());
        // 210 * 8000/1600 = 1050mm = 3 pages of 297 + 159 remainder
        assert_eq!(p.page_count, 4);
    }

    #[test]
    fn exact_multiple_has_no_trailing_blank_page() {
        // image_height_mm = 210 * h/w; pick h/w so it is exactly 2 * 297
        // 594 / 210 = 2.82857..; use w=2100, h=5940 -> 210*5940/2100 = 594
        let p = Pagination::plan(2100, 5940, PageGeometry::default());
        assert!((p.image_height_mm - 594.0).abs() < 1e-9);
        assert_eq!(p.page_count, 2);
    }

    #[test]
    fn one_pixel_past_the_boundary_adds_a_page() {
        let p = Pagination::plan(2100, 5941, PageGeometry::default());
        assert_eq!(p.page_count, 3);
    }

    #[test]
    fn offsets_step_by_page_height() {
        let p = Pagination::plan(1600, 8000, PageGeometry::default());
        assert_eq!(p.offset_mm(0), 0.0);
        assert_eq!(p.offset_mm(1), 297.0);
        assert_eq!(p.offset_mm(3), 891.0);
    }

    proptest! {
        #[test]
        fn page_count_matches_ceiling(width in 1u32..6000, height in 1u32..200_000) {
            let geometry = PageGeometry::default();
            let p = Pagination::plan(width, height, geometry);
            let expected = (p.image_height_mm / geometry.height_mm).ceil().max(1.0) as usize;
            prop_assert_eq!(p.page_count, expected);
        }

        #[test]
        fn pages_cover_the_whole_image(width in 1u32..6000, height in 1u32..200_000) {
            let geometry = PageGeometry::default();
            let p = Pagination::plan(width, height, geometry);
            prop_assert!(p.page_count >= 1);
            // Last page starts before the image ends, and all pages together
            // reach past the end.
            let last_start = p.offset_mm(p.page_count - 1);
            prop_assert!(last_start < p.image_height_mm);
            prop_assert!(last_start + geometry.height_mm >= p.image_height_mm);
        }
    }
}
