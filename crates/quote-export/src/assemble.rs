//! PDF assembly
//!
//! Builds the output document directly as a lopdf object graph. The capture
//! is stored once as a flate-compressed DeviceRGB image XObject; every page
//! paints the same XObject shifted up by its offset, so only the slice that
//! falls inside the page box is visible.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use render_engine::Raster;

use crate::error::ExportError;
use crate::paginate::Pagination;

const MM_TO_PT: f64 = 72.0 / 25.4;

/// Assemble the paginated PDF for a capture.
pub fn assemble_pdf(raster: &Raster, pagination: &Pagination) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");

    let image_id = doc.add_object(image_xobject(raster)?);

    let page_w_pt = pagination.geometry.width_mm * MM_TO_PT;
    let page_h_pt = pagination.geometry.height_mm * MM_TO_PT;
    let image_h_pt = pagination.image_height_mm * MM_TO_PT;

    let resources = dictionary! {
        "XObject" => dictionary! { "Im0" => Object::Reference(image_id) },
    };
    let resources_id = doc.add_object(resources);

    let pages_id = doc.new_object_id();
    let mut kids = Vec::with_capacity(pagination.page_count);

    for index in 0..pagination.page_count {
        // PDF origin is bottom-left. Page 0 aligns the image top with the
        // page top; each later page lifts the image by one page height.
        let y_pt = page_h_pt - image_h_pt + index as f64 * page_h_pt;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(page_w_pt as f32),
                        Object::Real(0.0),
                        Object::Real(0.0),
                        Object::Real(image_h_pt as f32),
                        Object::Real(0.0),
                        Object::Real(y_pt as f32),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(page_w_pt as f32),
                Object::Real(page_h_pt as f32),
            ],
            "Resources" => Object::Reference(resources_id),
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pagination.page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
    Ok(bytes)
}

/// Flate-compressed DeviceRGB image stream. Alpha is dropped: the capture is
/// rendered on an opaque white fill.
fn image_xobject(raster: &Raster) -> Result<Stream, ExportError> {
    let mut rgb = Vec::with_capacity(raster.rgba.len() / 4 * 3);
    for pixel in raster.rgba.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&rgb)
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => raster.width_px as i64,
        "Height" => raster.height_px as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, compressed).with_compression(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paginate::PageGeometry;
    use lopdf::Document;

    fn solid_raster(width_px: u32, height_px: u32) -> Raster {
        Raster {
            width_px,
            height_px,
            rgba: vec![0xff; (width_px * height_px * 4) as usize],
        }
    }

    fn page_count_of(bytes: &[u8]) -> usize {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages().len()
    }

    #[test]
    fn single_page_document() {
        let raster = solid_raster(1600, 1000);
        let pagination = Pagination::plan(1600, 1000, PageGeometry::default());
        let bytes = assemble_pdf(&raster, &pagination).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(page_count_of(&bytes), 1);
    }

    #[test]
    fn multi_page_document_matches_plan() {
        let raster = solid_raster(800, 8000);
        let pagination = Pagination::plan(800, 8000, PageGeometry::default());
        let bytes = assemble_pdf(&raster, &pagination).unwrap();

        assert!(pagination.page_count > 1);
        assert_eq!(page_count_of(&bytes), pagination.page_count);
    }

    #[test]
    fn exact_multiple_produces_no_extra_page() {
        let raster = solid_raster(2100, 5940);
        let pagination = Pagination::plan(2100, 5940, PageGeometry::default());
        let bytes = assemble_pdf(&raster, &pagination).unwrap();

        assert_eq!(page_count_of(&bytes), 2);
    }

    #[test]
    fn image_stream_is_flate_encoded_rgb() {
        let raster = solid_raster(4, 4);
        let pagination = Pagination::plan(4, 4, PageGeometry::default());
        let bytes = assemble_pdf(&raster, &pagination).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let image = doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .find(|s| {
                s.dict
                    .get(b"Subtype")
                    .and_then(|o| o.as_name())
                    .map(|n| n == b"Image")
                    .unwrap_or(false)
            })
            .expect("image XObject present");

        assert_eq!(
            image
                .dict
                .get(b"ColorSpace")
                .unwrap()
                .as_name()
                .unwrap(),
            b"DeviceRGB"
        );
        let decompressed = image.decompressed_content().unwrap();
        assert_eq!(decompressed.len(), 4 * 4 * 3);
        assert!(decompressed.iter().all(|&b| b == 0xff));
    }
}
