//! Bitmap → A4 PDF.
//!
//! The bitmap is embedded once as a Flate-compressed RGB image and drawn at
//! page width on every sheet, shifted up one page height per sheet, so a tall
//! capture continues across pages.

use std::io::Write;

use bytes::Bytes;
use chrono::{Datelike, Timelike, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use thiserror::Error;

use crate::export::raster::Bitmap;
use crate::layout::{A4_HEIGHT_PT, A4_WIDTH_PT};

const IMAGE_NAME: Name<'static> = Name(b"Im1");
const CREATOR: &str = concat!("resumotion ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("cannot embed an empty bitmap ({width}x{height})")]
    EmptyBitmap { width: u32, height: u32 },

    #[error("bitmap buffer holds {actual} bytes, expected {expected}")]
    BadBuffer { expected: usize, actual: usize },

    #[error("image compression failed: {0}")]
    Compress(#[from] std::io::Error),
}

pub trait PdfAssembler: Send + Sync {
    fn assemble(&self, bitmap: &Bitmap, title: &str) -> Result<Bytes, PdfError>;
}

/// Sheets needed for a bitmap scaled to A4 width.
pub fn sheets_for(width: u32, height: u32) -> usize {
    if width == 0 {
        return 1;
    }
    let scaled = height as f32 * A4_WIDTH_PT / width as f32;
    ((scaled / A4_HEIGHT_PT) - 0.001).ceil().max(1.0) as usize
}

/// Sequential object ids.
struct RefAlloc(i32);

impl RefAlloc {
    fn bump(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct A4ImagePdf;

impl PdfAssembler for A4ImagePdf {
    fn assemble(&self, bitmap: &Bitmap, title: &str) -> Result<Bytes, PdfError> {
        let (width, height) = (bitmap.width, bitmap.height);
        if width == 0 || height == 0 {
            return Err(PdfError::EmptyBitmap { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if bitmap.rgb.len() != expected {
            return Err(PdfError::BadBuffer {
                expected,
                actual: bitmap.rgb.len(),
            });
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(6));
        encoder.write_all(&bitmap.rgb)?;
        let compressed = encoder.finish()?;

        let scaled_height = height as f32 * A4_WIDTH_PT / width as f32;
        let sheets = sheets_for(width, height);

        let mut ids = RefAlloc(0);
        let catalog_id = ids.bump();
        let page_tree_id = ids.bump();
        let image_id = ids.bump();
        let info_id = ids.bump();
        let page_ids: Vec<(Ref, Ref)> = (0..sheets).map(|_| (ids.bump(), ids.bump())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(sheets as i32);

        let mut image = pdf.image_xobject(image_id, &compressed);
        image.filter(Filter::FlateDecode);
        image.width(width as i32);
        image.height(height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        for (sheet, (page_id, content_id)) in page_ids.iter().enumerate() {
            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, A4_WIDTH_PT, A4_HEIGHT_PT));
            page.parent(page_tree_id);
            page.contents(*content_id);
            page.resources().x_objects().pair(IMAGE_NAME, image_id);
            page.finish();

            // PDF space is bottom-up; the image top sits at the sheet top on
            // sheet 0 and one page height higher on each following sheet.
            let y = A4_HEIGHT_PT - scaled_height + sheet as f32 * A4_HEIGHT_PT;
            let mut content = Content::new();
            content.save_state();
            content.transform([A4_WIDTH_PT, 0.0, 0.0, scaled_height, 0.0, y]);
            content.x_object(IMAGE_NAME);
            content.restore_state();
            pdf.stream(*content_id, &content.finish());
        }

        let now = Utc::now();
        pdf.document_info(info_id)
            .title(TextStr(title))
            .creator(TextStr(CREATOR))
            .creation_date(
                Date::new(now.year() as u16)
                    .month(now.month() as u8)
                    .day(now.day() as u8)
                    .hour(now.hour() as u8)
                    .minute(now.minute() as u8)
                    .second(now.second() as u8),
            );

        Ok(Bytes::from(pdf.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::page::Rgb;

    #[test]
    fn test_sheets_for_a4_aspect_is_one() {
        assert_eq!(sheets_for(1191, 1684), 1);
        assert_eq!(sheets_for(595, 842), 1);
    }

    #[test]
    fn test_sheets_for_tall_image() {
        assert_eq!(sheets_for(1000, 2800), 2);
        assert_eq!(sheets_for(1000, 3000), 3);
    }

    #[test]
    fn test_assemble_produces_pdf() {
        let bm = Bitmap::filled(60, 85, Rgb::WHITE);
        let bytes = A4ImagePdf.assemble(&bm, "Alex Chen").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/FlateDecode"));
    }

    #[test]
    fn test_tall_bitmap_adds_pages() {
        let bm = Bitmap::filled(60, 300, Rgb::WHITE);
        let bytes = A4ImagePdf.assemble(&bm, "Long").unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 4"));
    }

    #[test]
    fn test_empty_bitmap_rejected() {
        let bm = Bitmap {
            width: 0,
            height: 10,
            rgb: vec![],
        };
        assert!(matches!(
            A4ImagePdf.assemble(&bm, "x"),
            Err(PdfError::EmptyBitmap { .. })
        ));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let bm = Bitmap {
            width: 2,
            height: 2,
            rgb: vec![0; 5],
        };
        assert!(matches!(
            A4ImagePdf.assemble(&bm, "x"),
            Err(PdfError::BadBuffer { expected: 12, actual: 5 })
        ));
    }
}
