//! Page → bitmap.
//!
//! The PDF path needs the rendered page as pixels. `Rasterizer` is the seam; a
//! headless-browser capture of `Page::to_html()` can sit behind it. The built-in
//! `WireframeRasterizer` paints the box layout from `layout::flow` directly.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::layout::{layout_page, LaidOutPage};
use crate::render::page::{Page, Rgb};

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("page has zero size ({width}x{height})")]
    EmptyPage { width: u32, height: u32 },

    #[error("rasterizer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("rasterizer backend error: {0}")]
    Backend(String),
}

/// Row-major 8-bit RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Bitmap {
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            rgb.extend_from_slice(&[color.0, color.1, color.2]);
        }
        Self { width, height, rgb }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some(Rgb(self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]))
    }

    /// Fills the pixel rectangle `[x0, x1) × [y0, y1)`, clipped to the bitmap.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        for y in y0.min(y1)..y1 {
            let row = y as usize * self.width as usize;
            for x in x0.min(x1)..x1 {
                let i = (row + x as usize) * 3;
                self.rgb[i] = color.0;
                self.rgb[i + 1] = color.1;
                self.rgb[i + 2] = color.2;
            }
        }
    }
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, page: &Page) -> Result<Bitmap, RasterError>;
}

/// Paints layout boxes as flat colour. `scale` is pixels per PDF point.
#[derive(Debug, Clone, Copy)]
pub struct WireframeRasterizer {
    pub scale: f32,
}

impl Default for WireframeRasterizer {
    fn default() -> Self {
        // Matches a 2x capture of a 96dpi page closely enough for print.
        Self { scale: 2.0 }
    }
}

impl WireframeRasterizer {
    pub fn paint(&self, laid: &LaidOutPage) -> Result<Bitmap, RasterError> {
        let width = (laid.width_pt * self.scale).round() as u32;
        let height = (laid.height_pt * self.scale).round() as u32;
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyPage { width, height });
        }
        let mut bitmap = Bitmap::filled(width, height, laid.paper);
        let px = |v: f32| (v * self.scale).round().max(0.0) as u32;
        for b in &laid.boxes {
            // Hairlines still get one pixel.
            let x1 = px(b.x + b.w).max(px(b.x) + 1);
            let y1 = px(b.y + b.h).max(px(b.y) + 1);
            bitmap.fill_rect(px(b.x), px(b.y), x1, y1, b.color);
        }
        Ok(bitmap)
    }
}

#[async_trait]
impl Rasterizer for WireframeRasterizer {
    async fn rasterize(&self, page: &Page) -> Result<Bitmap, RasterError> {
        let page = page.clone();
        let this = *self;
        let bitmap = tokio::task::spawn_blocking(move || {
            let laid = layout_page(&page);
            this.paint(&laid)
        })
        .await??;
        debug!(
            width = bitmap.width,
            height = bitmap.height,
            "rasterized page"
        );
        Ok(bitmap)
    }
}
