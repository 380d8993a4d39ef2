//! Box layout of a `Page` on an A4-wide canvas.
//!
//! Produces flat coloured rectangles: region fills, rules, chip backgrounds,
//! and one bar per placed word. This is what `WireframeRasterizer` paints and
//! what page-count estimates are based on. Pure: same page, same boxes.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontMetrics;
use crate::layout::wrap::{wrap, Line, Word};
use crate::render::page::{Align, Block, Page, Region, Rgb, Span, TextRole, Theme};

/// A4 in PDF points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

const LINE_HEIGHT: f32 = 1.45;
const GAP_PT: f32 = 10.0;
const RULE_MARGIN_PT: f32 = 4.0;
const CHIP_PAD_X_PT: f32 = 6.0;
const CHIP_PAD_Y_PT: f32 = 2.0;
const CHIP_SPACING_PT: f32 = 4.0;
const ROW_GUTTER_PT: f32 = 8.0;
/// Text bars are drawn at this fraction of the font size.
const BAR_HEIGHT: f32 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutPage {
    pub width_pt: f32,
    /// At least one A4 page tall; grows with content.
    pub height_pt: f32,
    pub paper: Rgb,
    /// Painted in order; later boxes cover earlier ones.
    pub boxes: Vec<PaintBox>,
}

impl LaidOutPage {
    /// Number of A4 sheets the content spans.
    pub fn page_count(&self) -> usize {
        ((self.height_pt / A4_HEIGHT_PT) - 0.001).ceil().max(1.0) as usize
    }
}

pub fn font_size_pt(role: TextRole) -> f32 {
    match role {
        TextRole::Name => 26.0,
        TextRole::Tagline => 11.0,
        TextRole::Contact => 9.0,
        TextRole::SectionHeading => 9.0,
        TextRole::ItemTitle => 11.0,
        TextRole::Meta => 10.0,
        TextRole::Body => 10.0,
        TextRole::Caption => 8.0,
    }
}

/// Lays out `page` at A4 width.
pub fn layout_page(page: &Page) -> LaidOutPage {
    let theme = &page.theme;
    let pad = theme.padding_pt;
    let mut boxes = Vec::new();
    let mut y = 0.0_f32;

    if let Some(banner) = &page.banner {
        let mut inner = Vec::new();
        let height = layout_region(theme, banner, pad, pad, A4_WIDTH_PT - 2.0 * pad, &mut inner);
        let banner_height = height + 2.0 * pad;
        if let Some(fill) = banner.fill {
            boxes.push(PaintBox {
                x: 0.0,
                y: 0.0,
                w: A4_WIDTH_PT,
                h: banner_height,
                color: fill,
            });
        }
        boxes.extend(inner);
        y = banner_height;
    }

    let top = y + pad;
    let content_width = A4_WIDTH_PT - 2.0 * pad;
    let total_span: f32 = page.columns.iter().map(|c| c.span as f32).sum::<f32>().max(1.0);
    let gaps = theme.column_gap_pt * page.columns.len().saturating_sub(1) as f32;
    let track = (content_width - gaps) / total_span;

    let mut x = pad;
    let mut bottom = top;
    for column in &page.columns {
        let width = track * column.span as f32;
        let mut inner = Vec::new();
        let height = layout_region(theme, column, x, top, width, &mut inner);
        if let Some(fill) = column.fill {
            boxes.push(PaintBox {
                x,
                y: top,
                w: width,
                h: height,
                color: fill,
            });
        }
        boxes.extend(inner);
        if column.divider {
            boxes.push(PaintBox {
                x: x + width + theme.column_gap_pt / 2.0,
                y: top,
                w: 0.75,
                h: height,
                color: theme.rule,
            });
        }
        bottom = bottom.max(top + height);
        x += width + theme.column_gap_pt;
    }

    LaidOutPage {
        width_pt: A4_WIDTH_PT,
        height_pt: (bottom + pad).max(A4_HEIGHT_PT),
        paper: theme.paper,
        boxes,
    }
}

/// Lays out one region's blocks top-down; returns the height used.
fn layout_region(
    theme: &Theme,
    region: &Region,
    x: f32,
    top: f32,
    width: f32,
    out: &mut Vec<PaintBox>,
) -> f32 {
    let mut y = top;
    for block in &region.blocks {
        y += layout_block(theme, block, x, y, width, out);
    }
    y - top
}

fn layout_block(
    theme: &Theme,
    block: &Block,
    x: f32,
    y: f32,
    width: f32,
    out: &mut Vec<PaintBox>,
) -> f32 {
    match block {
        Block::Text { role, align, spans } => {
            let size = font_size_pt(*role);
            let lines = wrap(&words_for(theme, *role, spans), width);
            paint_lines(&lines, size, *align, x, y, width, out)
        }
        Block::Row { role, left, right } => {
            let size = font_size_pt(*role);
            let right_lines = wrap(&words_for(theme, *role, right), width);
            let right_width = right_lines.first().map(|l| l.width).unwrap_or(0.0);
            let left_width = (width - right_width - ROW_GUTTER_PT).max(width * 0.4);
            let left_lines = wrap(&words_for(theme, *role, left), left_width);
            let left_h = paint_lines(&left_lines, size, Align::Start, x, y, left_width, out);
            let right_h = paint_lines(
                &right_lines,
                size,
                Align::Start,
                x + width - right_width,
                y,
                right_width,
                out,
            );
            left_h.max(right_h)
        }
        Block::Chips { items, tone } => {
            let size = font_size_pt(TextRole::Caption);
            let metrics = FontMetrics::new(theme.body_font, size);
            let chip_h = size * LINE_HEIGHT + 2.0 * CHIP_PAD_Y_PT;
            let mut cx = 0.0_f32;
            let mut cy = 0.0_f32;
            for item in items {
                let text_w = metrics.measure_pt(item);
                let chip_w = (text_w + 2.0 * CHIP_PAD_X_PT).min(width);
                if cx > 0.0 && cx + chip_w > width {
                    cx = 0.0;
                    cy += chip_h + CHIP_SPACING_PT;
                }
                out.push(PaintBox {
                    x: x + cx,
                    y: y + cy,
                    w: chip_w,
                    h: chip_h,
                    color: theme.chip,
                });
                out.push(PaintBox {
                    x: x + cx + CHIP_PAD_X_PT,
                    y: y + cy + (chip_h - size * BAR_HEIGHT) / 2.0,
                    w: text_w.min(chip_w - 2.0 * CHIP_PAD_X_PT).max(0.0),
                    h: size * BAR_HEIGHT,
                    color: theme.color(*tone),
                });
                cx += chip_w + CHIP_SPACING_PT;
            }
            if items.is_empty() {
                0.0
            } else {
                cy + chip_h + CHIP_SPACING_PT
            }
        }
        Block::Rule => {
            out.push(PaintBox {
                x,
                y: y + RULE_MARGIN_PT,
                w: width,
                h: 0.75,
                color: theme.rule,
            });
            2.0 * RULE_MARGIN_PT + 0.75
        }
        Block::Gap => GAP_PT,
    }
}

/// Splits spans into measured words. Newlines inside span text become hard breaks.
fn words_for(theme: &Theme, role: TextRole, spans: &[Span]) -> Vec<Word> {
    let size = font_size_pt(role);
    let family = theme.font_for(role);
    let mut words = Vec::new();
    for span in spans {
        let metrics = FontMetrics::new(family, size)
            .with_weight(span.weight)
            .with_mono(span.mono);
        let color = theme.color(span.tone);
        let text = span.display_text();
        for (i, segment) in text.split('\n').enumerate() {
            let hard_break = i > 0;
            let mut first = true;
            for token in segment.split_whitespace() {
                words.push(Word {
                    width: metrics.measure_pt(token),
                    space_before: metrics.space_pt(),
                    color,
                    hard_break: hard_break && first,
                });
                first = false;
            }
            if first && hard_break {
                words.push(Word {
                    width: 0.0,
                    space_before: 0.0,
                    color,
                    hard_break: true,
                });
            }
        }
    }
    words
}

/// Paints word bars for `lines`; returns the height used. Empty text still
/// reserves one line so blank fields do not collapse the layout.
fn paint_lines(
    lines: &[Line],
    size: f32,
    align: Align,
    x: f32,
    y: f32,
    width: f32,
    out: &mut Vec<PaintBox>,
) -> f32 {
    let line_h = size * LINE_HEIGHT;
    let bar_h = size * BAR_HEIGHT;
    for (i, line) in lines.iter().enumerate() {
        let offset = match align {
            Align::Center => ((width - line.width) / 2.0).max(0.0),
            Align::Start | Align::Justify => 0.0,
        };
        let baseline = y + i as f32 * line_h + (line_h - bar_h) / 2.0;
        for word in line.words.iter().filter(|w| w.width > 0.0) {
            let left = x + offset + word.x;
            // Words wider than the region are clipped at its edge.
            let w = word.width.min(x + width - left);
            if w <= 0.0 {
                continue;
            }
            out.push(PaintBox {
                x: left,
                y: baseline,
                w,
                h: bar_h,
                color: word.color,
            });
        }
    }
    lines.len().max(1) as f32 * line_h
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{seed_resume, Resume};
    use crate::render::{render, TemplateVariant};

    #[test]
    fn test_seed_fits_one_page_in_every_variant() {
        for variant in TemplateVariant::ALL {
            let laid = layout_page(&render(&seed_resume(), variant));
            assert_eq!(laid.page_count(), 1, "{variant} overflowed");
            assert!((laid.width_pt - A4_WIDTH_PT).abs() < 1e-3);
        }
    }

    #[test]
    fn test_long_document_spans_more_pages() {
        let mut resume = seed_resume();
        for _ in 0..12 {
            resume = resume.add_experience().0;
        }
        let laid = layout_page(&render(&resume, TemplateVariant::MinimalistAts));
        assert!(laid.page_count() >= 2, "height {}", laid.height_pt);
    }

    #[test]
    fn test_boxes_stay_within_page_width() {
        for variant in TemplateVariant::ALL {
            let laid = layout_page(&render(&seed_resume(), variant));
            for b in &laid.boxes {
                assert!(b.x >= 0.0 && b.x + b.w <= A4_WIDTH_PT + 0.5, "{variant}: {b:?}");
            }
        }
    }

    #[test]
    fn test_executive_banner_painted_first() {
        let laid = layout_page(&render(&seed_resume(), TemplateVariant::ExecutiveSuite));
        let first = laid.boxes[0];
        assert_eq!(first.x, 0.0);
        assert_eq!(first.y, 0.0);
        assert!((first.w - A4_WIDTH_PT).abs() < 1e-3);
        assert_eq!(first.color, Rgb(6, 78, 59));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let page = render(&seed_resume(), TemplateVariant::ModernTech);
        assert_eq!(layout_page(&page), layout_page(&page));
    }

    #[test]
    fn test_empty_document_is_one_page() {
        let laid = layout_page(&render(&Resume::default(), TemplateVariant::ModernTech));
        assert_eq!(laid.page_count(), 1);
        assert!((laid.height_pt - A4_HEIGHT_PT).abs() < 1e-3);
    }
}
