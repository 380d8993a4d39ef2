//! Page description produced by the template renderer.
//!
//! A `Page` is layout intent, not pixels: a banner plus a row of columns, each
//! column a stack of blocks, each block a run of styled spans. Text is stored
//! exactly as the document holds it; casing and emphasis are attributes so the
//! same content survives every template.

use serde::{Deserialize, Serialize};

use crate::layout::FontFamily;
use crate::render::TemplateVariant;

// ────────────────────────────────────────────────────────────────────────────
// Styling primitives
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colour slot a span draws from; the theme resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Ink,
    Muted,
    Accent,
    /// Text placed on the banner fill.
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Casing {
    AsWritten,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weight {
    Regular,
    Semibold,
    Bold,
}

/// Typographic role of a block. Fixes size and face; spans refine emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextRole {
    Name,
    Tagline,
    Contact,
    SectionHeading,
    ItemTitle,
    Meta,
    Body,
    Caption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Start,
    Center,
    Justify,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub weight: Weight,
    pub italic: bool,
    pub casing: Casing,
    pub tone: Tone,
    pub mono: bool,
    /// Hyperlink target, if the span is a link.
    pub href: Option<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            weight: Weight::Regular,
            italic: false,
            casing: Casing::AsWritten,
            tone: Tone::Ink,
            mono: false,
            href: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = Weight::Bold;
        self
    }

    pub fn semibold(mut self) -> Self {
        self.weight = Weight::Semibold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn upper(mut self) -> Self {
        self.casing = Casing::Upper;
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn mono(mut self) -> Self {
        self.mono = true;
        self
    }

    /// Links are always web links: anything without an http(s) scheme gets
    /// `https://` prepended, so `javascript:` and friends stay inert.
    pub fn link(mut self, href: &str) -> Self {
        self.href = Some(web_href(href));
        self
    }

    /// Text as it appears on the page, casing applied.
    pub fn display_text(&self) -> String {
        match self.casing {
            Casing::AsWritten => self.text.clone(),
            Casing::Upper => self.text.to_uppercase(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks and regions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// Wrapped text. Line breaks inside span text are kept.
    Text {
        role: TextRole,
        align: Align,
        spans: Vec<Span>,
    },
    /// Two runs on one baseline, pushed to opposite edges.
    Row {
        role: TextRole,
        left: Vec<Span>,
        right: Vec<Span>,
    },
    /// Pill-shaped tags, flowed left to right.
    Chips { items: Vec<String>, tone: Tone },
    Rule,
    Gap,
}

impl Block {
    pub fn text(role: TextRole, spans: Vec<Span>) -> Self {
        Block::Text {
            role,
            align: Align::Start,
            spans,
        }
    }

    pub fn aligned(role: TextRole, align: Align, spans: Vec<Span>) -> Self {
        Block::Text { role, align, spans }
    }

    fn plain_text(&self) -> Option<String> {
        match self {
            Block::Text { spans, .. } => Some(join_spans(spans)),
            Block::Row { left, right, .. } => {
                Some(format!("{}  {}", join_spans(left), join_spans(right)))
            }
            Block::Chips { items, .. } => Some(items.join("\n")),
            Block::Rule | Block::Gap => None,
        }
    }
}

fn join_spans(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    Banner,
    Sidebar,
    Main,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    /// Share of the content width, in twelfths.
    pub span: u8,
    pub fill: Option<Rgb>,
    /// Vertical divider drawn on the trailing edge.
    pub divider: bool,
    pub blocks: Vec<Block>,
}

impl Region {
    pub fn new(kind: RegionKind, span: u8) -> Self {
        Self {
            kind,
            span,
            fill: None,
            divider: false,
            blocks: Vec::new(),
        }
    }

    pub fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_divider(mut self) -> Self {
        self.divider = true;
        self
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.extend(blocks);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Theme and page
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub body_font: FontFamily,
    pub heading_font: FontFamily,
    pub paper: Rgb,
    pub ink: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub inverse: Rgb,
    pub rule: Rgb,
    pub chip: Rgb,
    /// Outer page padding in points.
    pub padding_pt: f32,
    /// Gap between columns in points.
    pub column_gap_pt: f32,
}

impl Theme {
    pub fn color(&self, tone: Tone) -> Rgb {
        match tone {
            Tone::Ink => self.ink,
            Tone::Muted => self.muted,
            Tone::Accent => self.accent,
            Tone::Inverse => self.inverse,
        }
    }

    pub fn font_for(&self, role: TextRole) -> FontFamily {
        match role {
            TextRole::Name | TextRole::SectionHeading => self.heading_font,
            _ => self.body_font,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub variant: TemplateVariant,
    pub theme: Theme,
    /// Full-width band above the columns.
    pub banner: Option<Region>,
    pub columns: Vec<Region>,
}

impl Page {
    /// Every region in reading order: banner first, then columns left to right.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.banner.iter().chain(self.columns.iter())
    }

    /// Visible text in reading order, one block per line. Span text is kept as
    /// written; casing is presentation.
    pub fn plain_text(&self) -> String {
        self.regions()
            .flat_map(|r| r.blocks.iter())
            .filter_map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn block_count(&self) -> usize {
        self.regions().map(|r| r.blocks.len()).sum()
    }
}

fn web_href(value: &str) -> String {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}
