//! Static font-metric tables for the three template typefaces.
//!
//! Character widths are in em units (relative to font size). One hand-measured
//! table for Inter covers ASCII 0x20..=0x7E; the other families are expressed as
//! a horizontal scale of it. That is an approximation, but good enough for a
//! wireframe preview and for estimating how many pages a render will need.
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

use crate::render::page::Weight;

/// Typefaces used by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Body face of Modern Tech and Executive Suite.
    Inter,
    /// Display face for Modern Tech headings.
    SpaceGrotesk,
    /// Serif face of Minimalist ATS and the Executive Suite headings.
    Merriweather,
}

impl FontFamily {
    pub fn css_name(self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::SpaceGrotesk => "Space Grotesk",
            FontFamily::Merriweather => "Merriweather",
        }
    }

    /// Width relative to Inter.
    fn scale(self) -> f32 {
        match self {
            FontFamily::Inter => 1.0,
            FontFamily::SpaceGrotesk => 1.04,
            FontFamily::Merriweather => 1.10,
        }
    }
}

/// Bold glyphs run wider than regular ones.
fn weight_factor(weight: Weight) -> f32 {
    match weight {
        Weight::Regular => 1.0,
        Weight::Semibold => 1.03,
        Weight::Bold => 1.06,
    }
}

/// Fallback width for non-ASCII characters (codepoints > 0x7E).
const AVERAGE_CHAR_WIDTH: f32 = 0.52;
const SPACE_WIDTH: f32 = 0.25;
/// Monospace advance.
const MONO_WIDTH: f32 = 0.60;

/// Inter widths, ASCII 0x20..=0x7E.
#[rustfmt::skip]
static INTER_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

/// Measures text set in one face, weight and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub family: FontFamily,
    pub weight: Weight,
    pub mono: bool,
    pub size_pt: f32,
}

impl FontMetrics {
    pub fn new(family: FontFamily, size_pt: f32) -> Self {
        Self {
            family,
            weight: Weight::Regular,
            mono: false,
            size_pt,
        }
    }

    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_mono(mut self, mono: bool) -> Self {
        self.mono = mono;
        self
    }

    /// Width of `s` in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        if self.mono {
            return s.chars().count() as f32 * MONO_WIDTH;
        }
        let raw: f32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    INTER_WIDTHS[code - 32]
                } else {
                    AVERAGE_CHAR_WIDTH
                }
            })
            .sum();
        raw * self.family.scale() * weight_factor(self.weight)
    }

    /// Width of `s` in points at this size.
    pub fn measure_pt(&self, s: &str) -> f32 {
        self.measure_em(s) * self.size_pt
    }

    pub fn space_pt(&self) -> f32 {
        let em = if self.mono { MONO_WIDTH } else { SPACE_WIDTH * self.family.scale() };
        em * self.size_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
