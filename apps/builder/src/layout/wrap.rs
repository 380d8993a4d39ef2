//! Greedy word wrap over styled words.

use crate::render::page::Rgb;

/// One measured word, ready to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub width: f32,
    /// Gap inserted before this word when it does not start a line.
    pub space_before: f32,
    pub color: Rgb,
    /// Forces a line break before this word (an explicit newline in the text).
    pub hard_break: bool,
}

/// A word placed on a line, `x` relative to the line start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    pub x: f32,
    pub width: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub words: Vec<Placed>,
    pub width: f32,
}

/// Wraps `words` into lines no wider than `max_width`.
///
/// A word wider than `max_width` gets a line of its own rather than being split.
/// Hard breaks always start a new line; a blank source line arrives as a
/// zero-width word carrying a hard break, so it still occupies a line.
pub fn wrap(words: &[Word], max_width: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current = Line::default();
    let mut first_on_line = true;

    for word in words {
        if word.hard_break {
            lines.push(std::mem::take(&mut current));
            first_on_line = true;
        }
        let gap = if first_on_line { 0.0 } else { word.space_before };

        if !first_on_line && current.width + gap + word.width > max_width {
            lines.push(std::mem::take(&mut current));
            current.words.push(Placed {
                x: 0.0,
                width: word.width,
                color: word.color,
            });
            current.width = word.width;
        } else {
            current.words.push(Placed {
                x: current.width + gap,
                width: word.width,
                color: word.color,
            });
            current.width += gap + word.width;
            first_on_line = false;
        }
    }
    if !current.words.is_empty() || !lines.is_empty() {
        lines.push(current);
    }
    lines
}
