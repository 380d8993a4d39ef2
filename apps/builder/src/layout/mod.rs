// Page layout: static font metrics, greedy word wrap, and box flow of a
// rendered `Page` onto an A4-wide canvas. Pure and CPU-bound; callers on the
// async side run it inside tokio::task::spawn_blocking.

pub mod flow;
pub mod font_metrics;
pub mod wrap;

pub use flow::{layout_page, LaidOutPage, PaintBox, A4_HEIGHT_PT, A4_WIDTH_PT};
pub use font_metrics::{FontFamily, FontMetrics};
