//! Standalone HTML for a `Page`: the live preview, and the input an external
//! rasterizer (headless browser) captures for the PDF path.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::render::page::{
    Align, Block, Casing, Page, Region, RegionKind, Span, TextRole, Tone, Weight,
};

/// A4 at CSS 96dpi.
const PAGE_WIDTH_PX: u32 = 794;
const PAGE_MIN_HEIGHT_PX: u32 = 1123;

impl Page {
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(8 * 1024);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape(self.variant.label()));
        out.push_str("<style>\n");
        out.push_str(&self.stylesheet());
        out.push_str("</style>\n</head>\n<body>\n");
        let _ = writeln!(
            out,
            "<main class=\"page {}\">",
            variant_class(self)
        );

        if let Some(banner) = &self.banner {
            write_region(&mut out, banner);
        }
        out.push_str("<div class=\"columns\">\n");
        for column in &self.columns {
            write_region(&mut out, column);
        }
        out.push_str("</div>\n</main>\n</body>\n</html>\n");
        out
    }

    fn stylesheet(&self) -> String {
        let t = &self.theme;
        format!(
            ":root {{ --ink: {ink}; --muted: {muted}; --accent: {accent}; --inverse: {inverse}; \
             --rule: {rule}; --chip: {chip}; }}\n\
             body {{ margin: 0; background: {paper}; }}\n\
             .page {{ width: {w}px; min-height: {h}px; box-sizing: border-box; \
             padding: {pad}pt; color: var(--ink); font-family: '{body}', sans-serif; }}\n\
             .page.with-banner {{ padding: 0; }}\n\
             .banner {{ padding: {pad}pt; }}\n\
             .with-banner .columns {{ padding: {pad}pt; }}\n\
             .columns {{ display: grid; grid-template-columns: repeat(12, 1fr); gap: {gap}pt; }}\n\
             .divider {{ border-right: 1px solid var(--rule); padding-right: 18pt; }}\n\
             .name, .section-heading {{ font-family: '{heading}', serif; }}\n\
             .name {{ font-size: 26pt; margin: 0 0 4pt; }}\n\
             .tagline {{ font-size: 11pt; letter-spacing: 0.1em; }}\n\
             .contact {{ font-size: 9pt; }}\n\
             .section-heading {{ font-size: 9pt; letter-spacing: 0.15em; margin-top: 8pt; }}\n\
             .item-title {{ font-size: 11pt; }}\n\
             .meta {{ font-size: 10pt; }}\n\
             .body {{ font-size: 10pt; line-height: 1.6; white-space: pre-wrap; }}\n\
             .caption {{ font-size: 8pt; }}\n\
             .row {{ display: flex; justify-content: space-between; align-items: baseline; }}\n\
             .chips {{ display: flex; flex-wrap: wrap; gap: 4pt; }}\n\
             .chip {{ background: var(--chip); border-radius: 9999px; padding: 2pt 6pt; font-size: 8pt; }}\n\
             hr {{ border: 0; border-top: 1px solid var(--rule); }}\n\
             .gap {{ height: 10pt; }}\n\
             .upper {{ text-transform: uppercase; }}\n\
             .mono {{ font-family: monospace; }}\n\
             .tone-muted {{ color: var(--muted); }} .tone-accent {{ color: var(--accent); }} \
             .tone-inverse {{ color: var(--inverse); }}\n\
             .align-center {{ text-align: center; }} .align-justify {{ text-align: justify; }}\n",
            ink = t.ink.hex(),
            muted = t.muted.hex(),
            accent = t.accent.hex(),
            inverse = t.inverse.hex(),
            rule = t.rule.hex(),
            chip = t.chip.hex(),
            paper = t.paper.hex(),
            w = PAGE_WIDTH_PX,
            h = PAGE_MIN_HEIGHT_PX,
            pad = t.padding_pt,
            gap = t.column_gap_pt,
            body = t.body_font.css_name(),
            heading = t.heading_font.css_name(),
        )
    }
}

fn variant_class(page: &Page) -> String {
    let base = page.variant.label().to_lowercase().replace(' ', "-");
    if page.banner.is_some() {
        format!("{base} with-banner")
    } else {
        base
    }
}

fn write_region(out: &mut String, region: &Region) {
    let kind = match region.kind {
        RegionKind::Banner => "banner",
        RegionKind::Sidebar => "sidebar",
        RegionKind::Main => "main",
    };
    let mut style = format!("grid-column: span {};", region.span);
    if let Some(fill) = region.fill {
        let _ = write!(style, " background: {};", fill.hex());
    }
    let divider = if region.divider { " divider" } else { "" };
    let _ = writeln!(out, "<section class=\"{kind}{divider}\" style=\"{style}\">");
    for block in &region.blocks {
        write_block(out, block);
    }
    out.push_str("</section>\n");
}

fn role_class(role: TextRole) -> &'static str {
    match role {
        TextRole::Name => "name",
        TextRole::Tagline => "tagline",
        TextRole::Contact => "contact",
        TextRole::SectionHeading => "section-heading",
        TextRole::ItemTitle => "item-title",
        TextRole::Meta => "meta",
        TextRole::Body => "body",
        TextRole::Caption => "caption",
    }
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Text { role, align, spans } => {
            let align = match align {
                Align::Start => "",
                Align::Center => " align-center",
                Align::Justify => " align-justify",
            };
            let _ = write!(out, "<div class=\"{}{align}\">", role_class(*role));
            write_spans(out, spans);
            out.push_str("</div>\n");
        }
        Block::Row { role, left, right } => {
            let _ = write!(out, "<div class=\"row {}\"><span>", role_class(*role));
            write_spans(out, left);
            out.push_str("</span><span>");
            write_spans(out, right);
            out.push_str("</span></div>\n");
        }
        Block::Chips { items, tone } => {
            out.push_str("<div class=\"chips\">");
            for item in items {
                let _ = write!(
                    out,
                    "<span class=\"chip{}\">{}</span>",
                    tone_class(*tone),
                    escape(item.as_str())
                );
            }
            out.push_str("</div>\n");
        }
        Block::Rule => out.push_str("<hr>\n"),
        Block::Gap => out.push_str("<div class=\"gap\"></div>\n"),
    }
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Ink => "",
        Tone::Muted => " tone-muted",
        Tone::Accent => " tone-accent",
        Tone::Inverse => " tone-inverse",
    }
}

fn write_spans(out: &mut String, spans: &[Span]) {
    for span in spans {
        let mut class = String::new();
        class.push_str(tone_class(span.tone));
        if span.casing == Casing::Upper {
            class.push_str(" upper");
        }
        if span.mono {
            class.push_str(" mono");
        }
        let mut style = String::new();
        match span.weight {
            Weight::Regular => {}
            Weight::Semibold => style.push_str("font-weight: 600;"),
            Weight::Bold => style.push_str("font-weight: 700;"),
        }
        if span.italic {
            style.push_str("font-style: italic;");
        }
        let text = escape(span.text.as_str());
        let open = match &span.href {
            Some(href) => format!("<a href=\"{}\"", escape(href.as_str())),
            None => "<span".to_string(),
        };
        let close = if span.href.is_some() { "</a>" } else { "</span>" };
        let _ = write!(
            out,
            "{open} class=\"{}\" style=\"{style}\">{text}{close}",
            class.trim_start()
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::models::seed_resume;
    use crate::render::{render, TemplateVariant};

    #[test]
    fn test_html_escapes_document_text() {
        let resume = seed_resume()
            .set_personal_field(crate::models::PersonalField::FullName, "Alex <Ace> & Co");
        let html = render(&resume, TemplateVariant::ModernTech).to_html();
        assert!(html.contains("Alex &lt;Ace&gt; &amp; Co"));
        assert!(!html.contains("<Ace>"));
    }

    #[test]
    fn test_html_marks_uppercase_with_css_not_text() {
        let html = render(&seed_resume(), TemplateVariant::ModernTech).to_html();
        assert!(html.contains(">Alex Chen<"));
        assert!(html.contains("text-transform: uppercase"));
    }

    #[test]
    fn test_executive_banner_gets_fill() {
        let html = render(&seed_resume(), TemplateVariant::ExecutiveSuite).to_html();
        assert!(html.contains("background: #064e3b;"));
        assert!(html.contains("with-banner"));
    }

    #[test]
    fn test_minimalist_links_are_anchors() {
        let html = render(&seed_resume(), TemplateVariant::MinimalistAts).to_html();
        assert!(html.contains("<a href=\"https://github.com/alexchen\""));
    }

    #[test]
    fn test_script_links_are_never_live_anchors() {
        use crate::models::ProjectEdit;

        let resume = seed_resume();
        let id = resume.projects[0].id.clone();
        let resume =
            resume.update_project(&id, ProjectEdit::Link(Some("javascript:alert(1)".into())));
        for variant in TemplateVariant::ALL {
            let html = render(&resume, variant).to_html();
            assert!(!html.contains("href=\"javascript:"), "{variant}");
            assert!(html.contains("href=\"https://javascript:alert(1)\""), "{variant}");
        }
    }
}
