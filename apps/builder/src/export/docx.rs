//! Document → DOCX.
//!
//! Blocks are derived from the `Resume` alone, never from a rendered page, so
//! the Word file is the same whichever template is on screen.
//! `OoxmlDocx` packages them as a minimal WordprocessingML zip.

use std::borrow::Cow;
use std::io::{Cursor, Write};

use bytes::Bytes;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::models::Resume;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadingLevel {
    One,
    Two,
}

impl HeadingLevel {
    fn style_id(self) -> &'static str {
        match self {
            HeadingLevel::One => "Heading1",
            HeadingLevel::Two => "Heading2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size in half-points, as Word stores it.
    pub half_points: Option<u32>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            half_points: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.half_points = Some(half_points);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DocBlock {
    Heading { level: HeadingLevel, text: String },
    /// An empty run list is a blank line.
    Paragraph(Vec<Run>),
}

impl DocBlock {
    fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        DocBlock::Heading {
            level,
            text: text.into(),
        }
    }

    fn text(text: impl Into<String>) -> Self {
        DocBlock::Paragraph(vec![Run::plain(text)])
    }

    fn blank() -> Self {
        DocBlock::Paragraph(Vec::new())
    }

    /// Concatenated text, for assertions and logging.
    pub fn text_content(&self) -> String {
        match self {
            DocBlock::Heading { text, .. } => text.clone(),
            DocBlock::Paragraph(runs) => runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }
}

fn date_range(start: &str, end: &str) -> String {
    format!("  {start} - {end}")
}

/// Ordered Word blocks for `resume`.
pub fn docx_blocks(resume: &Resume) -> Vec<DocBlock> {
    let info = &resume.personal_info;
    let mut blocks = vec![
        DocBlock::heading(HeadingLevel::One, info.full_name.to_uppercase()),
        DocBlock::text(format!("{} | {} | {}", info.email, info.phone, info.location)),
        DocBlock::blank(),
        DocBlock::heading(HeadingLevel::Two, "SUMMARY"),
        DocBlock::text(&info.summary),
        DocBlock::blank(),
        DocBlock::heading(HeadingLevel::Two, "EXPERIENCE"),
    ];

    for exp in &resume.experience {
        blocks.push(DocBlock::Paragraph(vec![
            Run::plain(&exp.company).bold().size(24),
            Run::plain(date_range(&exp.start_date, &exp.end_date)).italic(),
        ]));
        blocks.push(DocBlock::Paragraph(vec![Run::plain(&exp.role).italic()]));
        // One paragraph per description line; Word drops bare newlines in runs.
        for line in exp.description.split('\n') {
            blocks.push(DocBlock::text(line.trim_end_matches('\r')));
        }
        blocks.push(DocBlock::blank());
    }

    blocks.push(DocBlock::heading(HeadingLevel::Two, "EDUCATION"));
    for edu in &resume.education {
        blocks.push(DocBlock::Paragraph(vec![
            Run::plain(&edu.school).bold().size(24),
            Run::plain(date_range(&edu.start_date, &edu.end_date)).italic(),
        ]));
        blocks.push(DocBlock::Paragraph(vec![Run::plain(&edu.degree).italic()]));
        blocks.push(DocBlock::blank());
    }

    blocks.push(DocBlock::heading(HeadingLevel::Two, "SKILLS"));
    blocks.push(DocBlock::text(resume.skills.join(", ")));
    blocks.push(DocBlock::blank());

    blocks.push(DocBlock::heading(HeadingLevel::Two, "PROJECTS"));
    for proj in &resume.projects {
        let mut title = vec![Run::plain(&proj.name).bold().size(24)];
        if let Some(link) = &proj.link {
            title.push(Run::plain(format!("  {link}")).italic());
        }
        blocks.push(DocBlock::Paragraph(title));
        blocks.push(DocBlock::text(&proj.description));
        blocks.push(DocBlock::Paragraph(vec![
            Run::plain(format!("Technologies: {}", proj.technologies)).italic(),
        ]));
        blocks.push(DocBlock::blank());
    }

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Packaging
// ────────────────────────────────────────────────────────────────────────────

pub trait DocxAssembler: Send + Sync {
    fn assemble(&self, blocks: &[DocBlock]) -> Result<Bytes, DocxError>;
}

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/>
    <w:pPr><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr>
    <w:rPr><w:b/><w:sz w:val="32"/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading2">
    <w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/>
    <w:pPr><w:spacing w:before="200" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr>
    <w:rPr><w:b/><w:sz w:val="26"/></w:rPr>
  </w:style>
</w:styles>"#;

/// Writes `word/document.xml` for `blocks`.
pub fn document_xml(blocks: &[DocBlock]) -> Result<Vec<u8>, DocxError> {
    let mut w = Writer::new(Vec::new());
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", W_NS));
    w.write_event(Event::Start(root))?;
    w.write_event(Event::Start(BytesStart::new("w:body")))?;

    for block in blocks {
        w.write_event(Event::Start(BytesStart::new("w:p")))?;
        match block {
            DocBlock::Heading { level, text } => {
                w.write_event(Event::Start(BytesStart::new("w:pPr")))?;
                let mut style = BytesStart::new("w:pStyle");
                style.push_attribute(("w:val", level.style_id()));
                w.write_event(Event::Empty(style))?;
                w.write_event(Event::End(BytesEnd::new("w:pPr")))?;
                write_run(&mut w, &Run::plain(text.as_str()))?;
            }
            DocBlock::Paragraph(runs) => {
                for run in runs {
                    write_run(&mut w, run)?;
                }
            }
        }
        w.write_event(Event::End(BytesEnd::new("w:p")))?;
    }

    // A4 portrait, one-inch margins (twentieths of a point).
    w.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    let mut size = BytesStart::new("w:pgSz");
    size.push_attribute(("w:w", "11906"));
    size.push_attribute(("w:h", "16838"));
    w.write_event(Event::Empty(size))?;
    let mut margins = BytesStart::new("w:pgMar");
    for side in ["w:top", "w:right", "w:bottom", "w:left"] {
        margins.push_attribute((side, "1440"));
    }
    w.write_event(Event::Empty(margins))?;
    w.write_event(Event::End(BytesEnd::new("w:sectPr")))?;

    w.write_event(Event::End(BytesEnd::new("w:body")))?;
    w.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(w.into_inner())
}

fn write_run(w: &mut Writer<Vec<u8>>, run: &Run) -> Result<(), DocxError> {
    w.write_event(Event::Start(BytesStart::new("w:r")))?;
    if run.bold || run.italic || run.half_points.is_some() {
        w.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if run.bold {
            w.write_event(Event::Empty(BytesStart::new("w:b")))?;
        }
        if run.italic {
            w.write_event(Event::Empty(BytesStart::new("w:i")))?;
        }
        if let Some(half_points) = run.half_points {
            let value = half_points.to_string();
            let mut sz = BytesStart::new("w:sz");
            sz.push_attribute(("w:val", value.as_str()));
            w.write_event(Event::Empty(sz))?;
        }
        w.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }
    let mut t = BytesStart::new("w:t");
    t.push_attribute(("xml:space", "preserve"));
    w.write_event(Event::Start(t))?;
    w.write_event(Event::Text(BytesText::new(&xml_safe(&run.text))))?;
    w.write_event(Event::End(BytesEnd::new("w:t")))?;
    w.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// XML 1.0 has no escape for most C0 controls or U+FFFE/U+FFFF; they become
/// spaces so text pasted from PDFs still yields a readable part.
fn xml_safe(text: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
    }
    if text.chars().all(allowed) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().map(|c| if allowed(c) { c } else { ' ' }).collect())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OoxmlDocx;

impl DocxAssembler for OoxmlDocx {
    fn assemble(&self, blocks: &[DocBlock]) -> Result<Bytes, DocxError> {
        let document = document_xml(blocks)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(CONTENT_TYPES_XML.as_bytes())?;
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(ROOT_RELS_XML.as_bytes())?;
        zip.start_file("word/_rels/document.xml.rels", options)?;
        zip.write_all(DOCUMENT_RELS_XML.as_bytes())?;
        zip.start_file("word/styles.xml", options)?;
        zip.write_all(STYLES_XML.as_bytes())?;
        zip.start_file("word/document.xml", options)?;
        zip.write_all(&document)?;

        let cursor = zip.finish()?;
        Ok(Bytes::from(cursor.into_inner()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
