//! Executive Suite: emerald banner header, 2:1 main/sidebar split, serif accents.

use crate::layout::FontFamily;
use crate::models::Resume;
use crate::render::page::{Align, Block, Page, Region, RegionKind, Rgb, Span, TextRole, Theme, Tone};
use crate::render::TemplateVariant;

const DATE_SEPARATOR: &str = " - ";
const CONTACT_SEPARATOR: &str = "  •  ";
const BANNER: Rgb = Rgb(6, 78, 59);

fn theme() -> Theme {
    Theme {
        body_font: FontFamily::Inter,
        heading_font: FontFamily::Merriweather,
        paper: Rgb::WHITE,
        ink: Rgb(31, 41, 55),
        muted: Rgb(75, 85, 99),
        accent: Rgb(4, 120, 87),
        inverse: Rgb(236, 253, 245),
        rule: BANNER,
        chip: Rgb(236, 253, 245),
        padding_pt: 30.0,
        column_gap_pt: 30.0,
    }
}

pub fn date_range(start: &str, end: &str) -> String {
    format!("{start}{DATE_SEPARATOR}{end}")
}

fn section(title: &str) -> [Block; 2] {
    [
        Block::text(
            TextRole::SectionHeading,
            vec![Span::plain(title).bold().upper().tone(Tone::Accent)],
        ),
        Block::Rule,
    ]
}

pub fn render(resume: &Resume) -> Page {
    let info = &resume.personal_info;

    let mut banner = Region::new(RegionKind::Banner, 12).with_fill(BANNER);
    banner.push(Block::text(
        TextRole::Name,
        vec![Span::plain(&info.full_name).bold().tone(Tone::Inverse)],
    ));
    banner.push(Block::text(
        TextRole::Tagline,
        vec![Span::plain(&info.role).upper().tone(Tone::Inverse)],
    ));
    let contacts = [
        &info.email,
        &info.phone,
        &info.location,
        &info.linkedin,
        &info.github,
        &info.portfolio,
    ];
    let mut contact_spans = Vec::with_capacity(contacts.len() * 2);
    for (i, value) in contacts.into_iter().enumerate() {
        if i > 0 {
            contact_spans.push(Span::plain(CONTACT_SEPARATOR).tone(Tone::Inverse));
        }
        contact_spans.push(Span::plain(value).tone(Tone::Inverse));
    }
    banner.push(Block::text(TextRole::Contact, contact_spans));

    let mut main = Region::new(RegionKind::Main, 8);
    main.extend(section("Executive Summary"));
    main.push(Block::aligned(
        TextRole::Body,
        Align::Justify,
        vec![Span::plain(&info.summary).tone(Tone::Muted)],
    ));
    main.push(Block::Gap);

    main.extend(section("Professional Experience"));
    for exp in &resume.experience {
        main.push(Block::Row {
            role: TextRole::ItemTitle,
            left: vec![Span::plain(&exp.company).bold()],
            right: vec![Span::plain(date_range(&exp.start_date, &exp.end_date))
                .semibold()
                .tone(Tone::Accent)],
        });
        main.push(Block::text(
            TextRole::Meta,
            vec![Span::plain(&exp.role).italic().tone(Tone::Muted)],
        ));
        main.push(Block::text(
            TextRole::Body,
            vec![Span::plain(&exp.description).tone(Tone::Muted)],
        ));
        main.push(Block::Gap);
    }

    let mut side = Region::new(RegionKind::Sidebar, 4);
    side.extend(section("Core Competencies"));
    side.push(Block::Chips {
        items: resume.skills.clone(),
        tone: Tone::Accent,
    });
    side.push(Block::Gap);

    side.extend(section("Education"));
    for edu in &resume.education {
        side.push(Block::text(
            TextRole::ItemTitle,
            vec![Span::plain(&edu.school).bold()],
        ));
        side.push(Block::text(
            TextRole::Meta,
            vec![Span::plain(&edu.degree).italic().tone(Tone::Muted)],
        ));
        side.push(Block::text(
            TextRole::Caption,
            vec![Span::plain(date_range(&edu.start_date, &edu.end_date)).tone(Tone::Muted)],
        ));
    }
    side.push(Block::Gap);

    side.extend(section("Projects"));
    for proj in &resume.projects {
        side.push(Block::text(
            TextRole::ItemTitle,
            vec![Span::plain(&proj.name).bold()],
        ));
        side.push(Block::text(
            TextRole::Caption,
            vec![Span::plain(&proj.description).tone(Tone::Muted)],
        ));
        side.push(Block::text(
            TextRole::Caption,
            vec![Span::plain(&proj.technologies).italic().tone(Tone::Muted)],
        ));
        if let Some(link) = &proj.link {
            side.push(Block::text(
                TextRole::Caption,
                vec![Span::plain(link).tone(Tone::Accent).link(link)],
            ));
        }
    }

    Page {
        variant: TemplateVariant::ExecutiveSuite,
        theme: theme(),
        banner: Some(banner),
        columns: vec![main, side],
    }
}
