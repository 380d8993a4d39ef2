//! Modern Tech: 4/8 two-column grid, grotesk display name, indigo accents.

use crate::layout::FontFamily;
use crate::models::Resume;
use crate::render::page::{Block, Page, Region, RegionKind, Rgb, Span, TextRole, Theme, Tone};
use crate::render::TemplateVariant;

const DATE_SEPARATOR: &str = " — ";

fn theme() -> Theme {
    Theme {
        body_font: FontFamily::Inter,
        heading_font: FontFamily::SpaceGrotesk,
        paper: Rgb::WHITE,
        ink: Rgb(30, 41, 59),
        muted: Rgb(148, 163, 184),
        accent: Rgb(79, 70, 229),
        inverse: Rgb::WHITE,
        rule: Rgb(226, 232, 240),
        chip: Rgb(241, 245, 249),
        padding_pt: 24.0,
        column_gap_pt: 24.0,
    }
}

pub fn date_range(start: &str, end: &str) -> String {
    format!("{start}{DATE_SEPARATOR}{end}")
}

fn section(title: &str) -> [Block; 2] {
    [
        Block::text(
            TextRole::SectionHeading,
            vec![Span::plain(title).bold().upper().tone(Tone::Muted)],
        ),
        Block::Rule,
    ]
}

pub fn render(resume: &Resume) -> Page {
    let info = &resume.personal_info;

    let mut side = Region::new(RegionKind::Sidebar, 4).with_divider();
    side.push(Block::text(
        TextRole::Name,
        vec![Span::plain(&info.full_name).bold().upper()],
    ));
    side.push(Block::text(
        TextRole::Tagline,
        vec![Span::plain(&info.role).semibold().upper().tone(Tone::Accent)],
    ));
    side.push(Block::Gap);
    for value in [
        &info.email,
        &info.phone,
        &info.location,
        &info.linkedin,
        &info.github,
        &info.portfolio,
    ] {
        side.push(Block::text(
            TextRole::Contact,
            vec![Span::plain(value).tone(Tone::Muted)],
        ));
    }

    side.push(Block::Gap);
    side.extend(section("Skills"));
    side.push(Block::Chips {
        items: resume.skills.clone(),
        tone: Tone::Ink,
    });

    side.push(Block::Gap);
    side.extend(section("Education"));
    for edu in &resume.education {
        side.push(Block::text(
            TextRole::ItemTitle,
            vec![Span::plain(&edu.school).bold()],
        ));
        side.push(Block::text(TextRole::Meta, vec![Span::plain(&edu.degree)]));
        side.push(Block::text(
            TextRole::Caption,
            vec![Span::plain(date_range(&edu.start_date, &edu.end_date)).tone(Tone::Muted)],
        ));
    }

    let mut main = Region::new(RegionKind::Main, 8);
    main.push(Block::text(
        TextRole::SectionHeading,
        vec![Span::plain("Profile").bold().upper().tone(Tone::Muted)],
    ));
    main.push(Block::text(TextRole::Body, vec![Span::plain(&info.summary)]));

    main.push(Block::Gap);
    main.extend(section("Experience"));
    for exp in &resume.experience {
        main.push(Block::Row {
            role: TextRole::ItemTitle,
            left: vec![Span::plain(&exp.role).bold()],
            right: vec![Span::plain(date_range(&exp.start_date, &exp.end_date))
                .mono()
                .tone(Tone::Muted)],
        });
        main.push(Block::text(
            TextRole::Meta,
            vec![Span::plain(&exp.company).semibold().tone(Tone::Accent)],
        ));
        main.push(Block::text(
            TextRole::Body,
            vec![Span::plain(&exp.description)],
        ));
        main.push(Block::Gap);
    }

    main.extend(section("Projects"));
    for proj in &resume.projects {
        main.push(Block::text(
            TextRole::ItemTitle,
            vec![Span::plain(&proj.name).bold()],
        ));
        main.push(Block::text(
            TextRole::Caption,
            vec![Span::plain(&proj.description)],
        ));
        main.push(Block::text(
            TextRole::Caption,
            vec![Span::plain(&proj.technologies).mono().tone(Tone::Muted)],
        ));
        if let Some(link) = &proj.link {
            main.push(Block::text(
                TextRole::Caption,
                vec![Span::plain(link).tone(Tone::Accent).link(link)],
            ));
        }
    }

    Page {
        variant: TemplateVariant::ModernTech,
        theme: theme(),
        banner: None,
        columns: vec![side, main],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_resume;

    #[test]
    fn test_two_columns_four_and_eight() {
        let page = render(&seed_resume());
        let spans: Vec<u8> = page.columns.iter().map(|c| c.span).collect();
        assert_eq!(spans, [4, 8]);
        assert!(page.banner.is_none());
        assert!(page.columns[0].divider);
    }

    #[test]
    fn test_name_is_uppercased_as_presentation_only() {
        let page = render(&seed_resume());
        match &page.columns[0].blocks[0] {
            Block::Text { spans, .. } => {
                assert_eq!(spans[0].text, "Alex Chen");
                assert_eq!(spans[0].display_text(), "ALEX CHEN");
            }
            other => panic!("expected name text block, got {other:?}"),
        }
    }

    #[test]
    fn test_date_range_uses_em_dash() {
        assert_eq!(date_range("2019-06", "2021-12"), "2019-06 — 2021-12");
        let text = render(&seed_resume()).plain_text();
        assert!(text.contains("2022-01 — Present"));
    }
}
