//! Minimalist ATS: one serif column, centred header, plain section rules.
//! Section order: summary, skills, experience, projects, education.

use crate::layout::FontFamily;
use crate::models::Resume;
use crate::render::page::{Align, Block, Page, Region, RegionKind, Rgb, Span, TextRole, Theme, Tone};
use crate::render::TemplateVariant;

const DATE_SEPARATOR: &str = " – ";
const CONTACT_SEPARATOR: &str = " | ";

fn theme() -> Theme {
    Theme {
        body_font: FontFamily::Merriweather,
        heading_font: FontFamily::Merriweather,
        paper: Rgb::WHITE,
        ink: Rgb::BLACK,
        muted: Rgb(75, 85, 99),
        accent: Rgb(30, 64, 175),
        inverse: Rgb::WHITE,
        rule: Rgb(209, 213, 219),
        chip: Rgb::WHITE,
        padding_pt: 30.0,
        column_gap_pt: 0.0,
    }
}

pub fn date_range(start: &str, end: &str) -> String {
    format!("{start}{DATE_SEPARATOR}{end}")
}

/// Links are written without a scheme in the form; the page links them over https.
fn separated(values: &[&str], sep: &str) -> Vec<Span> {
    let mut spans = Vec::with_capacity(values.len() * 2);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            spans.push(Span::plain(sep));
        }
        spans.push(Span::plain(*value));
    }
    spans
}

fn section(title: &str) -> [Block; 2] {
    [
        Block::text(
            TextRole::SectionHeading,
            vec![Span::plain(title).bold().upper()],
        ),
        Block::Rule,
    ]
}

pub fn render(resume: &Resume) -> Page {
    let info = &resume.personal_info;
    let mut body = Region::new(RegionKind::Main, 12);

    body.push(Block::aligned(
        TextRole::Name,
        Align::Center,
        vec![Span::plain(&info.full_name).bold().upper()],
    ));
    body.push(Block::aligned(
        TextRole::Tagline,
        Align::Center,
        vec![Span::plain(&info.role).italic()],
    ));
    body.push(Block::aligned(
        TextRole::Contact,
        Align::Center,
        separated(
            &[
                info.location.as_str(),
                info.phone.as_str(),
                info.email.as_str(),
            ],
            CONTACT_SEPARATOR,
        ),
    ));
    let links: Vec<Span> = [&info.linkedin, &info.github, &info.portfolio]
        .into_iter()
        .enumerate()
        .flat_map(|(i, value)| {
            let link = Span::plain(value.as_str()).tone(Tone::Accent).link(value);
            if i == 0 {
                vec![link]
            } else {
                vec![Span::plain("   "), link]
            }
        })
        .collect();
    body.push(Block::aligned(TextRole::Contact, Align::Center, links));
    body.push(Block::Rule);

    body.extend(section("Professional Summary"));
    body.push(Block::aligned(
        TextRole::Body,
        Align::Justify,
        vec![Span::plain(&info.summary)],
    ));
    body.push(Block::Gap);

    body.extend(section("Technical Skills"));
    body.push(Block::text(
        TextRole::Body,
        vec![
            Span::plain("Languages & Tools: ").bold(),
            Span::plain(resume.skills.join(", ")),
        ],
    ));
    body.push(Block::Gap);

    body.extend(section("Work Experience"));
    for exp in &resume.experience {
        body.push(Block::Row {
            role: TextRole::ItemTitle,
            left: vec![Span::plain(&exp.company).bold()],
            right: vec![Span::plain(date_range(&exp.start_date, &exp.end_date)).italic()],
        });
        body.push(Block::text(
            TextRole::Meta,
            vec![Span::plain(&exp.role).semibold()],
        ));
        body.push(Block::text(
            TextRole::Body,
            vec![Span::plain(&exp.description)],
        ));
        body.push(Block::Gap);
    }

    body.extend(section("Projects"));
    for proj in &resume.projects {
        let mut title = vec![Span::plain(&proj.name).bold()];
        if let Some(link) = &proj.link {
            title.push(Span::plain("  "));
            title.push(Span::plain(link).tone(Tone::Accent).link(link));
        }
        body.push(Block::text(TextRole::ItemTitle, title));
        body.push(Block::text(TextRole::Body, vec![Span::plain(&proj.description)]));
        body.push(Block::text(
            TextRole::Caption,
            vec![
                Span::plain("Tech Stack: ").italic().tone(Tone::Muted),
                Span::plain(&proj.technologies).italic().tone(Tone::Muted),
            ],
        ));
    }
    body.push(Block::Gap);

    body.extend(section("Education"));
    for edu in &resume.education {
        body.push(Block::Row {
            role: TextRole::ItemTitle,
            left: vec![Span::plain(&edu.school).bold()],
            right: vec![Span::plain(date_range(&edu.start_date, &edu.end_date))],
        });
        body.push(Block::text(TextRole::Meta, vec![Span::plain(&edu.degree)]));
    }

    Page {
        variant: TemplateVariant::MinimalistAts,
        theme: theme(),
        banner: None,
        columns: vec![body],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_resume;

    #[test]
    fn test_single_full_width_column() {
        let page = render(&seed_resume());
        assert_eq!(page.columns.len(), 1);
        assert_eq!(page.columns[0].span, 12);
    }

    #[test]
    fn test_contact_line_uses_pipes() {
        let text = render(&seed_resume()).plain_text();
        assert!(text.contains("San Francisco, CA | (555) 123-4567 | alex.chen@example.com"));
    }

    #[test]
    fn test_skills_joined_on_one_line() {
        let text = render(&seed_resume()).plain_text();
        assert!(text.contains("Languages & Tools: JavaScript/TypeScript, React, Node.js"));
    }

    #[test]
    fn test_section_order() {
        let text = render(&seed_resume()).plain_text();
        let order: Vec<usize> = [
            "Professional Summary",
            "Technical Skills",
            "Work Experience",
            "Projects",
            "Education",
        ]
        .iter()
        .map(|h| text.find(h).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_date_range_uses_en_dash() {
        let text = render(&seed_resume()).plain_text();
        assert!(text.contains("2015-08 – 2019-05"));
    }
}
