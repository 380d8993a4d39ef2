//! Template rendering: `Resume` + `TemplateVariant` → `Page`.
//!
//! Rendering is a pure function. Each variant lives in its own module and owns
//! its formatting rules (date separators, casing, section order). All three show
//! the same content; only the arrangement differs.

pub mod executive_suite;
pub mod html;
pub mod minimalist_ats;
pub mod modern_tech;
pub mod page;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Resume;

pub use page::{Block, Page, Region, RegionKind, Rgb, Span, TextRole, Theme, Tone};

/// The closed set of visual layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariant {
    /// Two columns: contact, skills and education on the left; story on the right.
    #[default]
    ModernTech,
    /// Single serif column, centred header. Parses cleanly in applicant trackers.
    MinimalistAts,
    /// Dark banner header over a 2:1 main/sidebar split.
    ExecutiveSuite,
}

impl TemplateVariant {
    /// Selector order.
    pub const ALL: [TemplateVariant; 3] = [
        TemplateVariant::ModernTech,
        TemplateVariant::MinimalistAts,
        TemplateVariant::ExecutiveSuite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TemplateVariant::ModernTech => "Modern Tech",
            TemplateVariant::MinimalistAts => "Minimalist ATS",
            TemplateVariant::ExecutiveSuite => "Executive Suite",
        }
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown template '{0}' (expected one of: Modern Tech, Minimalist ATS, Executive Suite)")]
pub struct UnknownTemplate(pub String);

impl FromStr for TemplateVariant {
    type Err = UnknownTemplate;

    /// Accepts the display label or a kebab/snake-case name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        TemplateVariant::ALL
            .into_iter()
            .find(|v| {
                let label: String = v
                    .label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                label == key
            })
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

/// Renders `resume` with the chosen layout.
pub fn render(resume: &Resume, variant: TemplateVariant) -> Page {
    match variant {
        TemplateVariant::ModernTech => modern_tech::render(resume),
        TemplateVariant::MinimalistAts => minimalist_ats::render(resume),
        TemplateVariant::ExecutiveSuite => executive_suite::render(resume),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{seed_resume, ExperienceItem, ItemId, ProjectItem};

    /// Every non-empty text value in the document.
    fn field_values(resume: &Resume) -> Vec<String> {
        let p = &resume.personal_info;
        let mut values = vec![
            p.full_name.clone(),
            p.role.clone(),
            p.email.clone(),
            p.phone.clone(),
            p.location.clone(),
            p.linkedin.clone(),
            p.github.clone(),
            p.portfolio.clone(),
            p.summary.clone(),
        ];
        for e in &resume.experience {
            values.extend([
                e.company.clone(),
                e.role.clone(),
                e.start_date.clone(),
                e.end_date.clone(),
                e.description.clone(),
            ]);
        }
        for e in &resume.education {
            values.extend([
                e.school.clone(),
                e.degree.clone(),
                e.start_date.clone(),
                e.end_date.clone(),
            ]);
        }
        values.extend(resume.skills.iter().cloned());
        for p in &resume.projects {
            values.extend([p.name.clone(), p.description.clone(), p.technologies.clone()]);
            values.extend(p.link.clone());
        }
        values.retain(|v| !v.is_empty());
        values
    }

    fn rich_resume() -> Resume {
        let mut resume = seed_resume();
        resume.projects.push(ProjectItem {
            id: ItemId::from("2"),
            name: "Ledger".to_string(),
            description: "Double-entry bookkeeping engine.".to_string(),
            technologies: "Rust, SQLite".to_string(),
            link: Some("github.com/alexchen/ledger".to_string()),
        });
        resume
    }

    #[test]
    fn test_every_variant_shows_every_field() {
        let resume = rich_resume();
        for variant in TemplateVariant::ALL {
            let text = render(&resume, variant).plain_text();
            for value in field_values(&resume) {
                assert!(
                    text.contains(&value),
                    "{variant} is missing {value:?} in:\n{text}"
                );
            }
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let resume = seed_resume();
        for variant in TemplateVariant::ALL {
            assert_eq!(render(&resume, variant), render(&resume, variant));
        }
    }

    #[test]
    fn test_render_does_not_touch_document() {
        let resume = seed_resume();
        let before = resume.clone();
        for variant in TemplateVariant::ALL {
            let _ = render(&resume, variant);
        }
        assert_eq!(resume, before);
    }

    #[test]
    fn test_executive_suite_acme_scenario() {
        let resume = Resume {
            experience: vec![ExperienceItem {
                id: ItemId::from("1"),
                company: "Acme".to_string(),
                role: "Engineer".to_string(),
                start_date: "2020".to_string(),
                end_date: "2022".to_string(),
                current: false,
                description: "Built things.".to_string(),
            }],
            ..Resume::default()
        };
        let text = render(&resume, TemplateVariant::ExecutiveSuite).plain_text();
        for needle in ["Acme", "Engineer", "2020 - 2022", "Built things."] {
            assert!(text.contains(needle), "missing {needle:?} in:\n{text}");
        }
    }

    #[test]
    fn test_empty_document_renders_without_panicking() {
        for variant in TemplateVariant::ALL {
            let page = render(&Resume::default(), variant);
            assert_eq!(page.variant, variant);
            assert!(page.block_count() > 0, "section headings still render");
        }
    }

    #[test]
    fn test_experience_keeps_document_order() {
        let resume = seed_resume();
        for variant in TemplateVariant::ALL {
            let text = render(&resume, variant).plain_text();
            let first = text.find("TechFlow Systems").unwrap();
            let second = text.find("DataSphere Inc").unwrap();
            assert!(first < second, "{variant} reordered experience");
        }
    }

    #[test]
    fn test_variant_parses_labels_and_names() {
        assert_eq!("Modern Tech".parse(), Ok(TemplateVariant::ModernTech));
        assert_eq!("minimalist-ats".parse(), Ok(TemplateVariant::MinimalistAts));
        assert_eq!("executive_suite".parse(), Ok(TemplateVariant::ExecutiveSuite));
        assert!("Brutalist".parse::<TemplateVariant>().is_err());
    }

    #[test]
    fn test_variant_labels_in_selector_order() {
        let labels: Vec<&str> = TemplateVariant::ALL.iter().map(|v| v.label()).collect();
        assert_eq!(labels, ["Modern Tech", "Minimalist ATS", "Executive Suite"]);
    }
}
