//! The resume document: personal info plus the ordered experience, education,
//! skills and project collections.
//!
//! A `Resume` is a plain value. The editor never mutates one in place; every
//! edit in `models::edits` produces a fresh `Resume` that replaces the old one.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Identity
// ────────────────────────────────────────────────────────────────────────────

/// Identity of an item inside one collection. Opaque: only compared, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// A random id. Callers that need uniqueness within a collection use
    /// `models::edits::fresh_id`, which re-rolls on collision.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub id: ItemId,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    /// Free text. Each line is one bullet.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub id: ItemId,
    pub school: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Comma-described stack, kept verbatim.
    pub technologies: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Seed document
// ────────────────────────────────────────────────────────────────────────────

/// The sample resume every session starts from.
pub fn seed_resume() -> Resume {
    Resume {
        personal_info: PersonalInfo {
            full_name: "Alex Chen".to_string(),
            role: "Senior Full Stack Engineer".to_string(),
            email: "alex.chen@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            linkedin: "linkedin.com/in/alexchen".to_string(),
            github: "github.com/alexchen".to_string(),
            portfolio: "alexchen.dev".to_string(),
            summary: "Product-minded software engineer with 6+ years of experience in building \
                scalable web applications. Expert in React, TypeScript, and Cloud Architecture. \
                Passionate about developer tooling and performance optimization."
                .to_string(),
        },
        experience: vec![
            ExperienceItem {
                id: ItemId::from("1"),
                company: "TechFlow Systems".to_string(),
                role: "Senior Frontend Engineer".to_string(),
                start_date: "2022-01".to_string(),
                end_date: "Present".to_string(),
                current: true,
                description: [
                    "• Led the migration of a legacy monolithic frontend to a micro-frontend \
                     architecture using React and Module Federation, reducing build times by 40%.",
                    "• Mentored 3 junior developers and established code review guidelines that \
                     improved code quality metrics by 25%.",
                    "• Implemented a design system using Tailwind CSS that standardized UI \
                     components across 5 different products.",
                ]
                .join("\n"),
            },
            ExperienceItem {
                id: ItemId::from("2"),
                company: "DataSphere Inc".to_string(),
                role: "Software Engineer".to_string(),
                start_date: "2019-06".to_string(),
                end_date: "2021-12".to_string(),
                current: false,
                description: [
                    "• Developed and maintained high-performance data visualization dashboards \
                     using D3.js and React, handling real-time data streams of 10k+ events/sec.",
                    "• Optimized application performance, improving First Contentful Paint (FCP) \
                     from 1.8s to 0.9s.",
                    "• Collaborated with product managers to define technical requirements for \
                     new features.",
                ]
                .join("\n"),
            },
        ],
        education: vec![EducationItem {
            id: ItemId::from("1"),
            school: "University of California, Berkeley".to_string(),
            degree: "B.S. Computer Science".to_string(),
            start_date: "2015-08".to_string(),
            end_date: "2019-05".to_string(),
        }],
        skills: [
            "JavaScript/TypeScript",
            "React",
            "Node.js",
            "Next.js",
            "GraphQL",
            "AWS",
            "Docker",
            "Kubernetes",
            "PostgreSQL",
            "System Design",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        projects: vec![ProjectItem {
            id: ItemId::from("1"),
            name: "OpenSource UI Lib".to_string(),
            description: "A lightweight, accessible UI component library for React.".to_string(),
            technologies: "React, TypeScript, Rollup, Storybook".to_string(),
            link: None,
        }],
    }
}
