//! Document edits. Each operation borrows the current `Resume` and returns the
//! next one; the input is never touched.
//!
//! Edits addressed to an id that is not in the collection return an unchanged
//! copy. Removing the same id twice is therefore harmless.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{EducationItem, ExperienceItem, ItemId, ProjectItem, Resume};

// ────────────────────────────────────────────────────────────────────────────
// Field selectors
// ────────────────────────────────────────────────────────────────────────────

/// One of the free-text fields of `PersonalInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Role,
    Email,
    Phone,
    Location,
    Linkedin,
    Github,
    Portfolio,
    Summary,
}

impl PersonalField {
    pub const ALL: [PersonalField; 9] = [
        PersonalField::FullName,
        PersonalField::Role,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Linkedin,
        PersonalField::Github,
        PersonalField::Portfolio,
        PersonalField::Summary,
    ];

    /// The field's name as the editor form knows it.
    pub fn name(self) -> &'static str {
        match self {
            PersonalField::FullName => "fullName",
            PersonalField::Role => "role",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Linkedin => "linkedin",
            PersonalField::Github => "github",
            PersonalField::Portfolio => "portfolio",
            PersonalField::Summary => "summary",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown personal field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for PersonalField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonalField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A single field assignment on an experience item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ExperienceEdit {
    Company(String),
    Role(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EducationEdit {
    School(String),
    Degree(String),
    StartDate(String),
    EndDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ProjectEdit {
    Name(String),
    Description(String),
    Technologies(String),
    Link(Option<String>),
}

impl ExperienceEdit {
    fn apply(self, item: &mut ExperienceItem) {
        match self {
            ExperienceEdit::Company(v) => item.company = v,
            ExperienceEdit::Role(v) => item.role = v,
            ExperienceEdit::StartDate(v) => item.start_date = v,
            ExperienceEdit::EndDate(v) => item.end_date = v,
            ExperienceEdit::Current(v) => item.current = v,
            ExperienceEdit::Description(v) => item.description = v,
        }
    }
}

impl EducationEdit {
    fn apply(self, item: &mut EducationItem) {
        match self {
            EducationEdit::School(v) => item.school = v,
            EducationEdit::Degree(v) => item.degree = v,
            EducationEdit::StartDate(v) => item.start_date = v,
            EducationEdit::EndDate(v) => item.end_date = v,
        }
    }
}

impl ProjectEdit {
    fn apply(self, item: &mut ProjectItem) {
        match self {
            ProjectEdit::Name(v) => item.name = v,
            ProjectEdit::Description(v) => item.description = v,
            ProjectEdit::Technologies(v) => item.technologies = v,
            ProjectEdit::Link(v) => item.link = v,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Id allocation
// ────────────────────────────────────────────────────────────────────────────

/// Returns an id not present in `taken`.
pub fn fresh_id<'a>(taken: impl Iterator<Item = &'a ItemId> + Clone) -> ItemId {
    loop {
        let candidate = ItemId::random();
        if !taken.clone().any(|id| *id == candidate) {
            return candidate;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

impl Resume {
    pub fn personal_field(&self, field: PersonalField) -> &str {
        let p = &self.personal_info;
        match field {
            PersonalField::FullName => &p.full_name,
            PersonalField::Role => &p.role,
            PersonalField::Email => &p.email,
            PersonalField::Phone => &p.phone,
            PersonalField::Location => &p.location,
            PersonalField::Linkedin => &p.linkedin,
            PersonalField::Github => &p.github,
            PersonalField::Portfolio => &p.portfolio,
            PersonalField::Summary => &p.summary,
        }
    }

    pub fn set_personal_field(&self, field: PersonalField, value: impl Into<String>) -> Resume {
        let mut next = self.clone();
        let p = &mut next.personal_info;
        let slot = match field {
            PersonalField::FullName => &mut p.full_name,
            PersonalField::Role => &mut p.role,
            PersonalField::Email => &mut p.email,
            PersonalField::Phone => &mut p.phone,
            PersonalField::Location => &mut p.location,
            PersonalField::Linkedin => &mut p.linkedin,
            PersonalField::Github => &mut p.github,
            PersonalField::Portfolio => &mut p.portfolio,
            PersonalField::Summary => &mut p.summary,
        };
        *slot = value.into();
        next
    }

    /// Prepends a placeholder experience item and returns its id.
    pub fn add_experience(&self) -> (Resume, ItemId) {
        let id = fresh_id(self.experience.iter().map(|e| &e.id));
        let item = ExperienceItem {
            id: id.clone(),
            company: "New Company".to_string(),
            role: "Role".to_string(),
            start_date: "2023".to_string(),
            end_date: "Present".to_string(),
            current: true,
            description: "Did some cool stuff.".to_string(),
        };
        let mut next = self.clone();
        next.experience.insert(0, item);
        (next, id)
    }

    pub fn update_experience(&self, id: &ItemId, edit: ExperienceEdit) -> Resume {
        let mut next = self.clone();
        if let Some(item) = next.experience.iter_mut().find(|e| &e.id == id) {
            edit.apply(item);
        }
        next
    }

    pub fn remove_experience(&self, id: &ItemId) -> Resume {
        let mut next = self.clone();
        next.experience.retain(|e| &e.id != id);
        next
    }

    pub fn add_education(&self) -> (Resume, ItemId) {
        let id = fresh_id(self.education.iter().map(|e| &e.id));
        let item = EducationItem {
            id: id.clone(),
            school: "New School".to_string(),
            degree: "Degree".to_string(),
            start_date: "2019".to_string(),
            end_date: "2023".to_string(),
        };
        let mut next = self.clone();
        next.education.insert(0, item);
        (next, id)
    }

    pub fn update_education(&self, id: &ItemId, edit: EducationEdit) -> Resume {
        let mut next = self.clone();
        if let Some(item) = next.education.iter_mut().find(|e| &e.id == id) {
            edit.apply(item);
        }
        next
    }

    pub fn remove_education(&self, id: &ItemId) -> Resume {
        let mut next = self.clone();
        next.education.retain(|e| &e.id != id);
        next
    }

    pub fn add_project(&self) -> (Resume, ItemId) {
        let id = fresh_id(self.projects.iter().map(|p| &p.id));
        let item = ProjectItem {
            id: id.clone(),
            name: "New Project".to_string(),
            description: "What it does.".to_string(),
            technologies: "Rust".to_string(),
            link: None,
        };
        let mut next = self.clone();
        next.projects.insert(0, item);
        (next, id)
    }

    pub fn update_project(&self, id: &ItemId, edit: ProjectEdit) -> Resume {
        let mut next = self.clone();
        if let Some(item) = next.projects.iter_mut().find(|p| &p.id == id) {
            edit.apply(item);
        }
        next
    }

    pub fn remove_project(&self, id: &ItemId) -> Resume {
        let mut next = self.clone();
        next.projects.retain(|p| &p.id != id);
        next
    }

    pub fn set_skills(&self, skills: Vec<String>) -> Resume {
        let mut next = self.clone();
        next.skills = skills;
        next
    }

    /// Splits comma-separated input into trimmed skills. Empty entries are kept
    /// so a trailing comma while typing does not eat the cursor position.
    pub fn set_skills_from_csv(&self, text: &str) -> Resume {
        self.set_skills(text.split(',').map(|s| s.trim().to_string()).collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
