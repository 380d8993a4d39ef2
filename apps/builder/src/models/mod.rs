pub mod edits;
pub mod resume;

pub use edits::{EducationEdit, ExperienceEdit, PersonalField, ProjectEdit};
pub use resume::{
    seed_resume, EducationItem, ExperienceItem, ItemId, PersonalInfo, ProjectItem, Resume,
};
