//! ResuMotion: resume document model, template rendering, AI-assisted
//! rewriting and PDF/DOCX export.

pub mod assistant;
pub mod config;
pub mod editor;
pub mod export;
pub mod layout;
pub mod llm_client;
pub mod models;
pub mod render;
pub mod state;
