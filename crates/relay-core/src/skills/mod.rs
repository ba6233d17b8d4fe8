//! Skill discovery and loading
//!
//! Skills are filesystem-based instruction modules: a directory containing a
//! `SKILL.md` with YAML frontmatter (metadata) and a markdown body
//! (instructions), plus optional files under `resources/`.

mod parser;
mod registry;

use std::path::PathBuf;

use thiserror::Error;

pub use parser::{load_instructions, load_metadata, load_resource};
pub use registry::SkillRegistry;

/// Name of the manifest file every skill directory must contain
pub const SKILL_FILENAME: &str = "SKILL.md";

/// Environment variable overriding the default skills root
pub const SKILLS_ROOT_ENV: &str = "RELAY_SKILLS_ROOT";

/// Level 1 metadata parsed from a skill's frontmatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMetadata {
    /// Unique skill name (frontmatter `name`)
    pub name: String,
    /// Short description (frontmatter `description`)
    pub description: String,
    /// Routing hint phrases (frontmatter `hints`, empty when absent)
    pub hints: Vec<String>,
    /// Directory the skill was loaded from
    pub path: PathBuf,
}

/// Errors from skill parsing and loading
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("no SKILL.md in {}", .0.display())]
    NotFound(PathBuf),

    #[error("no YAML frontmatter found in {}", .0.display())]
    MissingFrontmatter(PathBuf),

    #[error("unclosed YAML frontmatter in {}", .0.display())]
    UnclosedFrontmatter(PathBuf),

    #[error("invalid frontmatter in {}: {source}", .path.display())]
    InvalidFrontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("missing or invalid '{field}' in {}", .path.display())]
    MissingField { field: &'static str, path: PathBuf },

    #[error("unknown skill '{0}'")]
    UnknownSkill(String),

    #[error("path traversal blocked: '{reference}' resolves outside {}", .root.display())]
    TraversalBlocked { reference: String, root: PathBuf },

    #[error("resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SkillResult<T> = Result<T, SkillError>;
