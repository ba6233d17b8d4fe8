//! Skill registry - directory discovery and routing projection

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::Logger;
use crate::types::RoutingTarget;

use super::{load_instructions, load_metadata, load_resource, SkillMetadata, SkillResult};
use super::{SkillError, SKILLS_ROOT_ENV, SKILL_FILENAME};

/// Registry of skills discovered from a filesystem root
///
/// One subdirectory with a SKILL.md per skill. Malformed skills are skipped
/// with a warning rather than failing discovery.
#[derive(Debug, Default)]
pub struct SkillRegistry {
    skills: BTreeMap<String, SkillMetadata>,
}

impl SkillRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            skills: BTreeMap::new(),
        }
    }

    /// Default skills root: `$RELAY_SKILLS_ROOT`, else `~/.relay/skills`
    pub fn default_root() -> PathBuf {
        if let Ok(root) = std::env::var(SKILLS_ROOT_ENV) {
            return PathBuf::from(root);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".relay")
            .join("skills")
    }

    /// Scan `root` for skill directories and parse each SKILL.md
    ///
    /// A missing root yields an empty registry. Directories without a
    /// SKILL.md are ignored; malformed skills are logged and skipped.
    pub fn discover(root: &Path, logger: &dyn Logger) -> Self {
        let mut skills = BTreeMap::new();
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(_) => return Self { skills },
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        for dir in dirs {
            if !dir.join(SKILL_FILENAME).is_file() {
                continue;
            }
            match load_metadata(&dir) {
                Ok(meta) => {
                    skills.insert(meta.name.clone(), meta);
                }
                Err(err) => {
                    logger.warn(&format!("skipping skill in {}: {}", dir.display(), err));
                }
            }
        }

        Self { skills }
    }

    /// Look up a skill by name
    pub fn get(&self, name: &str) -> Option<&SkillMetadata> {
        self.skills.get(name)
    }

    /// Discovered skill names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.skills.keys().map(String::as_str).collect()
    }

    /// Iterate over skills in name order
    pub fn iter(&self) -> impl Iterator<Item = &SkillMetadata> {
        self.skills.values()
    }

    /// Number of discovered skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether discovery found no skills
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Load the instruction body of a named skill
    pub fn load_instructions(&self, name: &str) -> SkillResult<String> {
        let meta = self
            .get(name)
            .ok_or_else(|| SkillError::UnknownSkill(name.to_string()))?;
        load_instructions(&meta.path)
    }

    /// Load a resource file of a named skill
    pub fn load_resource(&self, name: &str, reference: &str) -> SkillResult<String> {
        let meta = self
            .get(name)
            .ok_or_else(|| SkillError::UnknownSkill(name.to_string()))?;
        load_resource(&meta.path, reference)
    }

    /// Project skills into skill-typed routing targets, sorted by name
    pub fn targets(&self) -> Vec<RoutingTarget> {
        self.skills
            .values()
            .map(|meta| RoutingTarget::skill(&meta.name, &meta.description, meta.hints.clone()))
            .collect()
    }
}
