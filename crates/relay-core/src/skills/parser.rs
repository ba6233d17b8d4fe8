//! SKILL.md parsing: frontmatter metadata, instruction body, resources

use std::fs;
use std::path::{Component, Path};

use serde::Deserialize;

use super::{SkillError, SkillMetadata, SkillResult, SKILL_FILENAME};

/// Raw frontmatter shape; validation happens after deserialization so the
/// errors can name the offending field and file
#[derive(Debug, Deserialize)]
struct SkillFrontmatter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    hints: Option<Vec<String>>,
}

/// Split SKILL.md content into (frontmatter, body)
///
/// Frontmatter must open with `---` at the start of the file and close with
/// a second `---` on its own line.
fn split_frontmatter<'a>(content: &'a str, path: &Path) -> SkillResult<(&'a str, &'a str)> {
    let trimmed = content.trim_start_matches('\n');
    if !trimmed.starts_with("---") {
        return Err(SkillError::MissingFrontmatter(path.to_path_buf()));
    }

    let rest = &trimmed[3..];
    let close_idx = rest
        .find("\n---")
        .ok_or_else(|| SkillError::UnclosedFrontmatter(path.to_path_buf()))?;

    let frontmatter = &rest[..close_idx];
    let body = &rest[close_idx + 4..];
    Ok((frontmatter, body))
}

fn read_skill_file(skill_dir: &Path) -> SkillResult<(std::path::PathBuf, String)> {
    let skill_file = skill_dir.join(SKILL_FILENAME);
    if !skill_file.is_file() {
        return Err(SkillError::NotFound(skill_dir.to_path_buf()));
    }
    let content = fs::read_to_string(&skill_file)?;
    Ok((skill_file, content))
}

/// Parse the Level 1 metadata from a skill directory's SKILL.md
pub fn load_metadata(skill_dir: &Path) -> SkillResult<SkillMetadata> {
    let (skill_file, content) = read_skill_file(skill_dir)?;
    let (frontmatter, _body) = split_frontmatter(&content, &skill_file)?;

    let fm: SkillFrontmatter =
        serde_yaml::from_str(frontmatter).map_err(|source| SkillError::InvalidFrontmatter {
            path: skill_file.clone(),
            source,
        })?;

    let name = fm
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(SkillError::MissingField {
            field: "name",
            path: skill_file.clone(),
        })?;
    let description = fm
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or(SkillError::MissingField {
            field: "description",
            path: skill_file.clone(),
        })?;

    Ok(SkillMetadata {
        name,
        description,
        hints: fm.hints.unwrap_or_default(),
        path: skill_dir.to_path_buf(),
    })
}

/// Return the Level 2 instruction body (everything after the closing
/// frontmatter fence), trimmed
pub fn load_instructions(skill_dir: &Path) -> SkillResult<String> {
    let (skill_file, content) = read_skill_file(skill_dir)?;
    let (_frontmatter, body) = split_frontmatter(&content, &skill_file)?;
    Ok(body.trim().to_string())
}

/// Read a Level 3 resource file from `<skill_dir>/resources/<reference>`
///
/// The reference must stay inside `resources/`: absolute references and any
/// `..` component are rejected before touching the filesystem.
pub fn load_resource(skill_dir: &Path, reference: &str) -> SkillResult<String> {
    let resources_root = skill_dir.join("resources");
    let ref_path = Path::new(reference);

    let escapes = ref_path.is_absolute()
        || ref_path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
    if escapes {
        return Err(SkillError::TraversalBlocked {
            reference: reference.to_string(),
            root: resources_root,
        });
    }

    let target = resources_root.join(ref_path);
    if !target.is_file() {
        return Err(SkillError::ResourceNotFound(target));
    }
    Ok(fs::read_to_string(&target)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SKILL_MD: &str = "\
---
name: test-skill
description: A test skill for unit tests
hints:
  - test keyword
  - another hint
---

These are the skill instructions.
They span multiple lines.
";

    const NO_HINTS_SKILL_MD: &str = "\
---
name: no-hints
description: Skill without hints
---

Instructions for a skill with no hints.
";

    const MISSING_NAME_SKILL_MD: &str = "\
---
description: Missing name
---

Body.
";

    fn write_skill(dir: &Path, content: &str) {
        fs::write(dir.join(SKILL_FILENAME), content).unwrap();
    }

    #[test]
    fn test_load_metadata_valid() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), VALID_SKILL_MD);

        let meta = load_metadata(dir.path()).unwrap();
        assert_eq!(meta.name, "test-skill");
        assert_eq!(meta.description, "A test skill for unit tests");
        assert_eq!(meta.hints, vec!["test keyword", "another hint"]);
        assert_eq!(meta.path, dir.path());
    }

    #[test]
    fn test_load_metadata_no_hints_defaults_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), NO_HINTS_SKILL_MD);

        let meta = load_metadata(dir.path()).unwrap();
        assert_eq!(meta.name, "no-hints");
        assert!(meta.hints.is_empty());
    }

    #[test]
    fn test_load_metadata_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_metadata(dir.path()),
            Err(SkillError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_metadata_missing_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "Just a body with no frontmatter.\n");
        assert!(matches!(
            load_metadata(dir.path()),
            Err(SkillError::MissingFrontmatter(_))
        ));
    }

    #[test]
    fn test_load_metadata_unclosed_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "---\nname: broken\ndescription: Unclosed\n");
        assert!(matches!(
            load_metadata(dir.path()),
            Err(SkillError::UnclosedFrontmatter(_))
        ));
    }

    #[test]
    fn test_load_metadata_missing_name() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), MISSING_NAME_SKILL_MD);

        let err = load_metadata(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            SkillError::MissingField { field: "name", .. }
        ));
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_load_instructions_body_only() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), VALID_SKILL_MD);

        let body = load_instructions(dir.path()).unwrap();
        assert!(body.contains("These are the skill instructions."));
        assert!(body.contains("They span multiple lines."));
        assert!(!body.contains("name:"));
        assert!(!body.contains("description:"));
    }

    #[test]
    fn test_load_resource() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), VALID_SKILL_MD);
        let resources = dir.path().join("resources");
        fs::create_dir(&resources).unwrap();
        fs::write(resources.join("template.md"), "Template content here.").unwrap();

        let content = load_resource(dir.path(), "template.md").unwrap();
        assert_eq!(content, "Template content here.");
    }

    #[test]
    fn test_load_resource_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), VALID_SKILL_MD);
        fs::create_dir(dir.path().join("resources")).unwrap();

        assert!(matches!(
            load_resource(dir.path(), "nonexistent.md"),
            Err(SkillError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn test_load_resource_traversal_blocked() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), VALID_SKILL_MD);

        assert!(matches!(
            load_resource(dir.path(), "../../../etc/passwd"),
            Err(SkillError::TraversalBlocked { .. })
        ));
        // Escaping into the skill dir itself (above resources/) is blocked too
        assert!(matches!(
            load_resource(dir.path(), "../SKILL.md"),
            Err(SkillError::TraversalBlocked { .. })
        ));
    }
}
