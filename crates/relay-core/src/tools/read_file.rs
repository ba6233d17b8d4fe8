//! Read-file tool - sandboxed local file access

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::gate::Permission;
use crate::types::ActionResult;

use super::{Tool, ToolArgs};

/// Reads a local file. Args: `path=<filepath>`. Requires `filesystem-read`.
///
/// Access is confined to the current working directory: paths containing
/// `..` components and absolute paths resolving outside the CWD are refused
/// with an error result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadFileTool;

impl ReadFileTool {
    /// Create a new read-file tool
    pub fn new() -> Self {
        Self
    }

    fn resolve(&self, raw: &str) -> Result<PathBuf, String> {
        let path = Path::new(raw);
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(format!("path '{}' rejected: '..' components are not allowed", raw));
        }

        let cwd = std::env::current_dir().map_err(|e| format!("cannot resolve working directory: {}", e))?;
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        if !resolved.starts_with(&cwd) {
            return Err(format!(
                "path '{}' rejected: outside the working directory {}",
                raw,
                cwd.display()
            ));
        }
        Ok(resolved)
    }
}

impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read-file"
    }

    fn description(&self) -> &str {
        "Read a local file under the working directory. Args: path=<filepath>. Requires filesystem-read."
    }

    fn required_permissions(&self) -> BTreeSet<Permission> {
        [Permission::FilesystemRead].into_iter().collect()
    }

    fn run(&self, args: &ToolArgs) -> ActionResult {
        let raw = args.get("path").map(|s| s.trim()).unwrap_or("");
        if raw.is_empty() {
            return ActionResult::error(self.name(), "missing required argument: path=<filepath>");
        }

        let resolved = match self.resolve(raw) {
            Ok(p) => p,
            Err(message) => return ActionResult::error(self.name(), message),
        };

        match fs::read_to_string(&resolved) {
            Ok(content) => ActionResult::ok(self.name(), content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ActionResult::error(self.name(), format!("file not found: {}", raw))
            }
            Err(e) => ActionResult::error(self.name(), e.to_string()),
        }
    }

    fn routing_hints(&self) -> Vec<String> {
        vec!["read file".to_string(), "read the file".to_string()]
    }

    fn extract_args(&self, prompt: &str) -> ToolArgs {
        let mut args = ToolArgs::new();
        // First token that looks like a path: contains a separator or an
        // extension dot (but is not bare punctuation)
        let candidate = prompt
            .split_whitespace()
            .map(|token| token.trim_matches(|c: char| matches!(c, '"' | '\'' | ',' | ';' | '?' | '!' | '(' | ')')))
            .find(|token| {
                token.contains('/')
                    || (token.contains('.') && token.len() > 1 && !token.ends_with('.'))
            });
        if let Some(path) = candidate {
            args.insert("path".to_string(), path.to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::ActionStatus;

    // The working directory is process-global; serialize the tests that
    // depend on it.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    fn run_in_dir(dir: &Path, args: &ToolArgs) -> ActionResult {
        let _guard = CWD_LOCK.lock().unwrap();
        let old = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let result = ReadFileTool::new().run(args);
        std::env::set_current_dir(old).unwrap();
        result
    }

    fn path_args(path: &str) -> ToolArgs {
        let mut args = ToolArgs::new();
        args.insert("path".to_string(), path.to_string());
        args
    }

    #[test]
    fn test_required_permissions() {
        let required = ReadFileTool::new().required_permissions();
        assert_eq!(required.len(), 1);
        assert!(required.contains(&Permission::FilesystemRead));
    }

    #[test]
    fn test_missing_path_is_error() {
        let result = ReadFileTool::new().run(&ToolArgs::new());
        assert_eq!(result.status, ActionStatus::Error);
        assert!(result.error_message().unwrap().contains("path"));
    }

    #[test]
    fn test_blank_path_is_error() {
        let result = ReadFileTool::new().run(&path_args("   "));
        assert_eq!(result.status, ActionStatus::Error);
    }

    #[test]
    fn test_reads_file_under_cwd() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foo.txt"), "hello world").unwrap();

        let result = run_in_dir(dir.path(), &path_args("foo.txt"));
        assert_eq!(result.status, ActionStatus::Ok);
        assert_eq!(result.output, "hello world");
    }

    #[test]
    fn test_missing_file_is_error() {
        let _guard = CWD_LOCK.lock().unwrap();
        let result = ReadFileTool::new().run(&path_args("nonexistent_path_12345"));
        assert_eq!(result.status, ActionStatus::Error);
        assert!(result.error_message().unwrap().contains("not found"));
    }

    #[test]
    fn test_dotdot_path_rejected() {
        let result = ReadFileTool::new().run(&path_args("../../etc/passwd"));
        assert_eq!(result.status, ActionStatus::Error);
        assert!(result.error_message().unwrap().contains(".."));
    }

    #[test]
    fn test_absolute_path_outside_cwd_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let file = outside.path().join("secret.txt");
        fs::write(&file, "x").unwrap();

        let result = run_in_dir(dir.path(), &path_args(file.to_str().unwrap()));
        assert_eq!(result.status, ActionStatus::Error);
        assert!(result
            .error_message()
            .unwrap()
            .contains("outside the working directory"));
    }

    #[test]
    fn test_extract_args_finds_path_token() {
        let tool = ReadFileTool::new();
        let args = tool.extract_args("read the file at /tmp/notes.txt please");
        assert_eq!(args.get("path").map(String::as_str), Some("/tmp/notes.txt"));

        let args = tool.extract_args("read file config.yaml");
        assert_eq!(args.get("path").map(String::as_str), Some("config.yaml"));
    }

    #[test]
    fn test_extract_args_empty_without_path() {
        let args = ReadFileTool::new().extract_args("read the file");
        assert!(args.is_empty());
    }
}
