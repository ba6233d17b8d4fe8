//! Tool interface and built-in tools
//!
//! Tools are pre-reasoning context injectors: they run before the reasoner
//! and their output is folded into the turn's context. Execution always goes
//! through the [`crate::gate::Gate`].

mod echo;
mod read_file;
mod registry;

use std::collections::{BTreeMap, BTreeSet};

use crate::gate::Permission;
use crate::types::ActionResult;

pub use echo::EchoTool;
pub use read_file::ReadFileTool;
pub use registry::ToolRegistry;

/// String-keyed tool arguments (e.g. parsed from `--tool-arg key=value`)
pub type ToolArgs = BTreeMap<String, String>;

/// A named, possibly side-effecting unit of work
///
/// Required: the three capability accessors and `run`. The two routing
/// methods have universal defaults (no hints, no argument extraction), so a
/// plain tool never has to know the router exists.
pub trait Tool: Send + Sync {
    /// Unique name for registry lookup and logging
    fn name(&self) -> &str;

    /// Short description for `--list-tools`
    fn description(&self) -> &str;

    /// Permissions the gate must grant for this tool to run; empty = none
    fn required_permissions(&self) -> BTreeSet<Permission>;

    /// Execute the tool
    ///
    /// Internal failures (missing argument, I/O error) come back as results
    /// with error status, never as panics.
    fn run(&self, args: &ToolArgs) -> ActionResult;

    /// Phrases the router matches against user prompts; empty = not routable
    fn routing_hints(&self) -> Vec<String> {
        Vec::new()
    }

    /// Best-effort structured-argument extraction from a free-text prompt
    ///
    /// Empty map when the tool does not support extraction.
    fn extract_args(&self, _prompt: &str) -> ToolArgs {
        ToolArgs::new()
    }
}
