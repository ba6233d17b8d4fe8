//! Echo tool - argument round-trip without permissions

use std::collections::BTreeSet;

use crate::gate::Permission;
use crate::types::ActionResult;

use super::{Tool, ToolArgs};

/// Echoes provided args back as output. No permissions required.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoTool;

impl EchoTool {
    /// Create a new echo tool
    pub fn new() -> Self {
        Self
    }
}

impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo arguments back (e.g. msg=hello). No permissions required."
    }

    fn required_permissions(&self) -> BTreeSet<Permission> {
        BTreeSet::new()
    }

    fn run(&self, args: &ToolArgs) -> ActionResult {
        if args.is_empty() {
            return ActionResult::ok(self.name(), "(no arguments)");
        }
        let lines: Vec<String> = args.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        ActionResult::ok(self.name(), lines.join("\n"))
    }

    fn routing_hints(&self) -> Vec<String> {
        vec!["echo".to_string(), "repeat this line".to_string()]
    }
}
