//! Tool registry - name-keyed lookup and routing projection

use std::collections::BTreeMap;

use crate::types::RoutingTarget;

use super::{EchoTool, ReadFileTool, Tool};

/// Registry of the tools available to one process invocation
///
/// Built once at startup and read-only afterwards; lookups and routing
/// projections never mutate it.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Registry preloaded with the built-in tools
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EchoTool::new()));
        registry.register(Box::new(ReadFileTool::new()));
        registry
    }

    /// Add a tool, replacing any previous tool with the same name
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Registered tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Iterate over registered tools in name order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.values().map(|t| t.as_ref())
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Project routable tools into routing targets, sorted by name
    ///
    /// Tools without hints are not routable and are omitted. Rebuilt on
    /// every call so the projection always reflects the live registry.
    pub fn targets(&self) -> Vec<RoutingTarget> {
        self.tools
            .values()
            .filter(|tool| !tool.routing_hints().is_empty())
            .map(|tool| {
                RoutingTarget::tool(tool.name(), tool.description(), tool.routing_hints())
            })
            .collect()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::gate::Permission;
    use crate::tools::ToolArgs;
    use crate::types::{ActionResult, TargetType};

    #[test]
    fn test_builtin_registry() {
        let registry = ToolRegistry::builtin();
        assert_eq!(registry.names(), vec!["echo", "read-file"]);
        assert!(registry.get("echo").is_some());
        assert!(registry.get("read-file").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_lookup_runs_tool() {
        let registry = ToolRegistry::builtin();
        let mut args = ToolArgs::new();
        args.insert("k".to_string(), "v".to_string());

        let result = registry.get("echo").unwrap().run(&args);
        assert_eq!(result.tool_name, "echo");
        assert!(result.output.contains("k=v"));
    }

    #[test]
    fn test_targets_projection() {
        let registry = ToolRegistry::builtin();
        let targets = registry.targets();

        assert_eq!(targets.len(), 2);
        let echo = targets.iter().find(|t| t.name == "echo").unwrap();
        assert_eq!(echo.target_type, TargetType::Tool);
        assert!(echo.hints.contains(&"echo".to_string()));
        let read = targets.iter().find(|t| t.name == "read-file").unwrap();
        assert!(read.hints.contains(&"read file".to_string()));
    }

    #[test]
    fn test_hintless_tools_not_routable() {
        struct QuietTool;

        impl Tool for QuietTool {
            fn name(&self) -> &str {
                "quiet"
            }
            fn description(&self) -> &str {
                "No hints, never routed."
            }
            fn required_permissions(&self) -> BTreeSet<Permission> {
                BTreeSet::new()
            }
            fn run(&self, _args: &ToolArgs) -> ActionResult {
                ActionResult::ok("quiet", "")
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Box::new(QuietTool));
        assert_eq!(registry.len(), 1);
        assert!(registry.targets().is_empty());
    }
}
