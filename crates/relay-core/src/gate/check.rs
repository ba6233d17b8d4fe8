//! Default-deny execution gate

use std::collections::BTreeSet;
use std::time::Instant;

use serde_json::json;
use thiserror::Error;

use crate::tools::{Tool, ToolArgs};
use crate::types::ActionResult;

use super::permission::Permission;

fn join_permissions(set: &BTreeSet<Permission>) -> String {
    set.iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The only failure the gate introduces: a denied permission check
///
/// Always fatal to that single invocation; the caller aborts the tool run
/// rather than retrying. Action-internal failures are not gate errors; they
/// surface as error-status results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("tool '{action}' denied: missing permissions: {}", join_permissions(.missing))]
    PermissionDenied {
        /// Name of the denied action
        action: String,
        /// Every required permission absent from the granted set, sorted
        missing: BTreeSet<Permission>,
    },
}

/// Enforces permission checks before tool execution
///
/// Holds the granted set fixed for the lifetime of the process invocation.
/// Default-deny: only tools whose required permissions are a subset of the
/// granted set run at all.
#[derive(Debug, Clone)]
pub struct Gate {
    granted: BTreeSet<Permission>,
}

impl Gate {
    /// Create a gate with an explicit granted set
    pub fn new(granted: BTreeSet<Permission>) -> Self {
        Self { granted }
    }

    /// Create a gate granting nothing
    pub fn deny_all() -> Self {
        Self::new(BTreeSet::new())
    }

    /// Gate that grants every known permission
    ///
    /// For tests and trusted contexts only, never the production default.
    pub fn permissive() -> Self {
        Self::new(Permission::ALL.into_iter().collect())
    }

    /// The granted set
    pub fn granted(&self) -> &BTreeSet<Permission> {
        &self.granted
    }

    /// Fail with [`GateError::PermissionDenied`] if the tool requires any
    /// permission not in the granted set
    ///
    /// Tools with an empty required set always pass.
    pub fn check(&self, tool: &dyn Tool) -> Result<(), GateError> {
        let missing: BTreeSet<Permission> = tool
            .required_permissions()
            .difference(&self.granted)
            .copied()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GateError::PermissionDenied {
                action: tool.name().to_string(),
                missing,
            })
        }
    }

    /// Check permissions, then run the tool and time it
    ///
    /// On denial the tool's `run` is never invoked. On success the result
    /// gains `execution_time_ms` and `checked_permissions` metadata; keys the
    /// tool already set are left untouched. `checked_permissions` lists what
    /// was checked (the tool's full required set, sorted), not what was
    /// missing.
    pub fn run(&self, tool: &dyn Tool, args: &ToolArgs) -> Result<ActionResult, GateError> {
        self.check(tool)?;

        let start = Instant::now();
        let mut result = tool.run(args);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        result
            .metadata
            .entry("execution_time_ms".to_string())
            .or_insert_with(|| json!(elapsed_ms));
        let checked: Vec<&str> = tool
            .required_permissions()
            .iter()
            .map(|p| p.as_str())
            .collect();
        result
            .metadata
            .entry("checked_permissions".to_string())
            .or_insert_with(|| json!(checked));

        Ok(result)
    }
}
