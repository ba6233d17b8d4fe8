//! Closed permission enumeration

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Permissions a tool may require
///
/// A closed set: configuration strings are validated against it at the
/// boundary and unknown values are rejected before a gate is built.
///
/// Variant order matches the ordering of the kebab-case string values, so
/// sorted permission sets render sorted string lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    FilesystemRead,
    FilesystemWrite,
    Network,
    Shell,
}

impl Permission {
    /// Every known permission, in string order
    pub const ALL: [Permission; 4] = [
        Permission::FilesystemRead,
        Permission::FilesystemWrite,
        Permission::Network,
        Permission::Shell,
    ];

    /// The wire/CLI name of this permission
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::FilesystemRead => "filesystem-read",
            Permission::FilesystemWrite => "filesystem-write",
            Permission::Network => "network",
            Permission::Shell => "shell",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for permission strings outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission '{0}' (valid: filesystem-read, filesystem-write, network, shell)")]
pub struct PermissionParseError(pub String);

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filesystem-read" => Ok(Permission::FilesystemRead),
            "filesystem-write" => Ok(Permission::FilesystemWrite),
            "network" => Ok(Permission::Network),
            "shell" => Ok(Permission::Shell),
            other => Err(PermissionParseError(other.to_string())),
        }
    }
}

/// Parse a granted-permission list (e.g. from repeated `--grant` flags)
///
/// Fails fast on the first unrecognized value; duplicates collapse.
pub fn parse_grants<S: AsRef<str>>(values: &[S]) -> Result<BTreeSet<Permission>, PermissionParseError> {
    values.iter().map(|v| v.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(
            "filesystem-read".parse::<Permission>().unwrap(),
            Permission::FilesystemRead
        );
        assert_eq!("shell".parse::<Permission>().unwrap(), Permission::Shell);
    }

    #[test]
    fn test_parse_unknown_value_rejected() {
        let err = "sudo".parse::<Permission>().unwrap_err();
        assert_eq!(err.0, "sudo");
        // The message enumerates the valid values for the operator
        assert!(err.to_string().contains("filesystem-read"));
        assert!(err.to_string().contains("shell"));
    }

    #[test]
    fn test_ordering_matches_string_order() {
        let mut strings: Vec<&str> = Permission::ALL.iter().map(|p| p.as_str()).collect();
        let sorted = strings.clone();
        strings.sort();
        assert_eq!(strings, sorted);
    }

    #[test]
    fn test_parse_grants() {
        let grants = parse_grants(&["shell", "filesystem-read", "shell"]).unwrap();
        assert_eq!(grants.len(), 2);
        assert!(grants.contains(&Permission::Shell));
        assert!(grants.contains(&Permission::FilesystemRead));
    }

    #[test]
    fn test_parse_grants_fails_fast() {
        let err = parse_grants(&["network", "root"]).unwrap_err();
        assert_eq!(err.0, "root");
    }

    #[test]
    fn test_serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Permission::FilesystemRead).unwrap(),
            "\"filesystem-read\""
        );
        let p: Permission = serde_json::from_str("\"network\"").unwrap();
        assert_eq!(p, Permission::Network);
    }
}
