//! Vantage Common - Shared types and constants
//!
//! This crate provides the foundational types used across all Vantage components:
//! - Error types and error codes
//! - Success-code mapping for API envelopes
//! - Permission scope tags

pub mod error;

// Re-exports for convenience
pub use error::{ErrorCode, VantageError, is_success_code};

/// Role that bypasses page and button checks unless configured otherwise
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

/// Role assigned to a session after logout
pub const ANONYMOUS_ROLE: &str = "anonymous";

/// Scope of a permission check
///
/// Page and button checks share the same decision logic; the scope only
/// records where the check originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionScope {
    #[default]
    Page,
    Button,
}

impl PermissionScope {
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionScope::Page => "page",
            PermissionScope::Button => "button",
        }
    }
}

impl std::fmt::Display for PermissionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PermissionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(PermissionScope::Page),
            "button" => Ok(PermissionScope::Button),
            _ => Err(format!("Invalid permission scope: {}", s)),
        }
    }
}
