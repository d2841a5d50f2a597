//! Authorization models
//!
//! This file defines the permission state a session holds, the role bundles
//! that supply default permissions, and the evaluator configuration.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;
use vantage_api::{UserInfo, validation::validate_permission};
use vantage_common::{ANONYMOUS_ROLE, SUPER_ADMIN_ROLE};

/// Granted permissions and the current role of a session
///
/// Permissions are unique and always well-formed: malformed identifiers are
/// dropped on construction, so a malformed requirement can never match.
/// The effective set is the role bundle plus the explicit grants; only the
/// explicit grants survive a role switch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PermissionState {
    role: String,
    permissions: BTreeSet<String>,
    #[serde(skip)]
    explicit: BTreeSet<String>,
}

impl Default for PermissionState {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl PermissionState {
    pub fn new<I, S>(role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self {
            role: role.into(),
            permissions: BTreeSet::new(),
            explicit: BTreeSet::new(),
        };
        for permission in permissions {
            state.grant(permission);
        }
        state
    }

    /// State of a signed-out session: no role, no permissions
    pub fn anonymous() -> Self {
        Self {
            role: ANONYMOUS_ROLE.to_string(),
            permissions: BTreeSet::new(),
            explicit: BTreeSet::new(),
        }
    }

    /// Effective state for `role`: its bundle plus explicit grants
    pub fn for_role<I, S>(role: &str, bundles: &RoleBundles, grants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::new(role, grants);
        if let Some(bundle) = bundles.get(role) {
            state.permissions.extend(bundle.iter().cloned());
        }
        state
    }

    pub fn from_user(user: &UserInfo, bundles: &RoleBundles) -> Self {
        Self::for_role(&user.role, bundles, user.permissions.iter().cloned())
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    /// Grants that did not come from the role bundle
    pub fn explicit_permissions(&self) -> &BTreeSet<String> {
        &self.explicit
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn is_anonymous(&self) -> bool {
        self.role == ANONYMOUS_ROLE
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Add an explicit grant; returns false if it was malformed or already
    /// effective
    ///
    /// A permission already supplied by the bundle is still recorded as
    /// explicit, so it outlives a switch to a role without it.
    pub(crate) fn grant(&mut self, permission: impl Into<String>) -> bool {
        let permission = permission.into();
        if let Err(e) = validate_permission(&permission) {
            debug!("Dropping malformed permission {:?}: {}", permission, e.code);
            return false;
        }
        self.explicit.insert(permission.clone());
        self.permissions.insert(permission)
    }

    pub(crate) fn revoke(&mut self, permission: &str) -> bool {
        self.explicit.remove(permission);
        self.permissions.remove(permission)
    }

    pub(crate) fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
    }
}

/// Default permission sets bundled with each role
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleBundles {
    bundles: HashMap<String, BTreeSet<String>>,
}

impl RoleBundles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role<I, S>(mut self, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(role, permissions);
        self
    }

    pub fn insert<I, S>(&mut self, role: impl Into<String>, permissions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bundle = permissions
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| validate_permission(p).is_ok())
            .collect();
        self.bundles.insert(role.into(), bundle);
    }

    pub fn get(&self, role: &str) -> Option<&BTreeSet<String>> {
        self.bundles.get(role)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for RoleBundles {
    fn from(value: HashMap<String, Vec<String>>) -> Self {
        let mut bundles = RoleBundles::new();
        for (role, permissions) in value {
            bundles.insert(role, permissions);
        }
        bundles
    }
}

/// Evaluator settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Roles that pass every page and button check
    pub super_roles: HashSet<String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            super_roles: HashSet::from([SUPER_ADMIN_ROLE.to_string()]),
        }
    }
}

impl EvaluatorConfig {
    pub fn with_super_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            super_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_super_role(&self, role: &str) -> bool {
        self.super_roles.contains(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_state_deduplicates() {
        let state = PermissionState::new("staff", ["order:view", "order:view", "order:edit"]);
        assert_eq!(state.len(), 2);
        assert!(state.contains("order:view"));
        assert_eq!(state.role(), "staff");
    }

    #[test]
    fn test_permission_state_drops_malformed() {
        let state = PermissionState::new("staff", ["order:view", "", "  ", "order: edit"]);
        assert_eq!(state.len(), 1);
        assert!(!state.contains(""));
        assert!(!state.contains("order: edit"));
    }

    #[test]
    fn test_anonymous_state() {
        let state = PermissionState::default();
        assert!(state.is_anonymous());
        assert!(state.is_empty());
        assert_eq!(state.role(), ANONYMOUS_ROLE);
    }

    #[test]
    fn test_for_role_merges_bundle_and_grants() {
        let bundles = RoleBundles::new()
            .with_role("staff", ["order:view"])
            .with_role("manager", ["order:view", "order:export"]);

        let state = PermissionState::for_role("manager", &bundles, ["report:view"]);
        assert_eq!(state.len(), 3);
        assert!(state.contains("order:export"));
        assert!(state.contains("report:view"));
        assert_eq!(
            state.explicit_permissions().iter().collect::<Vec<_>>(),
            vec!["report:view"]
        );

        let unknown = PermissionState::for_role("intern", &bundles, Vec::<String>::new());
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_from_user() {
        let bundles = RoleBundles::new().with_role("staff", ["order:view"]);
        let user = UserInfo {
            user_id: "u-1".to_string(),
            username: "alice".to_string(),
            role: "staff".to_string(),
            permissions: vec!["order:export".to_string()],
        };
        let state = PermissionState::from_user(&user, &bundles);
        assert!(state.contains("order:view"));
        assert!(state.contains("order:export"));
    }

    #[test]
    fn test_grant_of_bundled_permission_becomes_explicit() {
        let bundles = RoleBundles::new().with_role("manager", ["order:export"]);
        let mut state = PermissionState::for_role("manager", &bundles, Vec::<String>::new());
        assert!(state.explicit_permissions().is_empty());

        assert!(!state.grant("order:export"));
        assert!(state.explicit_permissions().contains("order:export"));

        assert!(state.revoke("order:export"));
        assert!(state.explicit_permissions().is_empty());
    }

    #[test]
    fn test_grant_and_revoke() {
        let mut state = PermissionState::new("staff", ["order:view"]);
        assert!(state.grant("order:edit"));
        assert!(!state.grant("order:edit"));
        assert!(!state.grant("bad perm"));
        assert!(state.revoke("order:view"));
        assert!(!state.revoke("order:view"));
        state.set_role("manager");
        assert_eq!(state.role(), "manager");
    }

    #[test]
    fn test_role_bundles_from_map() {
        let mut map = HashMap::new();
        map.insert(
            "staff".to_string(),
            vec!["order:view".to_string(), "bad perm".to_string()],
        );
        let bundles = RoleBundles::from(map);
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles.get("staff").unwrap().len(), 1);
        assert_eq!(bundles.roles().collect::<Vec<_>>(), vec!["staff"]);
    }

    #[test]
    fn test_evaluator_config() {
        let config = EvaluatorConfig::default();
        assert!(config.is_super_role(SUPER_ADMIN_ROLE));
        assert!(!config.is_super_role("staff"));

        let config = EvaluatorConfig::with_super_roles(["root", "ops"]);
        assert!(config.is_super_role("ops"));
        assert!(!config.is_super_role(SUPER_ADMIN_ROLE));
    }
}
