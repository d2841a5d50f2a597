//! Permission evaluation
//!
//! Pure functions over a `PermissionState`, and `PermissionEvaluator`, which
//! applies them to a fresh session snapshot on every call. Nothing here
//! allocates network resources or returns errors: missing or malformed input
//! resolves to "no permission".

use std::sync::Arc;

use tracing::trace;
use vantage_api::validation::validate_permission;
use vantage_common::PermissionScope;

use crate::model::{EvaluatorConfig, PermissionState};
use crate::session::SessionReader;

/// Scoped check shared by page and button gating
///
/// An absent or empty requirement marks a public target. A malformed
/// requirement fails closed for every role; otherwise super roles pass and
/// everyone else needs the exact permission.
pub fn has_permission(
    state: &PermissionState,
    config: &EvaluatorConfig,
    scope: PermissionScope,
    required: Option<&str>,
) -> bool {
    let required = match required {
        None => return true,
        Some(r) if r.is_empty() => return true,
        Some(r) => r,
    };

    if validate_permission(required).is_err() {
        trace!(%scope, required, "malformed permission requirement");
        return false;
    }

    let allowed = config.is_super_role(state.role()) || state.contains(required);
    trace!(%scope, required, role = state.role(), allowed, "permission check");
    allowed
}

/// True iff every required permission is granted; true for an empty requirement
pub fn has_all_permissions<I, S>(state: &PermissionState, required: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    required
        .into_iter()
        .all(|permission| state.contains(permission.as_ref()))
}

/// True iff at least one required permission is granted; false for an empty requirement
pub fn has_any_permission<I, S>(state: &PermissionState, required: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    required
        .into_iter()
        .any(|permission| state.contains(permission.as_ref()))
}

/// Answers visibility questions against the live session
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    session: SessionReader,
    config: Arc<EvaluatorConfig>,
}

impl PermissionEvaluator {
    pub fn new(session: SessionReader) -> Self {
        Self::with_config(session, EvaluatorConfig::default())
    }

    pub fn with_config(session: SessionReader, config: EvaluatorConfig) -> Self {
        Self {
            session,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// The session state the next check would see
    pub fn snapshot(&self) -> Arc<PermissionState> {
        self.session.snapshot()
    }

    pub fn is_super_role(&self) -> bool {
        self.config.is_super_role(self.snapshot().role())
    }

    pub fn has_permission(&self, scope: PermissionScope, required: Option<&str>) -> bool {
        has_permission(&self.snapshot(), &self.config, scope, required)
    }

    pub fn has_page_permission(&self, required: Option<&str>) -> bool {
        self.has_permission(PermissionScope::Page, required)
    }

    pub fn has_button_permission(&self, required: Option<&str>) -> bool {
        self.has_permission(PermissionScope::Button, required)
    }

    pub fn has_all_permissions<I, S>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        has_all_permissions(&self.snapshot(), required)
    }

    pub fn has_any_permission<I, S>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        has_any_permission(&self.snapshot(), required)
    }
}
