//! Session store
//!
//! A session has exactly one writer, owned by whatever handles login, logout,
//! and role switches, and any number of readers handed to evaluators. Readers
//! always observe the latest state; `changed()` lets them react to updates.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use vantage_api::UserInfo;

use crate::model::{PermissionState, RoleBundles};

/// Returned by [`SessionReader::changed`] once the writer is gone
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session writer dropped")]
pub struct SessionClosed;

/// The only handle allowed to mutate a session
///
/// Mutating methods take `&mut self`, so exclusive access is checked at
/// compile time and no lock is involved.
#[derive(Debug)]
pub struct SessionWriter {
    tx: watch::Sender<Arc<PermissionState>>,
}

impl SessionWriter {
    pub fn new(initial: PermissionState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// Start with a signed-out session
    pub fn anonymous() -> Self {
        Self::new(PermissionState::anonymous())
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            rx: self.tx.subscribe(),
        }
    }

    pub fn current(&self) -> Arc<PermissionState> {
        self.tx.borrow().clone()
    }

    /// Replace the whole state, e.g. after a successful login
    ///
    /// Build `state` with [`PermissionState::for_role`] so bundle permissions
    /// are told apart from explicit grants.
    pub fn login(&mut self, state: PermissionState) {
        info!(
            "Session login: role={}, permissions={}",
            state.role(),
            state.len()
        );
        self.publish(state);
    }

    /// Log in from the current-user payload
    ///
    /// Explicit grants are the user's own permissions; the role bundle is
    /// merged on top.
    pub fn login_user(&mut self, user: &UserInfo, bundles: &RoleBundles) {
        let state = PermissionState::from_user(user, bundles);
        info!(
            "Session login: user={}, role={}, permissions={}",
            user.username,
            state.role(),
            state.len()
        );
        self.publish(state);
    }

    pub fn logout(&mut self) {
        info!("Session logout");
        self.publish(PermissionState::anonymous());
    }

    /// Switch role, replacing bundle permissions while keeping explicit grants
    pub fn switch_role(&mut self, role: &str, bundles: &RoleBundles) {
        let current = self.current();
        let grants = current.explicit_permissions().iter().cloned();
        let state = PermissionState::for_role(role, bundles, grants);
        info!(
            "Session role switch: {} -> {}, permissions={}",
            current.role(),
            role,
            state.len()
        );
        self.publish(state);
    }

    /// Grant one permission; returns false if malformed or already granted
    pub fn grant(&mut self, permission: &str) -> bool {
        let current = self.current();
        let mut state = (*current).clone();
        let added = state.grant(permission);
        if state != *current {
            self.publish(state);
        }
        added
    }

    /// Revoke one permission; returns false if it was not granted
    pub fn revoke(&mut self, permission: &str) -> bool {
        let current = self.current();
        let mut state = (*current).clone();
        let removed = state.revoke(permission);
        if state != *current {
            self.publish(state);
        }
        removed
    }

    pub fn set_role(&mut self, role: &str) {
        let mut state = (*self.current()).clone();
        state.set_role(role);
        self.publish(state);
    }

    fn publish(&self, state: PermissionState) {
        // send_replace stores the value even when no reader is subscribed
        self.tx.send_replace(Arc::new(state));
    }
}

/// Read-only view of a session
#[derive(Debug, Clone)]
pub struct SessionReader {
    rx: watch::Receiver<Arc<PermissionState>>,
}

impl SessionReader {
    /// The state as of now; cheap, shares the underlying allocation
    pub fn snapshot(&self) -> Arc<PermissionState> {
        self.rx.borrow().clone()
    }

    /// Wait for the next update and return the new state
    pub async fn changed(&mut self) -> Result<Arc<PermissionState>, SessionClosed> {
        self.rx.changed().await.map_err(|_| SessionClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn bundles() -> RoleBundles {
        RoleBundles::new()
            .with_role("staff", ["order:view"])
            .with_role("manager", ["order:view", "order:export"])
    }

    #[test]
    fn test_reader_sees_initial_state() {
        let writer = SessionWriter::new(PermissionState::new("staff", ["order:view"]));
        let reader = writer.reader();
        assert_eq!(reader.snapshot().role(), "staff");
        assert!(reader.snapshot().contains("order:view"));
    }

    #[test]
    fn test_reader_observes_login_and_logout() {
        let mut writer = SessionWriter::anonymous();
        let reader = writer.reader();
        assert!(reader.snapshot().is_anonymous());

        writer.login(PermissionState::new("staff", ["order:view"]));
        assert_eq!(reader.snapshot().role(), "staff");

        writer.logout();
        assert!(reader.snapshot().is_anonymous());
        assert!(reader.snapshot().is_empty());
    }

    #[test]
    fn test_publish_without_readers_is_kept() {
        let mut writer = SessionWriter::anonymous();
        writer.login(PermissionState::new("staff", ["order:view"]));
        assert_eq!(writer.current().role(), "staff");

        let late = writer.reader();
        assert_eq!(late.snapshot().role(), "staff");
    }

    #[test]
    fn test_switch_role_keeps_explicit_grants() {
        let bundles = bundles();
        let mut writer = SessionWriter::anonymous();
        let reader = writer.reader();

        writer.login_user(
            &UserInfo {
                user_id: "u-1".to_string(),
                username: "alice".to_string(),
                role: "staff".to_string(),
                permissions: vec!["report:view".to_string()],
            },
            &bundles,
        );
        assert!(reader.snapshot().contains("report:view"));
        assert!(!reader.snapshot().contains("order:export"));

        writer.switch_role("manager", &bundles);
        let state = reader.snapshot();
        assert_eq!(state.role(), "manager");
        assert!(state.contains("order:export"));
        assert!(state.contains("report:view"));

        writer.switch_role("guest", &bundles);
        let state = reader.snapshot();
        assert!(!state.contains("order:view"));
        assert!(state.contains("report:view"));
    }

    #[test]
    fn test_downgrade_drops_previous_bundle() {
        let bundles = bundles();
        let mut writer = SessionWriter::anonymous();
        let reader = writer.reader();

        writer.login(PermissionState::for_role("manager", &bundles, Vec::<String>::new()));
        assert!(reader.snapshot().contains("order:export"));

        writer.switch_role("staff", &bundles);
        let state = reader.snapshot();
        assert_eq!(state.role(), "staff");
        assert!(state.contains("order:view"));
        assert!(!state.contains("order:export"));
    }

    #[test]
    fn test_granted_bundle_permission_survives_downgrade() {
        let bundles = bundles();
        let mut writer = SessionWriter::new(PermissionState::for_role(
            "manager",
            &bundles,
            Vec::<String>::new(),
        ));
        assert!(!writer.grant("order:export"));

        writer.switch_role("staff", &bundles);
        assert!(writer.current().contains("order:export"));
    }

    #[test]
    fn test_grant_and_revoke() {
        let mut writer = SessionWriter::new(PermissionState::new("staff", ["order:view"]));
        let reader = writer.reader();

        assert!(writer.grant("order:edit"));
        assert!(!writer.grant("order:edit"));
        assert!(!writer.grant("bad perm"));
        assert!(reader.snapshot().contains("order:edit"));

        assert!(writer.revoke("order:view"));
        assert!(!writer.revoke("order:view"));
        assert!(!reader.snapshot().contains("order:view"));

        writer.set_role("auditor");
        assert_eq!(reader.snapshot().role(), "auditor");
    }

    #[test]
    fn test_snapshot_is_stable_after_update() {
        let mut writer = SessionWriter::new(PermissionState::new("staff", ["order:view"]));
        let reader = writer.reader();
        let before = reader.snapshot();

        writer.logout();
        assert_eq!(before.role(), "staff");
        assert!(reader.snapshot().is_anonymous());
    }

    #[tokio::test]
    async fn test_changed_notifies_reader() {
        let mut writer = SessionWriter::anonymous();
        let mut reader = writer.reader();
        assert!(!reader.has_changed());

        let handle = tokio::spawn(async move {
            let state = reader.changed().await.unwrap();
            state.role().to_string()
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        writer.login(PermissionState::new("staff", ["order:view"]));

        assert_eq!(handle.await.unwrap(), "staff");
    }

    #[tokio::test]
    async fn test_changed_errors_when_writer_dropped() {
        let writer = SessionWriter::anonymous();
        let mut reader = writer.reader();
        drop(writer);
        assert_eq!(reader.changed().await, Err(SessionClosed));
        assert!(reader.snapshot().is_anonymous());
    }
}
