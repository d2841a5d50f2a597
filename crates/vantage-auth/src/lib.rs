//! Vantage Auth - permission resolution for the admin console
//!
//! This crate provides:
//! - `PermissionState` and role bundles
//! - A single-writer / many-reader session store
//! - `PermissionEvaluator` for page, button, and set-based checks
//! - Route guarding and permission-filtered menu construction

pub mod model;
pub mod service;
pub mod session;

pub use model::{EvaluatorConfig, PermissionState, RoleBundles};
pub use service::menu::{RouteDecision, build_menu, guard_route};
pub use service::permission::PermissionEvaluator;
pub use session::{SessionClosed, SessionReader, SessionWriter};
