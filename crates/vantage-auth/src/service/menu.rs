//! Route guarding and menu construction

use tracing::debug;
use vantage_api::{ExceptionKind, ExceptionView, MenuConfig, RouteConfig, RouteMeta};
use vantage_common::PermissionScope;

use crate::model::{EvaluatorConfig, PermissionState};
use crate::service::permission::{PermissionEvaluator, has_permission};

/// What the router should do with a page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Forbidden(ExceptionView),
}

impl RouteDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, RouteDecision::Render)
    }
}

/// Render the page, or the 403 screen if its permission is not satisfied
pub fn guard_route(state: &PermissionState, config: &EvaluatorConfig, meta: &RouteMeta) -> RouteDecision {
    if has_permission(state, config, PermissionScope::Page, meta.permission.as_deref()) {
        RouteDecision::Render
    } else {
        debug!(
            "Route '{}' denied for role {} (requires {:?})",
            meta.title,
            state.role(),
            meta.permission
        );
        RouteDecision::Forbidden(ExceptionKind::Forbidden.view())
    }
}

/// Build the navigation menu from the route tree
///
/// Routes hidden from the menu or not permitted are dropped together with
/// their subtree. Routes with children become path-less groups and are pruned
/// when none of their children survive; childless routes become leaves.
pub fn build_menu(
    state: &PermissionState,
    config: &EvaluatorConfig,
    routes: &[RouteConfig],
) -> Vec<MenuConfig> {
    routes
        .iter()
        .filter_map(|route| menu_node(state, config, route))
        .collect()
}

fn menu_node(
    state: &PermissionState,
    config: &EvaluatorConfig,
    route: &RouteConfig,
) -> Option<MenuConfig> {
    if route.meta.hide_in_menu {
        return None;
    }
    if !has_permission(state, config, PermissionScope::Page, route.meta.permission.as_deref()) {
        return None;
    }

    let mut node = MenuConfig::new(&route.name, &route.meta.title);
    node.icon = route.meta.icon.clone();

    if route.children.is_empty() {
        node.path = Some(route.path.clone());
        return Some(node);
    }

    let children = build_menu(state, config, &route.children);
    if children.is_empty() {
        return None;
    }
    node.children = children;
    Some(node)
}

impl PermissionEvaluator {
    pub fn guard_route(&self, meta: &RouteMeta) -> RouteDecision {
        guard_route(&self.snapshot(), self.config(), meta)
    }

    /// Menu for the current session; one snapshot is used for the whole tree
    pub fn build_menu(&self, routes: &[RouteConfig]) -> Vec<MenuConfig> {
        build_menu(&self.snapshot(), self.config(), routes)
    }
}
