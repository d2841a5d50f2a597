//! Route and menu metadata
//!
//! Routes carry the permission a page requires; the menu is derived from the
//! route tree after permission filtering.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Per-page metadata
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Permission required to render the page; `None` marks a public page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default)]
    pub hide_in_menu: bool,
    /// Preserve page state across navigation
    #[serde(default)]
    pub keep_alive: bool,
}

impl RouteMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn is_public(&self) -> bool {
        self.permission.as_deref().is_none_or(str::is_empty)
    }
}

/// Node of the route tree
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    pub path: String,
    pub name: String,
    pub meta: RouteMeta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfig>,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            meta: RouteMeta::new(title),
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.meta.icon = Some(icon.into());
        self
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.meta.permission = Some(permission.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.meta.hide_in_menu = true;
        self
    }

    pub fn keep_alive(mut self) -> Self {
        self.meta.keep_alive = true;
        self
    }

    pub fn with_children(mut self, children: Vec<RouteConfig>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first lookup by absolute path
    pub fn find<'a>(routes: &'a [RouteConfig], path: &str) -> Option<&'a RouteConfig> {
        for route in routes {
            if route.path == path {
                return Some(route);
            }
            if let Some(found) = Self::find(&route.children, path) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first lookup by route name
    pub fn find_by_name<'a>(routes: &'a [RouteConfig], name: &str) -> Option<&'a RouteConfig> {
        for route in routes {
            if route.name == name {
                return Some(route);
            }
            if let Some(found) = Self::find_by_name(&route.children, name) {
                return Some(found);
            }
        }
        None
    }
}

/// Node of the navigation menu
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuConfig>,
}

/// Structural problem found by [`MenuConfig::validate`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuIssue {
    /// Two siblings share a key; `parent` is `None` at the top level
    DuplicateKey { parent: Option<String>, key: String },
    /// A leaf node without a target path
    LeafWithoutPath { key: String },
}

impl MenuConfig {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuConfig>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MenuConfig::node_count).sum::<usize>()
    }

    /// Check sibling-key uniqueness and leaf paths across a menu forest
    pub fn validate(menus: &[MenuConfig]) -> Vec<MenuIssue> {
        let mut issues = Vec::new();
        Self::validate_level(menus, None, &mut issues);
        issues
    }

    fn validate_level(menus: &[MenuConfig], parent: Option<&str>, issues: &mut Vec<MenuIssue>) {
        let mut seen = HashSet::new();
        for menu in menus {
            if !seen.insert(menu.key.as_str()) {
                issues.push(MenuIssue::DuplicateKey {
                    parent: parent.map(str::to_string),
                    key: menu.key.clone(),
                });
            }
            if menu.is_leaf() && menu.path.as_deref().is_none_or(str::is_empty) {
                issues.push(MenuIssue::LeafWithoutPath {
                    key: menu.key.clone(),
                });
            }
            Self::validate_level(&menu.children, Some(&menu.key), issues);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> Vec<RouteConfig> {
        vec![
            RouteConfig::new("/dashboard", "dashboard", "Dashboard"),
            RouteConfig::new("/orders", "orders", "Orders")
                .with_icon("shopping-cart")
                .with_children(vec![
                    RouteConfig::new("/orders/list", "order-list", "Order List")
                        .with_permission("order:view")
                        .keep_alive(),
                    RouteConfig::new("/orders/detail", "order-detail", "Order Detail")
                        .with_permission("order:view")
                        .hidden(),
                ]),
        ]
    }

    #[test]
    fn test_route_meta_public() {
        assert!(RouteMeta::new("Home").is_public());

        let mut meta = RouteMeta::new("Orders");
        meta.permission = Some(String::new());
        assert!(meta.is_public());

        meta.permission = Some("order:view".to_string());
        assert!(!meta.is_public());
    }

    #[test]
    fn test_route_find() {
        let routes = routes();
        let found = RouteConfig::find(&routes, "/orders/list").unwrap();
        assert_eq!(found.name, "order-list");
        assert!(found.meta.keep_alive);
        assert!(RouteConfig::find(&routes, "/missing").is_none());

        let detail = RouteConfig::find_by_name(&routes, "order-detail").unwrap();
        assert!(detail.meta.hide_in_menu);
    }

    #[test]
    fn test_route_deserialization_defaults() {
        let json = r#"{"path":"/a","name":"a","meta":{"title":"A"}}"#;
        let route: RouteConfig = serde_json::from_str(json).unwrap();
        assert!(!route.meta.hide_in_menu);
        assert!(!route.meta.keep_alive);
        assert!(route.children.is_empty());
    }

    #[test]
    fn test_menu_validate_ok() {
        let menus = vec![
            MenuConfig::new("dashboard", "Dashboard").with_path("/dashboard"),
            MenuConfig::new("orders", "Orders").with_children(vec![
                MenuConfig::new("list", "List").with_path("/orders/list"),
            ]),
        ];
        assert!(MenuConfig::validate(&menus).is_empty());
        assert_eq!(menus[1].node_count(), 2);
    }

    #[test]
    fn test_menu_validate_issues() {
        let menus = vec![
            MenuConfig::new("a", "A").with_path("/a"),
            MenuConfig::new("a", "A again").with_path("/a2"),
            MenuConfig::new("b", "B").with_children(vec![
                MenuConfig::new("leaf", "Leaf"),
                MenuConfig::new("leaf", "Leaf").with_path("/b/leaf"),
            ]),
        ];
        let issues = MenuConfig::validate(&menus);
        assert!(issues.contains(&MenuIssue::DuplicateKey {
            parent: None,
            key: "a".to_string()
        }));
        assert!(issues.contains(&MenuIssue::DuplicateKey {
            parent: Some("b".to_string()),
            key: "leaf".to_string()
        }));
        assert!(issues.contains(&MenuIssue::LeafWithoutPath {
            key: "leaf".to_string()
        }));
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_same_key_under_different_parents_is_fine() {
        let menus = vec![
            MenuConfig::new("x", "X").with_children(vec![MenuConfig::new("list", "L").with_path("/x/l")]),
            MenuConfig::new("y", "Y").with_children(vec![MenuConfig::new("list", "L").with_path("/y/l")]),
        ];
        assert!(MenuConfig::validate(&menus).is_empty());
    }
}
