// Built-in route table of the console

use vantage_api::{ExceptionKind, RouteConfig};

// Permissions
pub const ORDER_VIEW: &str = "order:view";
pub const ORDER_EXPORT: &str = "order:export";

// Pages
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ORDER_LIST_PATH: &str = "/orders/list";
pub const ORDER_DETAIL_PATH: &str = "/orders/detail";
pub const ORDER_EXPORT_PATH: &str = "/orders/export";
pub const ORDER_DOWNLOAD_PATH: &str = "/orders/download";
pub const PROFILE_PATH: &str = "/user/profile";

pub fn routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new(DASHBOARD_PATH, "dashboard", "Dashboard")
            .with_icon("dashboard")
            .keep_alive(),
        RouteConfig::new("/orders", "orders", "Orders")
            .with_icon("shopping-cart")
            .with_children(vec![
                RouteConfig::new(ORDER_LIST_PATH, "order-list", "Order List")
                    .with_permission(ORDER_VIEW)
                    .keep_alive(),
                RouteConfig::new(ORDER_DETAIL_PATH, "order-detail", "Order Detail")
                    .with_permission(ORDER_VIEW)
                    .hidden(),
                RouteConfig::new(ORDER_EXPORT_PATH, "order-export", "Export Orders")
                    .with_permission(ORDER_EXPORT),
                RouteConfig::new(ORDER_DOWNLOAD_PATH, "order-download", "Download Orders")
                    .with_permission(ORDER_EXPORT)
                    .hidden(),
            ]),
        RouteConfig::new(PROFILE_PATH, "profile", "Profile")
            .with_icon("user")
            .hidden(),
        exception_route(ExceptionKind::Forbidden),
        exception_route(ExceptionKind::NotFound),
        exception_route(ExceptionKind::ServerError),
    ]
}

fn exception_route(kind: ExceptionKind) -> RouteConfig {
    let status = kind.status().to_string();
    RouteConfig::new(kind.route_path(), status.clone(), status).hidden()
}
