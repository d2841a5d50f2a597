// Plain-text rendering of console output

use vantage_api::{ExportOutcome, MenuConfig, Order, PageData, UserInfo};
use vantage_auth::PermissionState;
use vantage_client::ClientError;

pub fn render_menu(menu: &[MenuConfig]) -> String {
    if menu.is_empty() {
        return "No pages available".to_string();
    }
    let mut lines = Vec::new();
    menu_lines(menu, 0, &mut lines);
    lines.join("\n")
}

fn menu_lines(menu: &[MenuConfig], depth: usize, lines: &mut Vec<String>) {
    for node in menu {
        let indent = "  ".repeat(depth);
        match &node.path {
            Some(path) => lines.push(format!("{}{} ({})", indent, node.label, path)),
            None => lines.push(format!("{}{}", indent, node.label)),
        }
        menu_lines(&node.children, depth + 1, lines);
    }
}

pub fn render_order_page(page: &PageData<Order>) -> String {
    let mut lines = vec![format!(
        "Page {}/{} ({} orders, {} per page)",
        page.page,
        page.pages().max(1),
        page.total,
        page.page_size
    )];

    if page.is_empty() {
        lines.push("No orders found".to_string());
        return lines.join("\n");
    }

    for order in &page.list {
        lines.push(format!(
            "{:<12} {:<16} {:<10} {:>12} {}",
            order.id, order.order_no, order.status, order.amount, order.customer_name
        ));
    }
    lines.join("\n")
}

pub fn render_order(order: &Order) -> String {
    let mut lines = vec![
        format!("Order {} ({})", order.order_no, order.id),
        format!("Customer: {} ({})", order.customer_name, order.customer_id),
        format!("Status:   {}", order.status),
        format!("Amount:   {}", order.amount),
        format!("Created:  {}", order.created_at),
        format!("Updated:  {}", order.updated_at),
    ];
    if let Some(remark) = &order.remark {
        lines.push(format!("Remark:   {}", remark));
    }

    if !order.items.is_empty() {
        lines.push("Items:".to_string());
        for item in &order.items {
            lines.push(format!(
                "  {:<24} {:>4} x {:>10} = {:>12}",
                item.product_name, item.quantity, item.price, item.amount
            ));
        }
    }
    lines.join("\n")
}

pub fn render_session(user: Option<&UserInfo>, state: &PermissionState) -> String {
    let mut lines = Vec::new();
    match user {
        Some(user) => lines.push(format!("User:        {} ({})", user.username, user.user_id)),
        None => lines.push("User:        <offline session>".to_string()),
    }
    lines.push(format!("Role:        {}", state.role()));

    let permissions: Vec<&str> = state.permissions().iter().map(String::as_str).collect();
    if permissions.is_empty() {
        lines.push("Permissions: <none>".to_string());
    } else {
        lines.push(format!("Permissions: {}", permissions.join(", ")));
    }
    lines.join("\n")
}

/// Describe an export result; `saved_to` is set when a file was written
pub fn render_outcome(outcome: &ExportOutcome, saved_to: Option<&str>) -> String {
    match outcome {
        ExportOutcome::File(artifact) => format!(
            "Saved {} bytes ({}) to {}",
            artifact.len(),
            artifact.content_type,
            saved_to.unwrap_or("<nowhere>")
        ),
        ExportOutcome::Accepted(ticket) => match &ticket.task_id {
            Some(task_id) => format!("Export accepted as task {}: {}", task_id, ticket.message),
            None => format!("Export accepted: {}", ticket.message),
        },
    }
}

/// Exception screen for page-level failures, an inline message otherwise
pub fn render_error(err: &ClientError) -> String {
    match err.exception_view() {
        Some(view) => view.to_string(),
        None => format!("error: {}", err),
    }
}
