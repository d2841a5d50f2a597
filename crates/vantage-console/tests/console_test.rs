// Console commands against an in-process mock of the admin API

use serde_json::json;
use vantage_auth::{EvaluatorConfig, RoleBundles};
use vantage_client::{ClientConfig, VantageApiClient};
use vantage_console::routes::{self, ORDER_EXPORT, ORDER_VIEW};
use vantage_console::{Command, Console, OrdersCommand};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "code": 0, "message": "success", "data": data, "success": true })
}

fn order_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "orderNo": "NO000001",
        "customerId": "c-1",
        "customerName": "Acme",
        "amount": 41.98,
        "status": "shipped",
        "items": [{
            "id": "item-1",
            "productId": "p-1",
            "productName": "Widget",
            "quantity": 2,
            "price": 20.99,
            "amount": 41.98
        }],
        "createdAt": "2024-03-01T08:00:00Z",
        "updatedAt": "2024-03-02T08:00:00Z"
    })
}

async fn signed_in_console(server: &MockServer, role: &str, permissions: &[&str]) -> Console {
    Mock::given(method("GET"))
        .and(path("/api/user/info"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "userId": "u-1",
            "username": "alice",
            "role": role,
            "permissions": permissions,
        }))))
        .mount(server)
        .await;

    let config = ClientConfig::new(&server.uri())
        .with_token("secret")
        .without_proxy();
    let client = VantageApiClient::new(config).unwrap();
    let mut console = Console::new(client, EvaluatorConfig::default(), routes::routes());
    let bundles = RoleBundles::new().with_role("manager", [ORDER_VIEW, ORDER_EXPORT]);
    console.bootstrap(None, &bundles).await;
    console
}

#[tokio::test]
async fn test_session_loaded_from_current_user() {
    let server = MockServer::start().await;
    let console = signed_in_console(&server, "manager", &[]).await;

    assert!(console.evaluator().has_page_permission(Some(ORDER_EXPORT)));
    let whoami = console.execute(&Command::Whoami).await.unwrap();
    assert!(whoami.contains("alice (u-1)"));
    assert!(whoami.contains("Role:        manager"));
}

#[tokio::test]
async fn test_list_orders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "list": [order_json("ord-001")],
            "total": 1,
            "page": 1,
            "pageSize": 20
        }))))
        .mount(&server)
        .await;
    let console = signed_in_console(&server, "staff", &[ORDER_VIEW]).await;

    let output = console
        .execute(&Command::Orders(OrdersCommand::List {
            page: 1,
            page_size: 20,
            keyword: None,
            status: None,
            customer: None,
        }))
        .await
        .unwrap();
    assert!(output.starts_with("Page 1/1 (1 orders, 20 per page)"));
    assert!(output.contains("ord-001"));
    // staff may not export, so no export hint
    assert!(!output.contains("orders export"));
}

#[tokio::test]
async fn test_missing_order_renders_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/nonexistent-id"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 20004,
            "message": "order nonexistent-id not found",
            "success": false
        })))
        .mount(&server)
        .await;
    let console = signed_in_console(&server, "staff", &[ORDER_VIEW]).await;

    let output = console
        .execute(&Command::Orders(OrdersCommand::Get {
            id: "nonexistent-id".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(
        output,
        "[404] order nonexistent-id not found (Back Home -> /)"
    );
}

#[tokio::test]
async fn test_download_writes_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/export/excel"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"spreadsheet".to_vec())
                .insert_header("content-disposition", "attachment; filename=\"orders.xlsx\""),
        )
        .mount(&server)
        .await;
    let console = signed_in_console(&server, "manager", &[]).await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("download.xlsx");
    let output = console
        .execute(&Command::Orders(OrdersCommand::Download {
            output: Some(target.clone()),
        }))
        .await
        .unwrap();

    assert!(output.starts_with("Saved 11 bytes"));
    assert_eq!(std::fs::read(&target).unwrap(), b"spreadsheet");
}

#[tokio::test]
async fn test_export_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders/export"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "taskId": "task-7", "message": "queued" }))),
        )
        .mount(&server)
        .await;
    let console = signed_in_console(&server, "manager", &[]).await;

    let output = console
        .execute(&Command::Orders(OrdersCommand::Export {
            ids: vec![],
            status: None,
            output: None,
        }))
        .await
        .unwrap();
    assert_eq!(output, "Export accepted as task task-7: queued");
}
