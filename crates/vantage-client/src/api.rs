// VantageApiClient - facade for the admin API service calls

use tracing::{debug, warn};
use vantage_api::{
    ExportOutcome, ExportRequest, Order, OrderFilter, PageData, PageParams, UserInfo,
    validation::validate_order_id,
};

use crate::{
    config::ClientConfig,
    constants::api_path,
    error::{ClientError, ClientResult},
    generation::RequestGeneration,
    http::VantageHttpClient,
};

/// Typed client for the admin API
pub struct VantageApiClient {
    http_client: VantageHttpClient,
}

impl VantageApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http_client = VantageHttpClient::new(config)?;
        Ok(Self { http_client })
    }

    /// Create a client from a single server address
    pub fn from_server_addr(addr: &str) -> ClientResult<Self> {
        Self::new(ClientConfig::new(addr))
    }

    pub fn http_client(&self) -> &VantageHttpClient {
        &self.http_client
    }

    // ============================================================================
    // Order APIs
    // ============================================================================

    /// List one page of orders
    ///
    /// The returned page and page size are the ones the server applied, which
    /// may differ from the request when the server clamps them.
    pub async fn get_order_list(
        &self,
        params: &PageParams<OrderFilter>,
    ) -> ClientResult<PageData<Order>> {
        params.check()?;

        let page: PageData<Order> = self
            .http_client
            .get_with_query(api_path::ORDER_LIST, params)
            .await?;
        page.check()?;

        if page.page != params.page || page.page_size != params.page_size {
            debug!(
                "Server adjusted paging: requested {}x{}, got {}x{}",
                params.page, params.page_size, page.page, page.page_size
            );
        }
        for order in &page.list {
            warn_inconsistent_items(order);
        }

        Ok(page)
    }

    /// Same as [`get_order_list`](Self::get_order_list), but resolves to
    /// [`ClientError::Stale`] if a newer request was issued on `generation`
    /// before this one completed
    pub async fn get_order_list_latest(
        &self,
        generation: &RequestGeneration,
        params: &PageParams<OrderFilter>,
    ) -> ClientResult<PageData<Order>> {
        generation.run(self.get_order_list(params)).await
    }

    pub async fn get_order_detail(&self, id: &str) -> ClientResult<Order> {
        validate_order_id(id)
            .map_err(|e| ClientError::InvalidArgument(format!("{} ({:?})", e.code, id)))?;

        let path = format!("{}/{}", api_path::ORDER, id);
        let order: Order = self.http_client.get(&path).await?;
        if order.id != id {
            return Err(ClientError::InvalidResponse(format!(
                "requested order {} but received {}",
                id, order.id
            )));
        }
        warn_inconsistent_items(&order);

        Ok(order)
    }

    /// Export orders selected by id or by filter
    pub async fn export_orders(&self, request: &ExportRequest) -> ClientResult<ExportOutcome> {
        request.check()?;

        let outcome = self
            .http_client
            .post_export(api_path::ORDER_EXPORT, request)
            .await?;
        log_outcome("export", &outcome);
        Ok(outcome)
    }

    /// Download every order as a spreadsheet
    pub async fn download_order_excel(&self) -> ClientResult<ExportOutcome> {
        let outcome = self.http_client.get_export(api_path::ORDER_EXCEL).await?;
        log_outcome("excel download", &outcome);
        Ok(outcome)
    }

    // ============================================================================
    // User APIs
    // ============================================================================

    /// Identity, role and permissions of the signed-in user
    pub async fn current_user(&self) -> ClientResult<UserInfo> {
        self.http_client.get(api_path::USER_INFO).await
    }
}

fn warn_inconsistent_items(order: &Order) {
    for item in order.inconsistent_items() {
        warn!(
            "Order {} item {}: amount {} != price {} x quantity {}",
            order.id, item.id, item.amount, item.price, item.quantity
        );
    }
}

fn log_outcome(operation: &str, outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::File(artifact) => debug!(
            "Order {} returned file {} ({} bytes)",
            operation,
            artifact.file_name_or("<unnamed>"),
            artifact.len()
        ),
        ExportOutcome::Accepted(ticket) => debug!(
            "Order {} accepted: task={:?} message={}",
            operation, ticket.task_id, ticket.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn client() -> VantageApiClient {
        // Nothing listens here; validation must fail before any request
        VantageApiClient::new(ClientConfig::new("http://127.0.0.1:9").without_proxy()).unwrap()
    }

    #[tokio::test]
    async fn test_detail_rejects_bad_ids_before_dispatch() {
        let client = client();
        let long = "x".repeat(65);
        for id in ["", "   ", "a/b", "has space", ".", "..", "%2e%2e", long.as_str()] {
            let err = client.get_order_detail(id).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "id {:?}", id);
        }
    }

    #[tokio::test]
    async fn test_list_rejects_bad_paging_before_dispatch() {
        let client = client();
        let params = PageParams::new(0, 10).with_filters(OrderFilter::default());
        let err = client.get_order_list(&params).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_export_rejects_empty_selection() {
        let client = client();
        let err = client
            .export_orders(&ExportRequest::by_ids(vec![]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
