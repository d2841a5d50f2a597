// Admin API path constants

pub mod api_path {
    // Orders
    pub const ORDER_LIST: &str = "/api/orders";
    pub const ORDER: &str = "/api/orders";
    pub const ORDER_EXPORT: &str = "/api/orders/export";
    pub const ORDER_EXCEL: &str = "/api/orders/export/excel";

    // User
    pub const USER_INFO: &str = "/api/user/info";
}

/// Authorization header scheme
pub const BEARER_PREFIX: &str = "Bearer ";

/// Content type of JSON envelopes
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Fallback content type for binary downloads without one
pub const OCTET_STREAM: &str = "application/octet-stream";
