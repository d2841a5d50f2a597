// Configuration for the HTTP client

/// Configuration for the Vantage HTTP client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Server address (e.g. "http://127.0.0.1:8080")
    pub server_addr: String,
    /// Context path prepended to every API path (e.g. "/admin")
    pub context_path: String,
    /// Bearer token sent with every request, if any
    pub token: Option<String>,
    /// Connection timeout in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds (default: 30000)
    pub read_timeout_ms: u64,
    /// Honor HTTP(S)_PROXY environment variables (default: true)
    pub use_system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "http://127.0.0.1:8080".to_string(),
            context_path: String::new(),
            token: None,
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
            use_system_proxy: true,
        }
    }
}

impl ClientConfig {
    pub fn new(server_addr: &str) -> Self {
        Self {
            server_addr: server_addr.to_string(),
            ..Default::default()
        }
    }

    pub fn with_context_path(mut self, path: &str) -> Self {
        self.context_path = path.to_string();
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    /// Connect directly, ignoring proxy environment variables
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }
}
