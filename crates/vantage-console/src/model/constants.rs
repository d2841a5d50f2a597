// Configuration keys and defaults

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";

/// Prefix of environment variables, e.g. `VANTAGE_SERVER__ADDR`
pub const ENV_PREFIX: &str = "VANTAGE";
pub const ENV_SEPARATOR: &str = "__";

// Server
pub const SERVER_ADDR: &str = "server.addr";
pub const SERVER_CONTEXT_PATH: &str = "server.context_path";
pub const SERVER_TOKEN: &str = "server.token";
pub const DEFAULT_SERVER_ADDR: &str = "http://127.0.0.1:8080";

// Client
pub const CLIENT_CONNECT_TIMEOUT_MS: &str = "client.connect_timeout_ms";
pub const CLIENT_READ_TIMEOUT_MS: &str = "client.read_timeout_ms";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 30000;

// Session used when no token is configured
pub const SESSION_ROLE: &str = "session.role";
pub const SESSION_PERMISSIONS: &str = "session.permissions";

// Authorization
pub const AUTH_SUPER_ROLES: &str = "auth.super_roles";
pub const ROLES: &str = "roles";

// Logging
pub const LOGS_LEVEL: &str = "logs.level";
pub const LOGS_PATH: &str = "logs.path";
pub const LOGS_CONSOLE: &str = "logs.console";
pub const LOGS_FILE: &str = "logs.file";
pub const DEFAULT_LOG_LEVEL: &str = "info";
