//! Configuration management for the console
//!
//! Settings are layered: the YAML file (optional), then `VANTAGE_*`
//! environment variables, then command line flags.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use vantage_api::OrderStatus;
use vantage_api::model::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use vantage_auth::{EvaluatorConfig, PermissionState, RoleBundles};
use vantage_client::ClientConfig;

use super::constants::*;
use crate::startup::logging::LoggingConfig;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "vantage-console", version, about = "Admin console for the Vantage order service")]
pub struct Cli {
    /// Configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,
    /// Server address, e.g. http://127.0.0.1:8080
    #[arg(short = 's', long = "server")]
    pub server: Option<String>,
    /// Bearer token; the session is loaded from the current user when set
    #[arg(short = 't', long = "token")]
    pub token: Option<String>,
    /// Role of the offline session when no token is set
    #[arg(long = "role")]
    pub role: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the navigation menu visible to the session
    Menu,
    /// Print the signed-in user and session permissions
    Whoami,
    /// Order pages
    #[command(subcommand)]
    Orders(OrdersCommand),
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum OrdersCommand {
    /// List one page of orders
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,
        #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(long)]
        customer: Option<String>,
    },
    /// Show one order
    Get { id: String },
    /// Export orders by id, or by status when no id is given
    Export {
        #[arg(long = "id")]
        ids: Vec<String>,
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download every order as a spreadsheet
    Download {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let mut builder = Self::builder(&cli.config);

        if let Some(v) = &cli.server {
            builder = builder.set_override(SERVER_ADDR, v.as_str())?;
        }
        if let Some(v) = &cli.token {
            builder = builder.set_override(SERVER_TOKEN, v.as_str())?;
        }
        if let Some(v) = &cli.role {
            builder = builder.set_override(SESSION_ROLE, v.as_str())?;
        }

        Ok(Configuration {
            config: builder.build()?,
        })
    }

    /// Load a configuration file and the environment, without flag overrides
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        Ok(Configuration {
            config: Self::builder(path).build()?,
        })
    }

    fn builder(path: &str) -> ConfigBuilder<DefaultState> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_addr(&self) -> String {
        self.config
            .get_string(SERVER_ADDR)
            .unwrap_or(DEFAULT_SERVER_ADDR.to_string())
    }

    pub fn server_context_path(&self) -> String {
        self.config
            .get_string(SERVER_CONTEXT_PATH)
            .unwrap_or_default()
    }

    pub fn server_token(&self) -> Option<String> {
        self.config
            .get_string(SERVER_TOKEN)
            .ok()
            .filter(|t| !t.is_empty())
    }

    // ========================================================================
    // Client Configuration
    // ========================================================================

    /// Connect timeout; zero or negative values fall back to the default
    pub fn connect_timeout_ms(&self) -> u64 {
        self.config
            .get_int(CLIENT_CONNECT_TIMEOUT_MS)
            .ok()
            .filter(|v| *v > 0)
            .map(|v| v as u64)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS)
    }

    pub fn read_timeout_ms(&self) -> u64 {
        self.config
            .get_int(CLIENT_READ_TIMEOUT_MS)
            .ok()
            .filter(|v| *v > 0)
            .map(|v| v as u64)
            .unwrap_or(DEFAULT_READ_TIMEOUT_MS)
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.server_addr())
            .with_context_path(&self.server_context_path())
            .with_timeouts(self.connect_timeout_ms(), self.read_timeout_ms());
        if let Some(token) = self.server_token() {
            config = config.with_token(&token);
        }
        config
    }

    // ========================================================================
    // Authorization Configuration
    // ========================================================================

    pub fn super_roles(&self) -> Vec<String> {
        let roles = self.string_list(AUTH_SUPER_ROLES);
        if roles.is_empty() {
            vec![vantage_common::SUPER_ADMIN_ROLE.to_string()]
        } else {
            roles
        }
    }

    pub fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig::with_super_roles(self.super_roles())
    }

    pub fn role_bundles(&self) -> RoleBundles {
        self.config
            .get::<HashMap<String, Vec<String>>>(ROLES)
            .map(RoleBundles::from)
            .unwrap_or_default()
    }

    /// Offline session from `session.role` and `session.permissions`
    pub fn session_state(&self) -> Option<PermissionState> {
        let role = self
            .config
            .get_string(SESSION_ROLE)
            .ok()
            .filter(|r| !r.is_empty())?;
        Some(PermissionState::for_role(
            &role,
            &self.role_bundles(),
            self.string_list(SESSION_PERMISSIONS),
        ))
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn log_level(&self) -> String {
        self.config
            .get_string(LOGS_LEVEL)
            .unwrap_or(DEFAULT_LOG_LEVEL.to_string())
    }

    pub fn log_path(&self) -> Option<String> {
        self.config.get_string(LOGS_PATH).ok()
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.log_path(),
            self.config.get_bool(LOGS_CONSOLE).unwrap_or(true),
            self.config.get_bool(LOGS_FILE).unwrap_or(false),
            self.log_level(),
        )
    }

    /// A list from a YAML sequence or a comma-separated string
    fn string_list(&self, key: &str) -> Vec<String> {
        if let Ok(values) = self.config.get::<Vec<String>>(key) {
            return values;
        }
        self.config
            .get_string(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
