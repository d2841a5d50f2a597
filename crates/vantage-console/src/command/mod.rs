//! Console command handlers
//!
//! Every command renders one page. The page is guarded against the route
//! table first, so a denied page prints the 403 screen without a request.

pub mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};
use vantage_api::{
    ExceptionKind, ExportArtifact, ExportOutcome, ExportRequest, OrderFilter, PageParams,
    RouteConfig, UserInfo,
};
use vantage_auth::{
    EvaluatorConfig, PermissionEvaluator, PermissionState, RoleBundles, RouteDecision,
    SessionWriter,
};
use vantage_client::VantageApiClient;

use crate::model::config::{Command, Configuration, OrdersCommand};
use crate::routes::{self, ORDER_EXPORT};
use render::{
    render_error, render_menu, render_order, render_order_page, render_outcome, render_session,
};

const DEFAULT_EXPORT_FILE: &str = "orders-export.xlsx";
const DEFAULT_EXCEL_FILE: &str = "orders.xlsx";

pub struct Console {
    client: VantageApiClient,
    session: SessionWriter,
    evaluator: PermissionEvaluator,
    routes: Vec<RouteConfig>,
    user: Option<UserInfo>,
}

impl Console {
    pub fn new(
        client: VantageApiClient,
        evaluator_config: EvaluatorConfig,
        routes: Vec<RouteConfig>,
    ) -> Self {
        let session = SessionWriter::anonymous();
        let evaluator = PermissionEvaluator::with_config(session.reader(), evaluator_config);
        Self {
            client,
            session,
            evaluator,
            routes,
            user: None,
        }
    }

    /// Build the console from configuration and load the session
    pub async fn connect(configuration: &Configuration) -> anyhow::Result<Self> {
        let client = VantageApiClient::new(configuration.client_config())?;
        let mut console = Self::new(client, configuration.evaluator_config(), routes::routes());
        console
            .bootstrap(configuration.session_state(), &configuration.role_bundles())
            .await;
        Ok(console)
    }

    /// Load the session from the current user when a token is set, falling
    /// back to `offline`
    pub async fn bootstrap(&mut self, offline: Option<PermissionState>, bundles: &RoleBundles) {
        if self.client.http_client().has_token() {
            match self.client.current_user().await {
                Ok(user) => {
                    self.session.login_user(&user, bundles);
                    self.user = Some(user);
                    return;
                }
                Err(e) => warn!("Failed to load current user, using offline session: {}", e),
            }
        }

        match offline {
            Some(state) => self.session.login(state),
            None => info!("No token or session role configured; session is anonymous"),
        }
    }

    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    pub fn session_mut(&mut self) -> &mut SessionWriter {
        &mut self.session
    }

    pub async fn execute(&self, command: &Command) -> anyhow::Result<String> {
        match command {
            Command::Menu => Ok(render_menu(&self.evaluator.build_menu(&self.routes))),
            Command::Whoami => Ok(self
                .guard(routes::PROFILE_PATH)
                .unwrap_or_else(|| render_session(self.user.as_ref(), &self.evaluator.snapshot()))),
            Command::Orders(orders) => self.execute_orders(orders).await,
        }
    }

    async fn execute_orders(&self, command: &OrdersCommand) -> anyhow::Result<String> {
        match command {
            OrdersCommand::List {
                page,
                page_size,
                keyword,
                status,
                customer,
            } => {
                if let Some(denied) = self.guard(routes::ORDER_LIST_PATH) {
                    return Ok(denied);
                }
                let mut filter = OrderFilter::default();
                if let Some(status) = status {
                    filter = filter.with_status(*status);
                }
                if let Some(customer) = customer {
                    filter = filter.with_customer(customer.as_str());
                }
                let mut params = PageParams::new(*page, *page_size);
                if let Some(keyword) = keyword {
                    params = params.with_keyword(keyword.as_str());
                }

                Ok(match self.client.get_order_list(&params.with_filters(filter)).await {
                    Ok(page) => {
                        let mut text = render_order_page(&page);
                        let can_export = self.evaluator.has_button_permission(Some(ORDER_EXPORT));
                        if can_export && !page.is_empty() {
                            text.push_str("\nExport with: orders export --id <ID>...");
                        }
                        text
                    }
                    Err(e) => render_error(&e),
                })
            }
            OrdersCommand::Get { id } => {
                if let Some(denied) = self.guard(routes::ORDER_DETAIL_PATH) {
                    return Ok(denied);
                }
                Ok(match self.client.get_order_detail(id).await {
                    Ok(order) => render_order(&order),
                    Err(e) => render_error(&e),
                })
            }
            OrdersCommand::Export { ids, status, output } => {
                if let Some(denied) = self.guard(routes::ORDER_EXPORT_PATH) {
                    return Ok(denied);
                }
                let request = if ids.is_empty() {
                    let mut filter = OrderFilter::default();
                    if let Some(status) = status {
                        filter = filter.with_status(*status);
                    }
                    ExportRequest::by_filter(filter)
                } else {
                    ExportRequest::by_ids(ids.clone())
                };

                match self.client.export_orders(&request).await {
                    Ok(outcome) => save_outcome(&outcome, output.as_deref(), DEFAULT_EXPORT_FILE),
                    Err(e) => Ok(render_error(&e)),
                }
            }
            OrdersCommand::Download { output } => {
                if let Some(denied) = self.guard(routes::ORDER_DOWNLOAD_PATH) {
                    return Ok(denied);
                }
                match self.client.download_order_excel().await {
                    Ok(outcome) => save_outcome(&outcome, output.as_deref(), DEFAULT_EXCEL_FILE),
                    Err(e) => Ok(render_error(&e)),
                }
            }
        }
    }

    /// The rendered exception screen if the page at `path` may not be shown
    fn guard(&self, path: &str) -> Option<String> {
        let Some(route) = RouteConfig::find(&self.routes, path) else {
            return Some(ExceptionKind::NotFound.view().to_string());
        };
        match self.evaluator.guard_route(&route.meta) {
            RouteDecision::Render => None,
            RouteDecision::Forbidden(view) => Some(view.to_string()),
        }
    }
}

fn save_outcome(
    outcome: &ExportOutcome,
    output: Option<&Path>,
    default_name: &str,
) -> anyhow::Result<String> {
    let ExportOutcome::File(artifact) = outcome else {
        return Ok(render_outcome(outcome, None));
    };

    let path = artifact_path(artifact, output, default_name);
    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} bytes to {}", artifact.len(), path.display());

    Ok(render_outcome(outcome, Some(path.display().to_string().as_str())))
}

/// Target path for a downloaded file; a server-provided name never leaves
/// the working directory
fn artifact_path(artifact: &ExportArtifact, output: Option<&Path>, default_name: &str) -> PathBuf {
    if let Some(output) = output {
        return output.to_path_buf();
    }
    Path::new(artifact.file_name_or(default_name))
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default_name))
}
