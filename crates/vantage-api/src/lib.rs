//! Vantage API - request/response contract and domain models
//!
//! This crate defines the shapes every service call produces and consumes:
//! - `ApiResponse<T>`: the uniform envelope (code/message/data/success)
//! - `PageParams<F>` / `PageData<T>`: paginated list request and response
//! - Order domain types and export outcomes
//! - Route and menu metadata consumed by the permission layer
//! - Exception views for 403/404/500 screens

pub mod exception;
pub mod model;
pub mod order;
pub mod route;
pub mod user;
pub mod validation;

pub use exception::{ExceptionKind, ExceptionView, RecoveryAction};
pub use model::{ApiResponse, NoFilter, PageData, PageParams};
pub use order::{
    ExportArtifact, ExportOutcome, ExportRequest, ExportTicket, Order, OrderFilter, OrderItem,
    OrderStatus,
};
pub use route::{MenuConfig, MenuIssue, RouteConfig, RouteMeta};
pub use user::UserInfo;
