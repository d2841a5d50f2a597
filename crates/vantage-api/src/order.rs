//! Order domain model types
//!
//! Orders are created server-side; this layer reads and displays them and may
//! trigger an export, never mutating an order directly.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use vantage_common::VantageError;

use crate::validation::{MAX_EXPORT_IDS, validate_order_id};

/// `MAX_EXPORT_IDS` as `u64`, the type the `validator` length bounds require.
const MAX_EXPORT_IDS_U64: u64 = MAX_EXPORT_IDS as u64;

/// Order lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled orders never change status again
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

/// One line of an order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl OrderItem {
    /// `quantity * price`, the amount the line should carry
    pub fn expected_amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }

    pub fn is_amount_consistent(&self) -> bool {
        self.amount == self.expected_amount()
    }
}

/// Order entity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_no: String,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Order {
    pub fn created_at_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }

    pub fn updated_at_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.updated_at).ok()
    }

    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Lines whose amount differs from `quantity * price`
    pub fn inconsistent_items(&self) -> Vec<&OrderItem> {
        self.items
            .iter()
            .filter(|item| !item.is_amount_consistent())
            .collect()
    }
}

/// Typed filter fields for the order list endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_to: Option<String>,
}

impl OrderFilter {
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn created_between(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.created_from = Some(from.into());
        self.created_to = Some(to.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.customer_id.is_none()
            && self.created_from.is_none()
            && self.created_to.is_none()
    }
}

/// Export selection: explicit IDs, a filter, or neither (export everything)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = MAX_EXPORT_IDS_U64))]
    pub ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<OrderFilter>,
}

impl ExportRequest {
    pub fn by_ids(ids: Vec<String>) -> Self {
        Self {
            ids: Some(ids),
            filters: None,
        }
    }

    pub fn by_filter(filters: OrderFilter) -> Self {
        Self {
            ids: None,
            filters: Some(filters),
        }
    }

    /// Validate the selection before dispatch
    pub fn check(&self) -> Result<(), VantageError> {
        self.validate().map_err(|e| {
            VantageError::IllegalArgument(format!(
                "export ids must contain 1..={} entries: {}",
                MAX_EXPORT_IDS, e
            ))
        })?;

        if let Some(ids) = &self.ids {
            for id in ids {
                validate_order_id(id).map_err(|e| {
                    VantageError::IllegalArgument(format!("{} ({:?})", e.code, id))
                })?;
            }
        }

        Ok(())
    }
}

/// A file returned inline by an export or download endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn file_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.file_name.as_deref().unwrap_or(default)
    }
}

/// Acknowledgement for an export the server runs asynchronously
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTicket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Result of an export or download call
///
/// The variant follows the response the server actually sent: a binary body
/// becomes `File`, a success envelope becomes `Accepted`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    File(ExportArtifact),
    Accepted(ExportTicket),
}

impl ExportOutcome {
    pub fn artifact(&self) -> Option<&ExportArtifact> {
        match self {
            ExportOutcome::File(artifact) => Some(artifact),
            ExportOutcome::Accepted(_) => None,
        }
    }

    pub fn ticket(&self) -> Option<&ExportTicket> {
        match self {
            ExportOutcome::File(_) => None,
            ExportOutcome::Accepted(ticket) => Some(ticket),
        }
    }
}
