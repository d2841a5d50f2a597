//! Common API models and constants
//!
//! This module defines the envelope wrapped around every response and the
//! paginated list request/response pair shared by all list endpoints.

use serde::{Deserialize, Serialize};
use vantage_common::{VantageError, is_success_code};

use crate::validation::{validate_keyword, validate_page};

/// Default page number (1-based)
pub const DEFAULT_PAGE: u32 = 1;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Uniform API envelope
///
/// ```json
/// {
///     "code": 0,
///     "message": "success",
///     "data": { ... },
///     "success": true
/// }
/// ```
///
/// `success` must agree with `code`: the constructors derive it from the code,
/// and a decoded envelope that disagrees is rejected by [`ApiResponse::into_result`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Build an envelope, deriving `success` from `code`
    pub fn from_parts(code: i32, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
            success: is_success_code(code),
        }
    }

    pub fn ok(data: T) -> Self {
        Self::from_parts(vantage_common::error::SUCCESS.code, "success", Some(data))
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self::from_parts(code, message, None)
    }

    /// Whether the `success` flag agrees with the meaning of `code`
    pub fn is_consistent(&self) -> bool {
        self.success == is_success_code(self.code)
    }

    /// Split the envelope into its payload or a domain failure
    ///
    /// Success envelopes may legitimately carry no data; use
    /// [`ApiResponse::into_data`] when a payload is required.
    pub fn into_result(self) -> Result<Option<T>, VantageError> {
        if !self.is_consistent() {
            return Err(VantageError::ContractViolation(format!(
                "success flag {} disagrees with code {}",
                self.success, self.code
            )));
        }

        if !self.success {
            return Err(VantageError::ApiError {
                code: self.code,
                message: self.message,
            });
        }

        Ok(self.data)
    }

    pub fn into_data(self) -> Result<T, VantageError> {
        self.into_result()?
            .ok_or_else(|| VantageError::ContractViolation("missing response data".to_string()))
    }
}

/// Filter type for list endpoints that accept no extra filter fields
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoFilter {}

/// Paginated list request
///
/// Endpoint-specific filter fields live in `F` and are flattened into the
/// query next to `page`, `pageSize` and `keyword`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams<F = NoFilter> {
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(flatten)]
    pub filters: F,
}

impl Default for PageParams<NoFilter> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

impl PageParams<NoFilter> {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            keyword: None,
            filters: NoFilter::default(),
        }
    }
}

impl<F> PageParams<F> {
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_filters<G>(self, filters: G) -> PageParams<G> {
        PageParams {
            page: self.page,
            page_size: self.page_size,
            keyword: self.keyword,
            filters,
        }
    }

    /// Zero-based offset of the first requested item
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) as u64 * self.page_size as u64
    }

    /// Validate paging bounds and the keyword before dispatch
    pub fn check(&self) -> Result<(), VantageError> {
        validate_page(self.page, self.page_size)
            .map_err(|e| VantageError::IllegalArgument(e.code.to_string()))?;

        if let Some(keyword) = &self.keyword {
            validate_keyword(keyword)
                .map_err(|e| VantageError::IllegalArgument(e.code.to_string()))?;
        }

        Ok(())
    }
}

/// Paginated list response
///
/// `page` and `page_size` are the values the server actually applied, which
/// may differ from the request when the server clamps out-of-range values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self {
            list: vec![],
            total: 0,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<T> PageData<T> {
    pub fn new(list: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        Self {
            list,
            total,
            page,
            page_size,
        }
    }

    /// Number of pages needed to hold `total` items
    pub fn pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.pages()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Check the list/total/page-size invariants of a received page
    pub fn check(&self) -> Result<(), VantageError> {
        if self.page == 0 || self.page_size == 0 {
            return Err(VantageError::ContractViolation(format!(
                "page {} and page size {} must be >= 1",
                self.page, self.page_size
            )));
        }

        let len = self.list.len();
        if len > self.page_size as usize {
            return Err(VantageError::ContractViolation(format!(
                "list length {} exceeds page size {}",
                len, self.page_size
            )));
        }

        if (len as u64) > self.total {
            return Err(VantageError::ContractViolation(format!(
                "total {} is less than list length {}",
                self.total, len
            )));
        }

        Ok(())
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageData<U> {
        PageData {
            list: self.list.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
