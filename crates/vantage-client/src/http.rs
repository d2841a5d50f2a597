//! HTTP client with bearer authentication and envelope decoding
//!
//! Every JSON endpoint answers with an [`ApiResponse`] envelope. This client
//! unwraps it: a success envelope yields its typed `data`, a failure envelope
//! becomes [`ClientError::Domain`], and anything that is not an envelope is a
//! transport-level failure.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, warn};
use vantage_api::{ApiResponse, ExportArtifact, ExportOutcome, ExportTicket};

use crate::config::ClientConfig;
use crate::constants::{BEARER_PREFIX, JSON_CONTENT_TYPE, OCTET_STREAM};
use crate::error::{ClientError, ClientResult};

/// HTTP client for the admin API
pub struct VantageHttpClient {
    client: Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl VantageHttpClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        let token = RwLock::new(config.token.clone());
        Ok(Self {
            client,
            config,
            token,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build full URL with context path
    fn build_url(&self, path: &str) -> String {
        let base_url = self.config.server_addr.trim_end_matches('/');
        let context_path = self.config.context_path.trim_matches('/');

        if context_path.is_empty() {
            format!("{}{}", base_url, path)
        } else {
            format!("{}/{}{}", base_url, context_path, path)
        }
    }

    pub fn set_token(&self, token: &str) {
        *self.token.write() = Some(token.to_string());
    }

    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().as_deref() {
            Some(token) => request.header(AUTHORIZATION, format!("{}{}", BEARER_PREFIX, token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> ClientResult<Response> {
        match self.authorize(request).send().await {
            Ok(response) => {
                debug!("{} -> {}", path, response.status());
                Ok(response)
            }
            Err(e) => {
                warn!("Request to {} failed: {}", path, e);
                Err(ClientError::Transport(e))
            }
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.build_url(path);
        let response = self.send(self.client.get(&url), path).await?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let url = self.build_url(path);
        let response = self.send(self.client.get(&url).query(query), path).await?;
        self.handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.build_url(path);
        let response = self.send(self.client.post(&url).json(body), path).await?;
        self.handle_response(response).await
    }

    /// Make a GET request to an endpoint that answers with a file or an envelope
    pub async fn get_export(&self, path: &str) -> ClientResult<ExportOutcome> {
        let url = self.build_url(path);
        let response = self.send(self.client.get(&url), path).await?;
        self.handle_export(response).await
    }

    /// Make a POST request to an endpoint that answers with a file or an envelope
    pub async fn post_export<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ExportOutcome> {
        let url = self.build_url(path);
        let response = self.send(self.client.post(&url).json(body), path).await?;
        self.handle_export(response).await
    }

    /// Handle a JSON response and unwrap its envelope
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response.bytes().await?;

        let (data, _) = decode_envelope(status, &body)?;
        // A success envelope without data still satisfies `()` and `Option<_>`
        serde_json::from_value(data.unwrap_or(Value::Null)).map_err(|e| {
            error!("Failed to decode response data: {}", e);
            ClientError::Serialization(e)
        })
    }

    /// Handle a response that is either a binary file or a JSON envelope
    async fn handle_export(&self, response: Response) -> ClientResult<ExportOutcome> {
        let status = response.status();
        let content_type = header_str(&response, CONTENT_TYPE.as_str());
        let file_name = header_str(&response, CONTENT_DISPOSITION.as_str())
            .as_deref()
            .and_then(parse_file_name);
        let body = response.bytes().await?;

        let is_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with(JSON_CONTENT_TYPE));

        if is_json || !status.is_success() {
            let (data, message) = decode_envelope(status, &body)?;
            let mut ticket: ExportTicket = match data {
                Some(value) if !value.is_null() => serde_json::from_value(value)?,
                _ => ExportTicket::default(),
            };
            if ticket.message.is_empty() {
                ticket.message = message;
            }
            debug!("Export accepted: task={:?}", ticket.task_id);
            return Ok(ExportOutcome::Accepted(ticket));
        }

        debug!("Export returned {} bytes ({:?})", body.len(), file_name);
        Ok(ExportOutcome::File(ExportArtifact {
            file_name,
            content_type: content_type.unwrap_or_else(|| OCTET_STREAM.to_string()),
            bytes: body.to_vec(),
        }))
    }
}

/// Decode an envelope and return its payload and message
///
/// Failure envelopes are honored whatever the HTTP status; a body that is not
/// an envelope is an error unless the status was a success, in which case it
/// is a malformed response.
fn decode_envelope(status: StatusCode, body: &[u8]) -> ClientResult<(Option<Value>, String)> {
    let envelope: ApiResponse<Value> = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            error!("Response is not an API envelope: {}", e);
            return Err(ClientError::InvalidResponse(format!(
                "response is not an API envelope: {}",
                e
            )));
        }
        Err(_) => {
            let body = String::from_utf8_lossy(body).into_owned();
            error!("Request failed with status {}: {}", status, body);
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }
    };

    let code = envelope.code;
    let message = envelope.message.clone();
    let data = envelope.into_result().map_err(|e| {
        warn!("API error (status {}, code {}): {}", status, code, e);
        ClientError::from(e)
    })?;

    if !status.is_success() {
        // A success envelope on an error status is not trustworthy
        return Err(ClientError::Http {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    Ok((data, message))
}

fn header_str(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Extract the file name from a Content-Disposition header value
///
/// Prefers the plain `filename` parameter; falls back to the value of
/// `filename*` after its charset prefix.
fn parse_file_name(disposition: &str) -> Option<String> {
    let mut extended = None;

    for part in disposition.split(';').map(str::trim) {
        if let Some(value) = part.strip_prefix("filename=") {
            let value = value.trim_matches('"');
            if !value.is_empty() {
                return Some(value.to_string());
            }
        } else if let Some(value) = part.strip_prefix("filename*=") {
            let value = value.rsplit("''").next().unwrap_or(value).trim_matches('"');
            if !value.is_empty() {
                extended = Some(value.to_string());
            }
        }
    }

    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_common::error;

    fn client(server: &str, context_path: &str) -> VantageHttpClient {
        VantageHttpClient::new(ClientConfig::new(server).with_context_path(context_path)).unwrap()
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            client("http://localhost:8080", "").build_url("/api/orders"),
            "http://localhost:8080/api/orders"
        );
        assert_eq!(
            client("http://localhost:8080/", "/admin/").build_url("/api/orders"),
            "http://localhost:8080/admin/api/orders"
        );
    }

    #[test]
    fn test_token_lifecycle() {
        let client = client("http://localhost:8080", "");
        assert!(!client.has_token());
        client.set_token("abc");
        assert!(client.has_token());
        client.clear_token();
        assert!(!client.has_token());

        let client = VantageHttpClient::new(ClientConfig::default().with_token("t")).unwrap();
        assert!(client.has_token());
    }

    #[test]
    fn test_parse_file_name() {
        assert_eq!(
            parse_file_name("attachment; filename=\"orders.xlsx\"").as_deref(),
            Some("orders.xlsx")
        );
        assert_eq!(
            parse_file_name("attachment; filename*=UTF-8''orders-2024.csv").as_deref(),
            Some("orders-2024.csv")
        );
        assert_eq!(
            parse_file_name("attachment; filename*=UTF-8''b.csv; filename=a.csv").as_deref(),
            Some("a.csv")
        );
        assert_eq!(parse_file_name("inline"), None);
    }

    #[test]
    fn test_decode_success_envelope() {
        let body = br#"{"code":0,"message":"success","data":{"a":1},"success":true}"#;
        let (data, message) = decode_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(data.unwrap()["a"], 1);
        assert_eq!(message, "success");

        let body = br#"{"code":200,"message":"ok","success":true}"#;
        assert!(decode_envelope(StatusCode::OK, body).unwrap().0.is_none());
    }

    #[test]
    fn test_decode_failure_envelope_on_any_status() {
        let body = br#"{"code":20004,"message":"order not found","success":false}"#;
        for status in [StatusCode::OK, StatusCode::NOT_FOUND] {
            match decode_envelope(status, body) {
                Err(ClientError::Domain { code, message }) => {
                    assert_eq!(code, error::RESOURCE_NOT_FOUND.code);
                    assert_eq!(message, "order not found");
                }
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_decode_non_envelope() {
        assert!(matches!(
            decode_envelope(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>"),
            Err(ClientError::Http { status: 502, .. })
        ));
        assert!(matches!(
            decode_envelope(StatusCode::OK, b"not json"),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_decode_inconsistent_envelope() {
        let body = br#"{"code":0,"message":"success","success":false}"#;
        assert!(matches!(
            decode_envelope(StatusCode::OK, body),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_decode_success_envelope_on_error_status() {
        let body = br#"{"code":0,"message":"success","success":true}"#;
        assert!(matches!(
            decode_envelope(StatusCode::INTERNAL_SERVER_ERROR, body),
            Err(ClientError::Http { status: 500, .. })
        ));
    }
}
