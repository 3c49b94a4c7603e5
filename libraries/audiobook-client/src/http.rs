//! Shared request/response plumbing for the sub-clients.

use crate::error::{ClientError, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Send a request, classifying connection failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    })
}

/// Turn a non-success status into `ClientError::Status` carrying the body text.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            status: status.as_u16(),
            message: error_text,
        })
    }
}

/// Check the status and decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let response = check_status(response).await?;
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

/// Check the status and return the plain-text body.
pub(crate) async fn read_text(response: Response) -> Result<String> {
    let response = check_status(response).await?;
    Ok(response.text().await?)
}

/// Check the status and discard the body.
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    check_status(response).await.map(|_| ())
}

/// Percent-encode a single path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
