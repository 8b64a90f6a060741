//! Error handling for catalog service operations.

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ServerMessage;

/// Common error type for catalog service operations.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("invalid catalog base url '{url}'")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("could not reach catalog service")]
    Request(#[source] reqwest::Error),
    #[error("catalog request failed: {status}: {detail}")]
    ErrorResponse { status: StatusCode, detail: String },
    #[error("could not decode catalog response")]
    Deserialize(#[source] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// Error type for the two credential endpoints.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the credentials or the registration payload.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    CatalogClient(#[from] CatalogClientError),
}

/// Extract the server's detail message from a response body.
///
/// The service reports failures as `{"message": "..."}`; anything else is
/// passed through verbatim.
pub(crate) async fn response_detail(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => match serde_json::from_str::<ServerMessage>(&body) {
            Ok(parsed) => parsed.message,
            Err(_) => body,
        },
        Err(_) => String::from("response body omitted"),
    }
}

/// Turn a non-success response into [CatalogClientError::ErrorResponse],
/// capturing the server's detail message.
pub(crate) async fn reject_error_response(
    response: reqwest::Response,
) -> Result<reqwest::Response, CatalogClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response_detail(response).await;
    Err(CatalogClientError::ErrorResponse { status, detail })
}
