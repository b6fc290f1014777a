//! Problem responses for failed post requests (RFC 7807).

use serde::{Deserialize, Serialize};

/// RFC 7807 Problem Details, tagged with the request that produced them.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,

    pub title: String,

    pub status: u16,

    /// What went wrong with this request, e.g. the missing body field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Path of the request, e.g. `/posts/{id}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Same value as the `X-Request-ID` response header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            instance: None,
            request_id: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    /// Store failures stay opaque: no detail is sent.
    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
