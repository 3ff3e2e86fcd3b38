//! Standardized API response types (RFC 7807 compliant for errors).

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// One page of a listing, with navigation hints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u64>,
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::conflict("taken")).unwrap();

        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 409);
        assert_eq!(json["detail"], "taken");
        assert!(json.get("instance").is_none());
    }

    #[test]
    fn test_page_response_omits_missing_links() {
        let page = PageResponse::<u32> {
            items: vec![1, 2, 3],
            page: 1,
            per_page: 3,
            total_items: 3,
            total_pages: 1,
            next_page: None,
            prev_page: None,
        };

        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("next_page").is_none());
        assert!(json.get("prev_page").is_none());
    }
}
