//! API response envelopes

use serde::Serialize;

use hrm_shared::Page;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

/// List envelope: `{success, data, totalPages, page, total}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub total_pages: u64,
    pub page: u32,
    pub total: u64,
}

impl<T: Serialize> From<Page<T>> for PaginatedResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            total_pages: page.total_pages(),
            page: page.page,
            total: page.total,
            data: page.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrm_shared::Pagination;
    use serde_json::json;

    #[test]
    fn test_message_only_envelope() {
        let body = serde_json::to_value(ApiResponse::message("Invoice sent successfully")).unwrap();
        assert_eq!(body, json!({"success": true, "message": "Invoice sent successfully"}));
    }

    #[test]
    fn test_paginated_envelope() {
        let page = Page::new(vec![1, 2, 3], 23, Pagination::new(Some(2), Some(10)));
        let body = serde_json::to_value(PaginatedResponse::from(page)).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "data": [1, 2, 3], "totalPages": 3, "page": 2, "total": 23})
        );
    }
}
