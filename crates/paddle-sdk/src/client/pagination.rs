// Response envelope and pagination metadata for the Paddle API

use serde::{Deserialize, Serialize};

/// Envelope wrapping every Paddle API response.
///
/// Paddle returns `{ "data": ..., "meta": { "request_id": ..., "pagination": ... } }`
/// for both single-entity and list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T> {
    /// Entity or entities returned by the request
    pub data: T,

    /// Request metadata
    pub meta: Meta,
}

/// Metadata attached to every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// Unique request identifier, useful when contacting Paddle support
    pub request_id: String,

    /// Pagination details, present on list responses only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Cursor-based pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of entities per page for this response
    pub per_page: u32,

    /// URL for the next page, including the `after` cursor
    pub next: String,

    /// Whether there is another page
    pub has_more: bool,

    /// Estimated number of entities for this query
    pub estimated_total: u64,
}

impl Pagination {
    /// Check if there are more pages available.
    pub fn has_next(&self) -> bool {
        self.has_more
    }

    /// Extract the `after` cursor from the next page URL.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use paddle_sdk::client::Pagination;
    ///
    /// let pagination = Pagination {
    ///     per_page: 50,
    ///     next: "https://api.paddle.com/customers?after=ctm_01h8&per_page=50".to_string(),
    ///     has_more: true,
    ///     estimated_total: 120,
    /// };
    ///
    /// assert_eq!(pagination.next_cursor().as_deref(), Some("ctm_01h8"));
    /// ```
    pub fn next_cursor(&self) -> Option<String> {
        let url = url::Url::parse(&self.next).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "after")
            .map(|(_, value)| value.into_owned())
    }
}

impl<T> Response<T> {
    /// Pagination metadata, if the response is a list.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.pagination.as_ref()
    }

    /// Check if this is the last page.
    ///
    /// Responses without pagination metadata are treated as a single page.
    pub fn is_last_page(&self) -> bool {
        !self.pagination().map(Pagination::has_next).unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
