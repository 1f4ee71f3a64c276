//! Shared response envelope types for API handlers.
//!
//! Single resources and plain lists use `{ "data": ... }`; paginated
//! listings add `total`, `limit` and `offset` so clients can page without a
//! second request. Auth endpoints return their token payload unwrapped.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: movie }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [T], "total": n, "limit": l, "offset": o }` envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    /// Number of rows matching the filter, ignoring pagination.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
