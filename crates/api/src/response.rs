//! Shared response envelope for API handlers.
//!
//! Every successful JSON body uses a `{ "data": ... }` envelope. Use
//! [`DataResponse`] rather than ad-hoc `serde_json::json!({ "data": ... })`
//! so the payload type stays checked at compile time.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
