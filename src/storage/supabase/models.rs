use serde::Deserialize;

use crate::storage::StorageError;

// ---------------------------------------------------------------------------
// PostgREST error body
//
// Any non-2xx answer from `/rest/v1/...` carries the same object:
//
//   { "code": "42P01", "message": "relation ... does not exist",
//     "details": null, "hint": null }
//
// Gateway-level failures (bad key, paused project) may send something else
// entirely, so every field is optional and the raw body is the last resort.
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct PostgrestError {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl PostgrestError {
    /// Build the `StorageError` for a failed response with the given status and body.
    pub fn into_storage_error(status: u16, body: &[u8]) -> StorageError {
        let parsed = serde_json::from_slice::<PostgrestError>(body).unwrap_or_default();

        let message = match (parsed.message, parsed.details) {
            (Some(msg), Some(details)) => format!("{msg} ({details})"),
            (Some(msg), None) => msg,
            (None, _) => {
                let raw = String::from_utf8_lossy(body).trim().to_owned();
                if raw.is_empty() {
                    "(empty response body)".to_owned()
                } else {
                    raw
                }
            }
        };

        StorageError::Api {
            status,
            code: parsed.code,
            message,
        }
    }
}
