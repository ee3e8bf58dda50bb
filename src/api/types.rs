//! REST API types for the integration endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::import::{ImportReport, ImportStats};

/// Body returned by `POST /api/import/works` after a processed batch.
///
/// `status` is `"success"` whenever the file itself was accepted; per-entry
/// skips show up in `events` and the failure tally instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub status: String,
    pub events: Vec<String>,
    pub stats: ImportStatsBody,
}

/// Success/failure tally in the import response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStatsBody {
    pub success: u32,
    pub failure: u32,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        let ImportStats { success, failure } = report.stats;
        ImportResponse {
            status: "success".to_string(),
            events: report.events,
            stats: ImportStatsBody { success, failure },
        }
    }
}

/// Create an error response body.
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}
