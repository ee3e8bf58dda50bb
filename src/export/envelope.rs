//! File envelope builder.
//!
//! Wraps mapped work documents in the agency's routing header and derives
//! the download filenames for all three export kinds. No entity state is
//! touched here.

use chrono::{DateTime, Local};
use serde::Serialize;

use super::work::WorkDocument;

/// Our agency code on the wire.
pub const SUBMITTING_AGENCY: &str = "128";

/// The rights-registration agency we submit to.
pub const RECEIVING_AGENCY: &str = "061";

/// Fixed `$schema` tag of the work submission format.
pub const WORK_SCHEMA: &str = "./work_schema.json";

/// Header timestamp: local time with microsecond precision and offset.
const HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%Z";

// =============================================================================
// Envelope Shapes
// =============================================================================

/// Top level of a work submission file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkFileEnvelope {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub file_header: FileHeader,
    pub add_works: Vec<WorkDocument>,
}

/// Routing header of a work submission file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHeader {
    pub submitting_agency: &'static str,
    pub file_creation_date_time: String,
    pub receiving_agency: &'static str,
}

// =============================================================================
// Builders
// =============================================================================

/// Wrap work documents in the submission envelope.
pub fn work_envelope(documents: Vec<WorkDocument>, created: DateTime<Local>) -> WorkFileEnvelope {
    WorkFileEnvelope {
        schema: WORK_SCHEMA,
        file_header: FileHeader {
            submitting_agency: SUBMITTING_AGENCY,
            file_creation_date_time: created.format(HEADER_TIMESTAMP_FORMAT).to_string(),
            receiving_agency: RECEIVING_AGENCY,
        },
        add_works: documents,
    }
}

/// `work-<timestamp>-128-061-registros.json`
pub fn work_file_name(created: DateTime<Local>) -> String {
    format!(
        "work-{}-{}-{}-registros.json",
        created.format("%Y-%m-%dT%H:%M:%S"),
        SUBMITTING_AGENCY,
        RECEIVING_AGENCY
    )
}

/// `jingle-<timestamp>-inclusiones.json`
pub fn jingle_file_name(created: DateTime<Local>) -> String {
    format!("jingle-{}-inclusiones.json", created.format("%Y-%m-%dT%H-%M-%S"))
}

/// `socios-<timestamp>-registros.json`
pub fn member_file_name(created: DateTime<Local>) -> String {
    format!("socios-{}-registros.json", created.format("%Y-%m-%dT%H-%M-%S"))
}
