//! Export pipeline: eligible registrations to downloadable submission files.
//!
//! ```text
//! ┌───────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐
//! │   Store   │────▶│  Mapper  │────▶│ Envelope │────▶│ Rewriter │
//! │ (eligible)│     │ (typed)  │     │ (header) │     │ (quotes) │
//! └───────────┘     └──────────┘     └──────────┘     └──────────┘
//! ```
//!
//! Works are wrapped in the routing-header envelope and pass through the
//! numeric-literal rewriter; jingles and members serialize as flat arrays.
//! Export never mutates entity state: an exported record stays eligible
//! until an acknowledgment moves it.

pub mod envelope;
pub mod jingle;
pub mod member;
pub mod rewrite;
pub mod work;

use chrono::Local;

use crate::api::logs::{log_info, log_success};
use crate::error::ExportResult;
use crate::store::RegistrationStore;

/// Calendar date rendering used across all three document kinds.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// A fully assembled, named submission file ready for download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Export all works awaiting the agency's response as one submission file.
///
/// The serialized envelope is post-processed by
/// [`rewrite::unquote_numeric_fields`]; the result is deliberately not
/// grammar-conformant JSON.
pub fn export_works(store: &dyn RegistrationStore) -> ExportResult<ExportFile> {
    let works = store.eligible_works()?;
    log_info(format!("Exporting {} eligible work(s)", works.len()));

    let documents = works.iter().map(work::map_work).collect();
    let created = Local::now();
    let envelope = envelope::work_envelope(documents, created);

    let text = serde_json::to_string_pretty(&envelope)?;
    let contents = rewrite::unquote_numeric_fields(&text);

    let file = ExportFile {
        file_name: envelope::work_file_name(created),
        contents,
    };
    log_success(format!("Assembled {}", file.file_name));
    Ok(file)
}

/// Export all jingle clearance requests awaiting the agency's response as a
/// flat array file.
pub fn export_jingles(store: &dyn RegistrationStore) -> ExportResult<ExportFile> {
    let jingles = store.eligible_jingles()?;
    log_info(format!("Exporting {} eligible jingle(s)", jingles.len()));

    let documents: Vec<_> = jingles.iter().map(jingle::map_jingle).collect();
    let created = Local::now();

    let file = ExportFile {
        file_name: envelope::jingle_file_name(created),
        contents: serde_json::to_string_pretty(&documents)?,
    };
    log_success(format!("Assembled {}", file.file_name));
    Ok(file)
}

/// Export all member enrollments awaiting the agency's response as a flat
/// array file.
pub fn export_members(store: &dyn RegistrationStore) -> ExportResult<ExportFile> {
    let members = store.eligible_members()?;
    log_info(format!("Exporting {} eligible member(s)", members.len()));

    let documents: Vec<_> = members.iter().map(member::map_member).collect();
    let created = Local::now();

    let file = ExportFile {
        file_name: envelope::member_file_name(created),
        contents: serde_json::to_string_pretty(&documents)?,
    };
    log_success(format!("Assembled {}", file.file_name));
    Ok(file)
}
