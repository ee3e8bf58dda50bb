//! Acknowledgment reconciliation.
//!
//! Parses an inbound acknowledgment file, validates its routing header and
//! applies each entry as a status transition on the matching work
//! registration. Per-entry preconditions are checked in a fixed order and a
//! failing entry is skipped with an event message — it never aborts the
//! batch. Only structural problems (malformed document, wrong receiving
//! agency) reject the file wholesale, before any entry is processed.
//!
//! Transition per entry, short-circuiting on the first failing check:
//!
//! 1. the original transaction must be an add-work transaction
//! 2. the original submission id must resolve to a registration
//! 3. that registration must still be awaiting a response
//! 4. the transaction status must be a recognized terminal outcome
//! 5. `FullyAccepted` -> approved, with the agency-assigned work code
//! 6. `Rejected` -> rejected
//!
//! The final guard-and-write is a single atomic store operation, so an
//! entry that loses a race against a concurrent import surfaces as the
//! corresponding skip instead of a double transition.

use serde::{Deserialize, Serialize};

use crate::api::logs::{log_success, log_warning};
use crate::error::{ImportError, ImportResult, StoreResult};
use crate::export::envelope::SUBMITTING_AGENCY;
use crate::models::RegistrationStatus;
use crate::store::{CompletionOutcome, RegistrationStore, WorkDecision};

/// Transaction type of an original work submission.
pub const ADD_WORK_TRANSACTION: &str = "AddWork";

/// Terminal outcome: the agency accepted the submission.
pub const FULLY_ACCEPTED: &str = "FullyAccepted";

/// Terminal outcome: the agency rejected the submission.
pub const REJECTED: &str = "Rejected";

// =============================================================================
// Inbound Document
// =============================================================================

/// An acknowledgment file produced by the agency.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgmentFile {
    pub file_header: AckFileHeader,
    #[serde(default)]
    pub acknowledgements: Vec<Acknowledgment>,
}

/// Inbound routing header; `receiving_agency` must name us.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckFileHeader {
    pub receiving_agency: String,
}

/// One acknowledgment entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    /// The acknowledgment's own id, referenced in event messages when the
    /// agency includes it.
    #[serde(default)]
    pub submission_id: Option<u64>,
    pub original_transaction_type: String,
    /// Id of the work submission this entry answers.
    pub original_submission_id: u64,
    pub transaction_status: String,
    /// Agency-assigned work code, present on acceptance.
    #[serde(default)]
    pub codwork_sq: Option<String>,
}

impl Acknowledgment {
    /// Id used in event messages: the entry's own id when present, the
    /// original submission id otherwise.
    fn reference_id(&self) -> u64 {
        self.submission_id.unwrap_or(self.original_submission_id)
    }
}

// =============================================================================
// Report
// =============================================================================

/// Success/failure tally of one import batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportStats {
    pub success: u32,
    pub failure: u32,
}

/// Aggregate outcome of one import batch: ordered skip messages plus tally.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub events: Vec<String>,
    pub stats: ImportStats,
}

enum EntryOutcome {
    Applied,
    Skipped(String),
}

// =============================================================================
// Reconciler
// =============================================================================

/// Parse uploaded bytes as an acknowledgment file.
pub fn parse_acknowledgment_file(bytes: &[u8]) -> ImportResult<AcknowledgmentFile> {
    serde_json::from_slice(bytes).map_err(ImportError::MalformedDocument)
}

/// Reconcile a parsed acknowledgment file against the store.
///
/// Returns the per-entry report; fails only on a wrong receiving agency or
/// a store failure.
pub fn reconcile_works(
    store: &dyn RegistrationStore,
    file: &AcknowledgmentFile,
) -> ImportResult<ImportReport> {
    if file.file_header.receiving_agency != SUBMITTING_AGENCY {
        return Err(ImportError::UnrecognizedAgency(
            file.file_header.receiving_agency.clone(),
        ));
    }

    let mut report = ImportReport::default();

    for ack in &file.acknowledgements {
        match reconcile_entry(store, ack)? {
            EntryOutcome::Applied => report.stats.success += 1,
            EntryOutcome::Skipped(message) => {
                log_warning(&message);
                report.events.push(message);
                report.stats.failure += 1;
            }
        }
    }

    log_success(format!(
        "Reconciled acknowledgments: {} applied, {} skipped",
        report.stats.success, report.stats.failure
    ));
    Ok(report)
}

fn reconcile_entry(store: &dyn RegistrationStore, ack: &Acknowledgment) -> StoreResult<EntryOutcome> {
    if ack.original_transaction_type != ADD_WORK_TRANSACTION {
        return Ok(EntryOutcome::Skipped(format!(
            "Acknowledgment {} skipped: not an add-work transaction",
            ack.reference_id()
        )));
    }

    let Some(work) = store.find_work(ack.original_submission_id)? else {
        return Ok(EntryOutcome::Skipped(not_found_message(ack)));
    };

    if work.status != RegistrationStatus::AwaitingResponse {
        return Ok(EntryOutcome::Skipped(not_awaiting_message(ack)));
    }

    let decision = match ack.transaction_status.as_str() {
        FULLY_ACCEPTED => WorkDecision::Accept {
            // Copied verbatim when present; an acceptance without a code
            // leaves the registration's code unset.
            work_code: ack.codwork_sq.clone(),
        },
        REJECTED => WorkDecision::Reject,
        other => {
            return Ok(EntryOutcome::Skipped(format!(
                "Acknowledgment {} skipped: unsupported transaction status '{}'",
                ack.reference_id(),
                other
            )))
        }
    };

    // Guard re-checked atomically with the write; a lost race reports as
    // the matching skip rather than a second transition.
    match store.complete_work(ack.original_submission_id, decision)? {
        CompletionOutcome::Applied => Ok(EntryOutcome::Applied),
        CompletionOutcome::NotFound => Ok(EntryOutcome::Skipped(not_found_message(ack))),
        CompletionOutcome::NotAwaiting => Ok(EntryOutcome::Skipped(not_awaiting_message(ack))),
    }
}

fn not_found_message(ack: &Acknowledgment) -> String {
    format!(
        "Acknowledgment {} skipped: no registration found for id {}",
        ack.reference_id(),
        ack.original_submission_id
    )
}

fn not_awaiting_message(ack: &Acknowledgment) -> String {
    format!(
        "Acknowledgment {} skipped: registration {} is not awaiting a response",
        ack.reference_id(),
        ack.original_submission_id
    )
}
