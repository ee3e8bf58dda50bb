//! Registration store boundary.
//!
//! The bridge never owns registration data; it reads eligible records for
//! export and applies terminal transitions on import through the
//! [`RegistrationStore`] trait. [`MemoryStore`](memory::MemoryStore) is the
//! bundled implementation, backed by an optional JSON snapshot on disk.
//!
//! The work transition is a single conditional operation
//! ([`RegistrationStore::complete_work`]): the awaiting-response guard and the
//! write happen inside one store call, so two imports racing on the same
//! submission id cannot both apply.

pub mod memory;

use crate::error::StoreResult;
use crate::models::{JingleRegistration, MemberRegistration, WorkRegistration};

pub use memory::{MemoryStore, Snapshot};

// =============================================================================
// Work Transitions
// =============================================================================

/// The terminal decision an acknowledgment carries for a work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkDecision {
    /// Fully accepted, with the work code when the agency assigned one.
    Accept { work_code: Option<String> },
    /// Rejected.
    Reject,
}

/// Result of a conditional work transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The registration was awaiting a response and is now terminal.
    Applied,
    /// No registration with that id exists.
    NotFound,
    /// The registration exists but is not awaiting a response.
    NotAwaiting,
}

// =============================================================================
// Store Trait
// =============================================================================

/// Access to registration records.
///
/// `eligible_*` return every record currently awaiting the agency's response,
/// with sub-entities (shares, files, agreements) already loaded. Export never
/// mutates; [`complete_work`](Self::complete_work) is the only write path and
/// persists each transition individually and immediately.
pub trait RegistrationStore: Send + Sync {
    /// All works awaiting the agency's response.
    fn eligible_works(&self) -> StoreResult<Vec<WorkRegistration>>;

    /// All jingle clearance requests awaiting the agency's response.
    fn eligible_jingles(&self) -> StoreResult<Vec<JingleRegistration>>;

    /// All member enrollments awaiting the agency's response.
    fn eligible_members(&self) -> StoreResult<Vec<MemberRegistration>>;

    /// Look up a work by id.
    fn find_work(&self, id: u64) -> StoreResult<Option<WorkRegistration>>;

    /// Apply a terminal decision to a work iff it is still awaiting a
    /// response. Guard and write are atomic with respect to other callers.
    fn complete_work(&self, id: u64, decision: WorkDecision) -> StoreResult<CompletionOutcome>;
}
