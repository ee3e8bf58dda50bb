//! # Agencylink - Rights-agency submission export and acknowledgment import
//!
//! Agencylink bridges internal registration records (musical works, jingle
//! broadcast clearances, member enrollments) and the external
//! rights-registration agency: it exports records awaiting the agency's
//! decision as fixed-schema JSON submission files, and reconciles the
//! agency's acknowledgment files back into record status.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐     ┌──────────┐     ┌──────────┐     ┌─────────────┐
//! │   Store   │────▶│  Mapper  │────▶│ Envelope │────▶│  Rewriter   │  export
//! │ (eligible)│     │ (typed)  │     │ (header) │     │ (unquoting) │
//! └───────────┘     └──────────┘     └──────────┘     └─────────────┘
//!
//! ┌───────────┐     ┌──────────┐     ┌────────────┐     ┌──────────┐
//! │  Upload   │────▶│  Parse   │────▶│ Reconciler │────▶│  Report  │  import
//! │  (file)   │     │ (header) │     │ (per entry)│     │ (tally)  │
//! └───────────┘     └──────────┘     └────────────┘     └──────────┘
//! ```
//!
//! The work submission format requires certain zero-padded codes to appear
//! as *unquoted* numeric literals, which standard JSON cannot express; the
//! export therefore serializes normally and post-processes the text
//! ([`export::rewrite`]). The import applies each acknowledgment as an
//! atomic, guarded status transition with per-entry accounting
//! ([`import::reconcile_works`]).
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Registration domain entities
//! - [`store`] - Registration store trait and snapshot-backed implementation
//! - [`export`] - Mappers, envelope, numeric-literal rewriter
//! - [`import`] - Acknowledgment parsing and reconciliation
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Persistence boundary
pub mod store;

// Export pipeline
pub mod export;

// Acknowledgment reconciliation
pub mod import;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ExportError, ImportError, ServerError, StoreError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Distribution, DistributionHolder, JingleRegistration, MemberRegistration,
    RegistrationStatus, WorkRegistration,
};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{CompletionOutcome, MemoryStore, RegistrationStore, Snapshot, WorkDecision};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{export_jingles, export_members, export_works, ExportFile};

// =============================================================================
// Re-exports - Import
// =============================================================================

pub use import::{
    parse_acknowledgment_file, reconcile_works, Acknowledgment, AcknowledgmentFile, ImportReport,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ImportResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
