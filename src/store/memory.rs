//! In-memory registration store with an optional JSON snapshot on disk.
//!
//! Loads the full record set up front and serializes all access through a
//! mutex, which also makes the work transition atomic per record. When opened
//! from a snapshot file, every applied transition is written back immediately,
//! so a failure partway through an import batch leaves earlier transitions
//! committed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::models::{
    JingleRegistration, MemberRegistration, RegistrationStatus, WorkRegistration,
};

use super::{CompletionOutcome, RegistrationStore, WorkDecision};

/// The full registration record set, as serialized to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub works: Vec<WorkRegistration>,
    #[serde(default)]
    pub jingles: Vec<JingleRegistration>,
    #[serde(default)]
    pub members: Vec<MemberRegistration>,
}

/// Mutex-guarded registration store.
pub struct MemoryStore {
    inner: Mutex<Snapshot>,
    /// When set, transitions are persisted here as they are applied.
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// Create an empty store with no backing file.
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    /// Create a store from an in-memory snapshot, no backing file.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: Mutex::new(snapshot),
            path: None,
        }
    }

    /// Open a snapshot file; subsequent transitions are written back to it.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(Self {
            inner: Mutex::new(snapshot),
            path: Some(path),
        })
    }

    /// Insert a work registration (test and seed helper).
    pub fn insert_work(&self, work: WorkRegistration) -> StoreResult<()> {
        self.lock()?.works.push(work);
        Ok(())
    }

    /// Insert a jingle registration (test and seed helper).
    pub fn insert_jingle(&self, jingle: JingleRegistration) -> StoreResult<()> {
        self.lock()?.jingles.push(jingle);
        Ok(())
    }

    /// Insert a member registration (test and seed helper).
    pub fn insert_member(&self, member: MemberRegistration) -> StoreResult<()> {
        self.lock()?.members.push(member);
        Ok(())
    }

    /// Copy of the current record set.
    pub fn snapshot(&self) -> StoreResult<Snapshot> {
        Ok(self.lock()?.clone())
    }

    /// Write the current record set to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let snapshot = self.snapshot()?;
        let content = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Snapshot>> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Persist the guarded snapshot to the backing file, if any.
    fn persist(&self, snapshot: &Snapshot) -> StoreResult<()> {
        if let Some(ref path) = self.path {
            let content = serde_json::to_string_pretty(snapshot)?;
            fs::write(path, content)?;
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationStore for MemoryStore {
    fn eligible_works(&self) -> StoreResult<Vec<WorkRegistration>> {
        Ok(self
            .lock()?
            .works
            .iter()
            .filter(|w| w.status == RegistrationStatus::AwaitingResponse)
            .cloned()
            .collect())
    }

    fn eligible_jingles(&self) -> StoreResult<Vec<JingleRegistration>> {
        Ok(self
            .lock()?
            .jingles
            .iter()
            .filter(|j| j.status == RegistrationStatus::AwaitingResponse)
            .cloned()
            .collect())
    }

    fn eligible_members(&self) -> StoreResult<Vec<MemberRegistration>> {
        Ok(self
            .lock()?
            .members
            .iter()
            .filter(|m| m.status == RegistrationStatus::AwaitingResponse)
            .cloned()
            .collect())
    }

    fn find_work(&self, id: u64) -> StoreResult<Option<WorkRegistration>> {
        Ok(self.lock()?.works.iter().find(|w| w.id == id).cloned())
    }

    fn complete_work(&self, id: u64, decision: WorkDecision) -> StoreResult<CompletionOutcome> {
        let mut inner = self.lock()?;

        let Some(work) = inner.works.iter_mut().find(|w| w.id == id) else {
            return Ok(CompletionOutcome::NotFound);
        };

        // The status guard and the write happen under the same lock, so a
        // second import racing on this id observes NotAwaiting.
        if work.status != RegistrationStatus::AwaitingResponse {
            return Ok(CompletionOutcome::NotAwaiting);
        }

        match decision {
            WorkDecision::Accept { work_code } => {
                work.status = RegistrationStatus::Approved;
                work.approved = true;
                work.work_code = work_code;
            }
            WorkDecision::Reject => {
                work.status = RegistrationStatus::Rejected;
                work.approved = true;
            }
        }

        self.persist(&inner)?;
        Ok(CompletionOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Distribution, DistributionHolder};

    fn work(id: u64, status: RegistrationStatus) -> WorkRegistration {
        WorkRegistration {
            id,
            title: "Test Work".into(),
            other_titles: vec![],
            album_title: "Test Album".into(),
            genre_id: 3,
            duration: 180,
            is_jingle: false,
            is_movie: false,
            unpublished_number_letter: 0,
            unpublished_number_music: 0,
            unpublished_date: None,
            edited_number_letter: 0,
            edited_number_music: 0,
            edited_date: None,
            status,
            approved: false,
            work_code: None,
            distribution: vec![Distribution {
                holder: DistributionHolder::Other {
                    name: "Someone".into(),
                },
                performance: 1.0,
                mechanical: 0.0,
                synchronization: 0.0,
                role: "CA".into(),
            }],
            files: vec![],
        }
    }

    #[test]
    fn test_eligibility_filter() {
        let store = MemoryStore::new();
        store.insert_work(work(1, RegistrationStatus::AwaitingResponse)).unwrap();
        store.insert_work(work(2, RegistrationStatus::Draft)).unwrap();
        store.insert_work(work(3, RegistrationStatus::Approved)).unwrap();

        let eligible = store.eligible_works().unwrap();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, 1);
    }

    #[test]
    fn test_complete_work_accept() {
        let store = MemoryStore::new();
        store.insert_work(work(7, RegistrationStatus::AwaitingResponse)).unwrap();

        let outcome = store
            .complete_work(
                7,
                WorkDecision::Accept {
                    work_code: Some("W-0042".into()),
                },
            )
            .unwrap();
        assert_eq!(outcome, CompletionOutcome::Applied);

        let updated = store.find_work(7).unwrap().unwrap();
        assert_eq!(updated.status, RegistrationStatus::Approved);
        assert!(updated.approved);
        assert_eq!(updated.work_code.as_deref(), Some("W-0042"));
    }

    #[test]
    fn test_complete_work_accept_without_code() {
        let store = MemoryStore::new();
        store.insert_work(work(8, RegistrationStatus::AwaitingResponse)).unwrap();

        let outcome = store
            .complete_work(8, WorkDecision::Accept { work_code: None })
            .unwrap();
        assert_eq!(outcome, CompletionOutcome::Applied);

        let updated = store.find_work(8).unwrap().unwrap();
        assert_eq!(updated.status, RegistrationStatus::Approved);
        assert!(updated.approved);
        assert!(updated.work_code.is_none());
    }

    #[test]
    fn test_complete_work_guards() {
        let store = MemoryStore::new();
        store.insert_work(work(1, RegistrationStatus::Approved)).unwrap();

        // Wrong state: no mutation, no second transition.
        let outcome = store.complete_work(1, WorkDecision::Reject).unwrap();
        assert_eq!(outcome, CompletionOutcome::NotAwaiting);
        assert_eq!(
            store.find_work(1).unwrap().unwrap().status,
            RegistrationStatus::Approved
        );

        // Unknown id.
        let outcome = store.complete_work(99, WorkDecision::Reject).unwrap();
        assert_eq!(outcome, CompletionOutcome::NotFound);
    }

    #[test]
    fn test_snapshot_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrations.json");

        let store = MemoryStore::new();
        store.insert_work(work(5, RegistrationStatus::AwaitingResponse)).unwrap();
        store.save_to(&path).unwrap();

        let reopened = MemoryStore::open(&path).unwrap();
        reopened.complete_work(5, WorkDecision::Reject).unwrap();

        // The transition was written back immediately.
        let reread = MemoryStore::open(&path).unwrap();
        let w = reread.find_work(5).unwrap().unwrap();
        assert_eq!(w.status, RegistrationStatus::Rejected);
        assert!(w.approved);
        assert!(w.work_code.is_none());
    }
}
