use std::sync::Arc;

use tracing::info;

use trackdb_core::error::Result;
use trackdb_core::traits::MemberStore;
use trackdb_core::types::Member;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyMember,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    NotMember,
}

/// Opt-in / opt-out bookkeeping. Callers send the greeting or goodbye
/// text; this service only keeps the registry straight.
pub struct Enrolment<S> {
    store: Arc<S>,
}

impl<S: MemberStore> Enrolment<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create the member record on first contact; repeat joins are no-ops.
    pub fn join(&self, member: Member) -> Result<JoinOutcome> {
        if self.store.find(member.id)?.is_some() {
            return Ok(JoinOutcome::AlreadyMember);
        }
        info!(id = member.id, "new member");
        self.store.insert(&member)?;
        Ok(JoinOutcome::Joined)
    }

    pub fn leave(&self, id: u64) -> Result<LeaveOutcome> {
        if self.store.remove(id)? {
            info!(id, "member left");
            Ok(LeaveOutcome::Left)
        } else {
            Ok(LeaveOutcome::NotMember)
        }
    }
}
