//! Shared hosting: one mutual-exclusion boundary per election.
//!
//! The core [`Election`] takes `&mut self` for mutation, which already
//! serializes votes under single-threaded hosting. [`SharedElection`] is the
//! multi-threaded form: a cloneable handle whose mutating calls go through a
//! write lock, while queries share a read lock and observe only fully
//! applied votes.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ballot::SignedBallot;
use crate::election::{Candidate, Election, VoterStatus};
use crate::error::Error;
use crate::identity::{Address, ElectionId};

/// Cloneable, thread-safe handle to one election.
#[derive(Clone)]
pub struct SharedElection {
    inner: Arc<RwLock<Election>>,
}

impl SharedElection {
    /// Wrap an election for shared hosting.
    pub fn new(election: Election) -> Self {
        Self {
            inner: Arc::new(RwLock::new(election)),
        }
    }

    // A poisoned lock only means another thread panicked while holding it;
    // every mutation is all-or-nothing, so the ledger underneath is still
    // consistent and safe to keep serving.
    fn read(&self) -> RwLockReadGuard<'_, Election> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Election> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serialized form of [`Election::vote`].
    pub fn vote(&self, voter: Address, candidate: usize) -> Result<(), Error> {
        self.write().vote(voter, candidate)
    }

    /// Serialized form of [`Election::cast`].
    pub fn cast(&self, ballot: &SignedBallot) -> Result<(), Error> {
        self.write().cast(ballot)
    }

    /// Snapshot of the candidate at `index`.
    pub fn candidate(&self, index: usize) -> Result<Candidate, Error> {
        self.read().candidate(index).cloned()
    }

    /// Snapshot of all candidates in index order.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.read().candidates().to_vec()
    }

    /// Number of candidates.
    pub fn candidate_count(&self) -> usize {
        self.read().candidate_count()
    }

    /// Number of registered voters.
    pub fn voter_count(&self) -> usize {
        self.read().voter_count()
    }

    /// Number of accepted votes.
    pub fn ballots_cast(&self) -> u64 {
        self.read().ballots_cast()
    }

    /// Registration and voting status for an identity.
    pub fn voter_status(&self, voter: Address) -> VoterStatus {
        self.read().voter_status(voter)
    }

    /// Snapshot of the current winner.
    pub fn winner(&self) -> Candidate {
        self.read().winner().clone()
    }

    /// The owner identity.
    pub fn owner(&self) -> Address {
        self.read().owner()
    }

    /// The election id.
    pub fn id(&self) -> ElectionId {
        self.read().id()
    }

    /// A consistent copy of the whole ledger (copy-on-read): queries against
    /// the returned [`Election`] cannot observe later votes.
    pub fn snapshot(&self) -> Election {
        self.read().clone()
    }
}

impl From<Election> for SharedElection {
    fn from(election: Election) -> Self {
        Self::new(election)
    }
}
