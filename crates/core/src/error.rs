//! Error types for tallybox-core.
//!
//! Every variant is a rejected call: the engine checks all preconditions
//! before touching any state, so an error never leaves a partial mutation
//! behind.

use thiserror::Error;

use crate::identity::{Address, ElectionId};

/// Core errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Construction rejected; no engine was created.
    #[error("invalid roster: {0}")]
    InvalidRoster(RosterViolation),

    /// Vote from an identity absent from the roster.
    #[error("not registered: {0}")]
    NotRegistered(Address),

    /// Vote from a voter who has already voted. The message prefix is a
    /// stable part of the contract.
    #[error("already voted: {0}")]
    AlreadyVoted(Address),

    /// Candidate index outside the fixed candidate list.
    #[error("invalid candidate index {index} (election has {count} candidates)")]
    InvalidCandidate { index: usize, count: usize },

    /// Signed ballot whose signature does not verify for the carried key.
    #[error("ballot signature invalid for voter {0}")]
    BallotSignature(Address),

    /// Signed ballot bound to a different election.
    #[error("ballot for election {ballot}, this election is {election}")]
    WrongElection {
        ballot: ElectionId,
        election: ElectionId,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The ways a construction roster can be invalid.
#[derive(Debug, Error)]
pub enum RosterViolation {
    /// The candidate list was empty.
    #[error("no candidates")]
    NoCandidates,

    /// The same identity appeared twice in the voter list.
    #[error("duplicate voter identity: {0}")]
    DuplicateVoter(Address),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
