//! tallybox-core: Core types and tally state machine for a single-election
//! vote ledger.
//!
//! One component owns all election state: an [`Election`] is constructed
//! once from a roster (eligible voter identities plus candidate names) and
//! then serves votes and read queries indefinitely.
//!
//! - [`Election`]: fixed roster, one vote per voter, per-candidate tallies,
//!   deterministic winner (highest tally, ties broken by lowest index)
//! - [`SignedBallot`]: the authenticated form of a vote
//! - [`SharedElection`]: thread-safe hosting with serialized mutation
//! - [`genesis`]: construction config and account provisioning

mod ballot;
mod election;
mod error;
pub mod genesis;
mod identity;
mod shared;

pub use ballot::SignedBallot;
pub use election::{Candidate, Election, VoterRecord, VoterStatus};
pub use error::{Error, RosterViolation};
pub use identity::{Address, ElectionId};
pub use shared::SharedElection;

/// Re-export for convenience
pub use ed25519_dalek::{Signature, SigningKey, VerifyingKey};
