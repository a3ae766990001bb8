//! The tally engine: one election's roster, tally, and winner.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::error::{Error, RosterViolation};
use crate::genesis::ElectionConfig;
use crate::identity::{Address, ElectionId};

/// A candidate and the votes received so far.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display name. Candidates are selected by index; the name is a label.
    pub name: String,
    /// Number of accepted votes for this candidate.
    pub votes: u64,
}

impl Candidate {
    /// A fresh candidate with zero votes.
    pub fn new(name: String) -> Self {
        Self { name, votes: 0 }
    }
}

/// One voter's slot in the roster.
///
/// The two-state shape makes "voted but no recorded choice" unrepresentable:
/// a voter either never voted, or voted exactly once for one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoterRecord {
    /// Registered, vote not yet cast.
    Fresh,
    /// Vote cast for the candidate at this index.
    Voted {
        /// Index into the candidate list.
        candidate: usize,
    },
}

impl VoterRecord {
    /// Whether this voter has cast their vote.
    pub fn has_voted(&self) -> bool {
        matches!(self, VoterRecord::Voted { .. })
    }

    /// The chosen candidate index, if the vote was cast.
    pub fn choice(&self) -> Option<usize> {
        match self {
            VoterRecord::Fresh => None,
            VoterRecord::Voted { candidate } => Some(*candidate),
        }
    }
}

/// Result of a voter-status query. Unknown identities are a valid query
/// outcome (`registered: false`), never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterStatus {
    /// Whether the identity is in the roster.
    pub registered: bool,
    /// Whether the identity has voted. Always `false` when unregistered.
    pub voted: bool,
}

/// A single election: fixed roster, fixed candidate list, one vote per
/// voter, and a deterministic winner.
///
/// All mutation goes through [`Election::vote`] (or [`Election::cast`] for
/// signed ballots), which takes `&mut self`, so every accepted vote is an
/// all-or-nothing step. For shared multi-threaded hosting, see
/// [`SharedElection`](crate::SharedElection).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Election {
    id: ElectionId,
    owner: Address,
    candidates: Vec<Candidate>,
    voters: BTreeMap<Address, VoterRecord>,
    ballots_cast: u64,
}

impl Election {
    /// Construct an election from a config.
    ///
    /// Requires a non-empty candidate list and a duplicate-free voter list;
    /// the engine imposes no relation between voter count and candidate
    /// count. The config's deployer is recorded as the immutable owner.
    pub fn new(config: ElectionConfig) -> Result<Self, Error> {
        if config.candidates.is_empty() {
            return Err(Error::InvalidRoster(RosterViolation::NoCandidates));
        }

        let mut voters = BTreeMap::new();
        for address in &config.voters {
            if voters.insert(*address, VoterRecord::Fresh).is_some() {
                return Err(Error::InvalidRoster(RosterViolation::DuplicateVoter(
                    *address,
                )));
            }
        }

        // Content-address the election before the config is consumed.
        let id = ElectionId::of_value(&config);

        let election = Self {
            id,
            owner: config.deployer,
            candidates: config.candidates.into_iter().map(Candidate::new).collect(),
            voters,
            ballots_cast: 0,
        };

        info!(
            %id,
            voters = election.voters.len(),
            candidates = election.candidates.len(),
            "election created"
        );

        Ok(election)
    }

    /// Cast `voter`'s vote for the candidate at `candidate` index.
    ///
    /// Checks run in order (registration, not-yet-voted, index range) and
    /// all of them precede any mutation, so a rejected call leaves the
    /// ledger untouched.
    pub fn vote(&mut self, voter: Address, candidate: usize) -> Result<(), Error> {
        let record = self
            .voters
            .get_mut(&voter)
            .ok_or(Error::NotRegistered(voter))?;

        if record.has_voted() {
            return Err(Error::AlreadyVoted(voter));
        }

        if candidate >= self.candidates.len() {
            return Err(Error::InvalidCandidate {
                index: candidate,
                count: self.candidates.len(),
            });
        }

        *record = VoterRecord::Voted { candidate };
        self.candidates[candidate].votes += 1;
        self.ballots_cast += 1;

        debug!(%voter, candidate, name = %self.candidates[candidate].name, "vote accepted");

        Ok(())
    }

    /// Snapshot of the candidate at `index`.
    pub fn candidate(&self, index: usize) -> Result<&Candidate, Error> {
        self.candidates.get(index).ok_or(Error::InvalidCandidate {
            index,
            count: self.candidates.len(),
        })
    }

    /// All candidates in index order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of candidates (fixed at construction).
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Number of registered voters (fixed at construction).
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Number of accepted votes. Always equals the sum of candidate tallies.
    pub fn ballots_cast(&self) -> u64 {
        self.ballots_cast
    }

    /// Registration and voting status for an identity.
    pub fn voter_status(&self, voter: Address) -> VoterStatus {
        match self.voters.get(&voter) {
            None => VoterStatus {
                registered: false,
                voted: false,
            },
            Some(record) => VoterStatus {
                registered: true,
                voted: record.has_voted(),
            },
        }
    }

    /// The current winner: highest tally, ties broken by lowest index.
    ///
    /// A single forward scan keeps the first candidate achieving the
    /// maximum, so the all-zero tally yields the index-0 candidate. Defined
    /// whenever construction succeeded; repeated calls without intervening
    /// votes return the same candidate.
    pub fn winner(&self) -> &Candidate {
        // Candidate list is non-empty for the engine's lifetime.
        let mut best = &self.candidates[0];
        for candidate in &self.candidates[1..] {
            if candidate.votes > best.votes {
                best = candidate;
            }
        }
        best
    }

    /// The identity that constructed the election. Informational only; no
    /// owner-gated operation exists.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The content-derived election id.
    pub fn id(&self) -> ElectionId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genesis::ElectionConfig;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 32])
    }

    fn three_way() -> Election {
        let config = ElectionConfig {
            deployer: addr(0),
            voters: vec![addr(1), addr(2), addr(3), addr(4)],
            candidates: vec!["Alice".into(), "Bob".into(), "Charlie".into()],
        };
        Election::new(config).unwrap()
    }

    #[test]
    fn construction_starts_clean() {
        let election = three_way();
        assert_eq!(election.candidate_count(), 3);
        assert_eq!(election.voter_count(), 4);
        assert_eq!(election.ballots_cast(), 0);
        for candidate in election.candidates() {
            assert_eq!(candidate.votes, 0);
        }
        assert!(!election.voter_status(addr(1)).voted);
    }

    #[test]
    fn empty_candidates_rejected() {
        let config = ElectionConfig {
            deployer: addr(0),
            voters: vec![addr(1)],
            candidates: vec![],
        };
        let err = Election::new(config).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRoster(RosterViolation::NoCandidates)
        ));
    }

    #[test]
    fn duplicate_voter_rejected() {
        let config = ElectionConfig {
            deployer: addr(0),
            voters: vec![addr(1), addr(2), addr(1)],
            candidates: vec!["Alice".into()],
        };
        let err = Election::new(config).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRoster(RosterViolation::DuplicateVoter(a)) if a == addr(1)
        ));
    }

    #[test]
    fn empty_voter_roster_is_legal() {
        let config = ElectionConfig {
            deployer: addr(0),
            voters: vec![],
            candidates: vec!["Alice".into()],
        };
        let election = Election::new(config).unwrap();
        assert_eq!(election.voter_count(), 0);
        assert_eq!(election.winner().name, "Alice");
    }

    #[test]
    fn vote_updates_tally_and_status() {
        let mut election = three_way();
        election.vote(addr(1), 0).unwrap();

        assert_eq!(election.candidate(0).unwrap().votes, 1);
        assert_eq!(election.ballots_cast(), 1);
        let status = election.voter_status(addr(1));
        assert!(status.registered && status.voted);
    }

    #[test]
    fn second_vote_rejected_without_mutation() {
        let mut election = three_way();
        election.vote(addr(1), 0).unwrap();

        let before = election.clone();
        let err = election.vote(addr(1), 1).unwrap_err();
        assert!(matches!(err, Error::AlreadyVoted(a) if a == addr(1)));
        assert!(err.to_string().starts_with("already voted"));
        assert_eq!(election, before);
    }

    #[test]
    fn unregistered_vote_rejected_without_mutation() {
        let mut election = three_way();
        let stranger = addr(9);

        let before = election.clone();
        let err = election.vote(stranger, 0).unwrap_err();
        assert!(matches!(err, Error::NotRegistered(a) if a == stranger));
        assert_eq!(election, before);
    }

    #[test]
    fn out_of_range_vote_rejected_without_mutation() {
        let mut election = three_way();

        let before = election.clone();
        let err = election.vote(addr(1), 99).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCandidate { index: 99, count: 3 }
        ));
        assert_eq!(election, before);
        // Rejection did not consume the voter's one vote.
        election.vote(addr(1), 0).unwrap();
    }

    #[test]
    fn candidate_query_out_of_range() {
        let election = three_way();
        assert!(matches!(
            election.candidate(3),
            Err(Error::InvalidCandidate { index: 3, count: 3 })
        ));
    }

    #[test]
    fn winner_all_zero_is_first_candidate() {
        let election = three_way();
        let winner = election.winner();
        assert_eq!(winner.name, "Alice");
        assert_eq!(winner.votes, 0);
    }

    #[test]
    fn winner_tie_keeps_lowest_index() {
        let mut election = three_way();
        // Bob and Charlie tie at 1; Bob has the lower index.
        election.vote(addr(1), 1).unwrap();
        election.vote(addr(2), 2).unwrap();

        assert_eq!(election.winner().name, "Bob");
        // Repeated calls without mutation agree.
        assert_eq!(election.winner().name, "Bob");
    }

    #[test]
    fn winner_tracks_majority() {
        let mut election = three_way();
        election.vote(addr(1), 2).unwrap();
        election.vote(addr(2), 2).unwrap();
        election.vote(addr(3), 0).unwrap();

        let winner = election.winner();
        assert_eq!(winner.name, "Charlie");
        assert_eq!(winner.votes, 2);
    }

    #[test]
    fn owner_recorded_from_config() {
        let election = three_way();
        assert_eq!(election.owner(), addr(0));
    }

    #[test]
    fn voter_record_choice() {
        let mut election = three_way();
        election.vote(addr(2), 1).unwrap();
        assert_eq!(VoterRecord::Voted { candidate: 1 }.choice(), Some(1));
        assert_eq!(VoterRecord::Fresh.choice(), None);
        assert!(election.voter_status(addr(2)).voted);
    }
}
