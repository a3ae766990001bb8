//! Signed ballots: the authenticated form of a vote.
//!
//! The engine's [`Election::vote`] trusts its caller to have authenticated
//! the voter. A [`SignedBallot`] is one way callers do that: an ed25519
//! signature over the canonical CBOR of (election id, candidate index),
//! carrying the voter's verifying key. The voter address is derived from the
//! carried key, so a ballot is self-authenticating (no key registry needed)
//! and a ballot signed for one election cannot land in another.
//!
//! Replay is inert by construction: applying the same ballot twice fails
//! with the already-voted rejection.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::election::Election;
use crate::error::Error;
use crate::identity::{Address, ElectionId};

/// A vote for `candidate`, signed by the holder of `voter_key` and bound to
/// one election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBallot {
    /// The voter's ed25519 verifying key bytes.
    pub voter_key: [u8; 32],

    /// The election this ballot is bound to.
    pub election: ElectionId,

    /// Chosen candidate index.
    pub candidate: usize,

    /// Ed25519 signature over the ballot content.
    pub signature: Vec<u8>,
}

impl SignedBallot {
    /// Create and sign a ballot.
    pub fn new(election: ElectionId, candidate: usize, key: &SigningKey) -> Self {
        let content = signable_content(&election, candidate);
        let signature = key.sign(&content);

        Self {
            voter_key: key.verifying_key().to_bytes(),
            election,
            candidate,
            signature: signature.to_bytes().to_vec(),
        }
    }

    /// The voter address derived from the carried key.
    pub fn voter(&self) -> Address {
        Address::of_key_bytes(&self.voter_key)
    }

    /// Check election binding and signature; on success return the voter
    /// address to vote as. No election state is consulted: registration and
    /// one-vote enforcement stay with the engine.
    pub fn verify(&self, election: &ElectionId) -> Result<Address, Error> {
        let voter = self.voter();

        if self.election != *election {
            return Err(Error::WrongElection {
                ballot: self.election,
                election: *election,
            });
        }

        let key = VerifyingKey::from_bytes(&self.voter_key)
            .map_err(|_| Error::BallotSignature(voter))?;

        if self.signature.len() != 64 {
            return Err(Error::BallotSignature(voter));
        }
        let sig_bytes: [u8; 64] = self.signature.as_slice().try_into().expect("length checked");
        let signature = Signature::from_bytes(&sig_bytes);

        let content = signable_content(&self.election, self.candidate);
        key.verify(&content, &signature)
            .map_err(|_| Error::BallotSignature(voter))?;

        Ok(voter)
    }
}

/// The bytes a ballot signs: canonical CBOR of (election, candidate).
fn signable_content(election: &ElectionId, candidate: usize) -> Vec<u8> {
    #[derive(Serialize)]
    struct SignableBallot<'a> {
        election: &'a ElectionId,
        candidate: usize,
    }

    let mut buf = Vec::new();
    ciborium::into_writer(
        &SignableBallot {
            election,
            candidate,
        },
        &mut buf,
    )
    .expect("serialization should not fail");
    buf
}

impl Election {
    /// Verify a signed ballot against this election, then apply it as a
    /// vote from the derived voter address.
    pub fn cast(&mut self, ballot: &SignedBallot) -> Result<(), Error> {
        let voter = match ballot.verify(&self.id()) {
            Ok(voter) => voter,
            Err(err) => {
                debug!(voter = %ballot.voter(), %err, "ballot rejected");
                return Err(err);
            }
        };
        self.vote(voter, ballot.candidate)
    }
}
