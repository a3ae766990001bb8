//! Election bootstrap: construction config and account provisioning.
//!
//! The engine only needs an [`ElectionConfig`]; everything else here is the
//! provisioning side of deployment. The stock setup generates twenty ed25519
//! accounts, registers them all as voters, runs the stock candidate list,
//! and deploys with account 0.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::identity::Address;

/// Everything construction needs: who deployed, who may vote, who runs.
///
/// `voters` is an ordered sequence of unique identities; `candidates` is an
/// ordered, non-empty list of names whose positions become the stable
/// candidate indices. Validation happens in
/// [`Election::new`](crate::Election::new).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionConfig {
    /// The identity performing construction, recorded as the owner.
    pub deployer: Address,
    /// Identities eligible to vote.
    pub voters: Vec<Address>,
    /// Candidate names; index = position.
    pub candidates: Vec<String>,
}

impl ElectionConfig {
    /// Parse a config from JSON (harness fixtures, interchange).
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The stock candidate list used by the default deployment.
pub const STOCK_CANDIDATES: [&str; 20] = [
    "John",
    "Emma",
    "Liam",
    "Olivia",
    "Noah",
    "Ava",
    "Elijah",
    "Sophia",
    "William",
    "Isabella",
    "James",
    "Mia",
    "Benjamin",
    "Charlotte",
    "Lucas",
    "Amelia",
    "Henry",
    "Harper",
    "Alexander",
    "Evelyn",
];

/// The stock candidate list as owned names.
pub fn stock_candidates() -> Vec<String> {
    STOCK_CANDIDATES.iter().map(|name| name.to_string()).collect()
}

/// An ordered set of generated accounts: signing keys plus their derived
/// addresses. This is the identity-sourcing layer the engine itself never
/// sees: it hands addresses to the config and signing keys to ballots.
pub struct Keyring {
    accounts: Vec<(Address, SigningKey)>,
}

impl Keyring {
    /// Generate `n` fresh ed25519 accounts.
    pub fn generate(n: usize) -> Self {
        let accounts = (0..n)
            .map(|_| {
                let key = SigningKey::generate(&mut OsRng);
                (Address::of_key(&key.verifying_key()), key)
            })
            .collect();
        Self { accounts }
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the keyring holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Address of the account at `index`, in generation order.
    pub fn address(&self, index: usize) -> Option<Address> {
        self.accounts.get(index).map(|(address, _)| *address)
    }

    /// Signing key of the account at `index`.
    pub fn signer(&self, index: usize) -> Option<&SigningKey> {
        self.accounts.get(index).map(|(_, key)| key)
    }

    /// Signing key for an address, if this keyring generated it.
    pub fn signer_for(&self, address: Address) -> Option<&SigningKey> {
        self.accounts
            .iter()
            .find(|(candidate, _)| *candidate == address)
            .map(|(_, key)| key)
    }

    /// All addresses, in generation order.
    pub fn addresses(&self) -> Vec<Address> {
        self.accounts.iter().map(|(address, _)| *address).collect()
    }

    /// Config with every account registered as a voter and account 0 as
    /// deployer, the stock deployment convention. `None` on an empty
    /// keyring (no account to deploy with).
    pub fn config(&self, candidates: Vec<String>) -> Option<ElectionConfig> {
        Some(ElectionConfig {
            deployer: self.address(0)?,
            voters: self.addresses(),
            candidates,
        })
    }
}
