//! Minimal Squads v4 client layer
//!
//! Covers only what multisig creation needs: PDA derivation, the
//! `multisig_create_v2` instruction, and the `ProgramConfig` account. The
//! full protocol (proposals, vault transactions, spending limits) is out of
//! scope.

mod instruction;
mod pda;
mod state;

pub use instruction::{multisig_create_v2, MultisigCreateAccounts, MultisigCreateArgsV2};
pub use pda::{get_multisig_pda, get_program_config_pda};
pub use state::ProgramConfig;

use borsh::BorshSerialize;
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

/// The canonical Squads v4 program ID
pub const SQUADS_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("SQDS4ep65T869zMMBKyuUq6aD6EgTu8psMjkvj52pCf");

/// Seed constants for PDA derivation
pub mod seeds {
    pub const SEED_PREFIX: &[u8] = b"multisig";
    pub const SEED_PROGRAM_CONFIG: &[u8] = b"program_config";
    pub const SEED_MULTISIG: &[u8] = b"multisig";
}

/// Anchor discriminator: first 8 bytes of `sha256("<namespace>:<name>")`.
fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{}:{}", namespace, name).as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

/// Instruction discriminator (`global` namespace)
pub(crate) fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator("global", name)
}

/// Account discriminator (`account` namespace)
pub(crate) fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator("account", name)
}

/// A single multisig member. Borsh size = 33.
#[derive(Debug, Clone, BorshSerialize)]
pub struct Member {
    pub key: [u8; 32],
    pub permissions: Permissions,
}

impl Member {
    pub fn new(key: &Pubkey, permissions: Permissions) -> Self {
        Self {
            key: key.to_bytes(),
            permissions,
        }
    }
}

/// Individual member capability bits
#[derive(Debug, Clone, Copy)]
pub enum Permission {
    Initiate = 1 << 0,
    Vote = 1 << 1,
    Execute = 1 << 2,
}

/// Member permission bitmask. Borsh size = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct Permissions {
    pub mask: u8,
}

impl Permissions {
    pub const fn new(permissions: &[Permission]) -> Self {
        let mut mask = 0;
        let mut idx = 0;
        while idx < permissions.len() {
            mask |= permissions[idx] as u8;
            idx += 1;
        }
        Self { mask }
    }

    /// All capabilities: initiate, vote, and execute
    pub const fn all() -> Self {
        Self::new(&[Permission::Initiate, Permission::Vote, Permission::Execute])
    }

    pub const fn has(&self, permission: Permission) -> bool {
        self.mask & (permission as u8) != 0
    }
}
