//! `ProgramConfig` account parsing
//!
//! The worker only needs the treasury address out of the singleton program
//! config, so only the fields up to and including `treasury` are decoded;
//! whatever the program appends after them is ignored.

use super::account_discriminator;
use crate::error::{Error, Result};
use borsh::BorshDeserialize;
use solana_sdk::pubkey::Pubkey;

/// The Squads v4 global program configuration account
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Authority allowed to update the config
    pub authority: Pubkey,
    /// Fee charged per multisig creation, in lamports
    pub multisig_creation_fee: u64,
    /// Account the creation fee is paid to
    pub treasury: Pubkey,
}

#[derive(BorshDeserialize)]
struct ProgramConfigLayout {
    authority: [u8; 32],
    multisig_creation_fee: u64,
    treasury: [u8; 32],
}

impl ProgramConfig {
    /// Parse a `ProgramConfig` from raw account data.
    pub fn from_account_data(data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return Err(Error::Worker(
                "Program config account data too short".to_string(),
            ));
        }

        let expected = account_discriminator("ProgramConfig");
        if data[..8] != expected {
            return Err(Error::Worker(
                "Account is not a Squads program config".to_string(),
            ));
        }

        let mut body = &data[8..];
        let layout = ProgramConfigLayout::deserialize(&mut body)
            .map_err(|e| Error::Worker(format!("Malformed program config account: {}", e)))?;

        Ok(Self {
            authority: Pubkey::new_from_array(layout.authority),
            multisig_creation_fee: layout.multisig_creation_fee,
            treasury: Pubkey::new_from_array(layout.treasury),
        })
    }
}
