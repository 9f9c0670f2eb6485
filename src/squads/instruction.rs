//! `multisig_create_v2` instruction building

use super::{instruction_discriminator, Member, SQUADS_PROGRAM_ID};
use borsh::BorshSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

/// Accounts for `multisig_create_v2`
#[derive(Debug, Clone)]
pub struct MultisigCreateAccounts {
    /// Program config PDA (holds the creation fee treasury)
    pub program_config: Pubkey,
    /// Treasury receiving the creation fee
    pub treasury: Pubkey,
    /// The multisig PDA being created
    pub multisig: Pubkey,
    /// Ephemeral key the multisig PDA is derived from; must sign
    pub create_key: Pubkey,
    /// Fee payer and rent funder; must sign
    pub creator: Pubkey,
}

/// Arguments for `multisig_create_v2`
#[derive(Debug, Clone, BorshSerialize)]
pub struct MultisigCreateArgsV2 {
    pub config_authority: Option<[u8; 32]>,
    pub threshold: u16,
    pub members: Vec<Member>,
    pub time_lock: u32,
    pub rent_collector: Option<[u8; 32]>,
    pub memo: Option<String>,
}

/// Build the `multisig_create_v2` instruction.
pub fn multisig_create_v2(
    accounts: &MultisigCreateAccounts,
    args: &MultisigCreateArgsV2,
) -> crate::error::Result<Instruction> {
    let mut data = instruction_discriminator("multisig_create_v2").to_vec();
    args.serialize(&mut data)
        .map_err(|e| crate::error::Error::Worker(format!("Failed to encode args: {}", e)))?;

    Ok(Instruction {
        program_id: SQUADS_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(accounts.program_config, false),
            AccountMeta::new(accounts.treasury, false),
            AccountMeta::new(accounts.multisig, false),
            AccountMeta::new_readonly(accounts.create_key, true),
            AccountMeta::new(accounts.creator, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::squads::{Permission, Permissions};

    fn test_accounts() -> MultisigCreateAccounts {
        MultisigCreateAccounts {
            program_config: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            multisig: Pubkey::new_unique(),
            create_key: Pubkey::new_unique(),
            creator: Pubkey::new_unique(),
        }
    }

    fn test_args() -> MultisigCreateArgsV2 {
        MultisigCreateArgsV2 {
            config_authority: None,
            threshold: 2,
            members: vec![
                Member::new(&Pubkey::new_unique(), Permissions::all()),
                Member::new(&Pubkey::new_unique(), Permissions::new(&[Permission::Vote])),
            ],
            time_lock: 0,
            rent_collector: None,
            memo: None,
        }
    }

    #[test]
    fn test_instruction_targets_squads_program() {
        let ix = multisig_create_v2(&test_accounts(), &test_args()).unwrap();
        assert_eq!(ix.program_id, SQUADS_PROGRAM_ID);
    }

    #[test]
    fn test_instruction_account_metas() {
        let accounts = test_accounts();
        let ix = multisig_create_v2(&accounts, &test_args()).unwrap();

        assert_eq!(ix.accounts.len(), 6);

        // program_config: readonly, not a signer
        assert_eq!(ix.accounts[0].pubkey, accounts.program_config);
        assert!(!ix.accounts[0].is_writable);
        assert!(!ix.accounts[0].is_signer);

        // treasury and multisig are written
        assert!(ix.accounts[1].is_writable);
        assert!(ix.accounts[2].is_writable);

        // create_key signs but is not written
        assert_eq!(ix.accounts[3].pubkey, accounts.create_key);
        assert!(ix.accounts[3].is_signer);
        assert!(!ix.accounts[3].is_writable);

        // creator pays, so signs and is written
        assert_eq!(ix.accounts[4].pubkey, accounts.creator);
        assert!(ix.accounts[4].is_signer);
        assert!(ix.accounts[4].is_writable);

        assert_eq!(ix.accounts[5].pubkey, system_program::id());
    }

    #[test]
    fn test_instruction_data_layout() {
        let args = test_args();
        let ix = multisig_create_v2(&test_accounts(), &args).unwrap();

        assert_eq!(&ix.data[..8], &instruction_discriminator("multisig_create_v2"));

        // config_authority: None (1) + threshold: u16 (2) + members vec:
        // u32 len (4) + 2 * 33 + time_lock: u32 (4) + rent_collector: None (1)
        // + memo: None (1)
        assert_eq!(ix.data.len(), 8 + 1 + 2 + 4 + 66 + 4 + 1 + 1);

        // threshold is little-endian right after the None byte
        assert_eq!(ix.data[8], 0);
        assert_eq!(&ix.data[9..11], &2u16.to_le_bytes());
    }
}
