//! PDA derivation helpers

use super::{seeds, SQUADS_PROGRAM_ID};
use solana_sdk::pubkey::Pubkey;

/// Derive the multisig account PDA for a given create key.
///
/// Pass `program_id` to target a non-canonical deployment (e.g. a staging
/// program); `None` uses the canonical Squads v4 program.
pub fn get_multisig_pda(create_key: &Pubkey, program_id: Option<&Pubkey>) -> (Pubkey, u8) {
    let program_id = program_id.unwrap_or(&SQUADS_PROGRAM_ID);
    Pubkey::find_program_address(
        &[seeds::SEED_PREFIX, seeds::SEED_MULTISIG, create_key.as_ref()],
        program_id,
    )
}

/// Derive the singleton program config PDA.
pub fn get_program_config_pda(program_id: Option<&Pubkey>) -> (Pubkey, u8) {
    let program_id = program_id.unwrap_or(&SQUADS_PROGRAM_ID);
    Pubkey::find_program_address(&[seeds::SEED_PREFIX, seeds::SEED_PROGRAM_CONFIG], program_id)
}
