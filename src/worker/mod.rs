//! Multisig creation worker
//!
//! Runs the fixed five-step creation sequence against the configured RPC
//! endpoint: fund a fresh creator via the devnet faucet, derive the multisig
//! PDA from a fresh create key, generate the second member, fetch the Squads
//! program config for the treasury, then submit `multisig_create_v2` and wait
//! for `confirmed` commitment.
//!
//! All three keypairs are generated per invocation and dropped with the
//! process; the created multisig's signing keys are intentionally not
//! persisted anywhere. Keep that in mind before pointing this at anything
//! other than devnet.

mod result;

pub use result::{MultisigCreated, WorkerFailure, WorkerResult};

use crate::config::WorkerConfig;
use crate::error::Result;
use crate::squads::{
    self, Member, MultisigCreateAccounts, MultisigCreateArgsV2, Permission, Permissions,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

/// Fixed 2-of-2 approval threshold
const THRESHOLD: u16 = 2;

/// Run the five-step creation sequence.
///
/// Remote failures never propagate: every step's error is converted into a
/// [`WorkerResult::Failure`] carrying the error's display string, so the
/// caller always gets exactly one result.
pub async fn create_multisig(config: &WorkerConfig) -> WorkerResult {
    let rpc =
        RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    // Creator / fee payer
    let creator = Keypair::new();
    if let Err(e) = fund_creator(&rpc, &creator.pubkey(), config.airdrop_lamports).await {
        return WorkerResult::failure(format!("Airdrop failed: {}", e));
    }

    // The create key seeds the PDA derivation and must co-sign the creation
    let create_key = Keypair::new();
    let (multisig_pda, _) = squads::get_multisig_pda(&create_key.pubkey(), None);

    // Second member, vote-only, never funded
    let second_member = Keypair::new();

    match submit_creation(&rpc, &creator, &create_key, &multisig_pda, &second_member.pubkey())
        .await
    {
        Ok(signature) => {
            tracing::info!(multisig = %multisig_pda, tx = %signature, "multisig created");
            WorkerResult::success(
                multisig_pda.to_string(),
                signature.to_string(),
                creator.pubkey().to_string(),
                second_member.pubkey().to_string(),
            )
        }
        Err(e) => WorkerResult::failure(e.to_string()),
    }
}

/// Run the worker and print its single-line JSON result to stdout.
///
/// This is the subprocess/standalone entry point: stdout carries exactly the
/// result document, all logging goes to stderr.
pub async fn run(config: &WorkerConfig) -> Result<()> {
    let result = create_multisig(config).await;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

async fn fund_creator(rpc: &RpcClient, creator: &Pubkey, lamports: u64) -> Result<()> {
    tracing::debug!(%creator, lamports, "requesting airdrop");
    let signature = rpc.request_airdrop(creator, lamports).await?;
    rpc.poll_for_signature_with_commitment(&signature, CommitmentConfig::confirmed())
        .await?;
    Ok(())
}

async fn submit_creation(
    rpc: &RpcClient,
    creator: &Keypair,
    create_key: &Keypair,
    multisig_pda: &Pubkey,
    second_member: &Pubkey,
) -> Result<Signature> {
    // The creation fee treasury lives in the singleton program config
    let (program_config_pda, _) = squads::get_program_config_pda(None);
    let data = rpc.get_account_data(&program_config_pda).await?;
    let program_config = squads::ProgramConfig::from_account_data(&data)?;

    let accounts = MultisigCreateAccounts {
        program_config: program_config_pda,
        treasury: program_config.treasury,
        multisig: *multisig_pda,
        create_key: create_key.pubkey(),
        creator: creator.pubkey(),
    };
    let args = MultisigCreateArgsV2 {
        config_authority: None,
        threshold: THRESHOLD,
        members: vec![
            Member::new(&creator.pubkey(), Permissions::all()),
            Member::new(second_member, Permissions::new(&[Permission::Vote])),
        ],
        time_lock: 0,
        rent_collector: None,
        memo: None,
    };
    let instruction = squads::multisig_create_v2(&accounts, &args)?;

    let blockhash = rpc.get_latest_blockhash().await?;
    let transaction = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&creator.pubkey()),
        &[creator, create_key],
        blockhash,
    );

    let signature = rpc
        .send_transaction_with_config(
            &transaction,
            RpcSendTransactionConfig {
                skip_preflight: true,
                ..Default::default()
            },
        )
        .await?;
    rpc.poll_for_signature_with_commitment(&signature, CommitmentConfig::confirmed())
        .await?;

    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 1 is never bound, so the airdrop request fails at the first
    // remote call and the sequence short-circuits.
    fn unreachable_config() -> WorkerConfig {
        WorkerConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            airdrop_lamports: 1,
        }
    }

    #[tokio::test]
    async fn test_airdrop_failure_is_marked() {
        let result = create_multisig(&unreachable_config()).await;

        assert!(!result.is_ok());
        match result {
            WorkerResult::Failure(failure) => {
                assert!(failure.error.starts_with("Airdrop failed:"), "{}", failure.error);
            }
            WorkerResult::Success(_) => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_failure_result_serializes_to_single_line() {
        let result = create_multisig(&unreachable_config()).await;
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"ok":false"#));
    }
}
