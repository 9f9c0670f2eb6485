//! Squadbot - Telegram bot that creates Squads v4 multisigs on Solana devnet
//!
//! ## Overview
//!
//! Two components connected by an explicit async seam:
//!
//! - The **dispatcher** long-polls the Telegram Bot API, answers `/start`
//!   and `/hi` inline, and turns each `/create_multisig` into a worker
//!   invocation with an immediate acknowledgment.
//! - The **worker** runs a fixed five-step sequence against the configured
//!   RPC endpoint: airdrop to a fresh creator, derive the multisig PDA,
//!   generate the second member, fetch the Squads program config, submit
//!   `multisig_create_v2`. It reports exactly one [`worker::WorkerResult`].
//!
//! The seam is [`runner::WorkerRunner`]: in-process by default, or one
//! subprocess per creation (`bot --isolate-worker`) with the worker's
//! single-line JSON on stdout as the wire format.
//!
//! Every invocation generates fresh, never-persisted keypairs; the created
//! multisig's signing keys die with the worker. Devnet only.
//!
//! ## Modules
//!
//! - [`telegram`]: Telegram Bot API client (long polling, sendMessage)
//! - [`dispatcher`]: command routing and reply formatting
//! - [`runner`]: worker invocation seam (in-process / subprocess)
//! - [`worker`]: the five-step multisig creation workflow
//! - [`squads`]: minimal Squads v4 client layer (PDAs, instruction, state)
//! - [`config`]: environment-based configuration
//! - [`error`]: error taxonomy

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod runner;
pub mod squads;
pub mod telegram;
pub mod worker;

pub use config::{BotConfig, WorkerConfig};
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use runner::{InProcessRunner, SubprocessRunner, WorkerOutcome, WorkerRunner};
pub use telegram::{BotCommand, TelegramBot};
pub use worker::WorkerResult;
