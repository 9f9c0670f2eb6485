//! Command dispatch and reply formatting
//!
//! Bridges the Telegram long-poll loop to the multisig worker. `/start` and
//! `/hi` are answered inline; `/create_multisig` is acknowledged immediately
//! and the creation runs on its own task so the poll loop keeps serving
//! other chats.

use crate::error::Result;
use crate::runner::{WorkerOutcome, WorkerRunner};
use crate::telegram::{parse_update, BotCommand, TelegramBot};
use crate::worker::WorkerResult;
use std::sync::Arc;
use std::time::Duration;

/// Reply to `/start`
pub const WELCOME_TEXT: &str = "Welcome! Send /hi or /create_multisig";

/// Reply to `/hi`
pub const GREETING_TEXT: &str = "Hi!";

/// Acknowledgment sent before the worker starts
pub const ACK_TEXT: &str = "Creating Squads multisig on devnet...";

/// Reply when the worker's stdout is not a parseable result
pub const PARSE_FAILURE_TEXT: &str = "❌ Could not parse result";

/// Upper bound on relayed stderr content, in characters
const STDERR_LIMIT: usize = 1500;

/// Poll retry delay after a transport error
const POLL_RETRY: Duration = Duration::from_secs(5);

/// Telegram command dispatcher
pub struct Dispatcher {
    telegram: TelegramBot,
    runner: Arc<dyn WorkerRunner>,
}

impl Dispatcher {
    pub fn new(telegram: TelegramBot, runner: Arc<dyn WorkerRunner>) -> Self {
        Self { telegram, runner }
    }

    /// Run the long-poll loop until the surrounding task is cancelled.
    ///
    /// Only startup-time token verification can fail; poll transport errors
    /// are logged and retried.
    pub async fn run(&self) -> Result<()> {
        let username = self.telegram.get_me().await?;
        tracing::info!(bot = %username, "Telegram bot authenticated");

        let mut offset: i64 = 0;
        loop {
            let updates = match self.telegram.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!("Telegram poll error: {}, retrying in 5s", e);
                    tokio::time::sleep(POLL_RETRY).await;
                    continue;
                }
            };

            for update in &updates {
                if let Some(update_id) = update["update_id"].as_i64() {
                    offset = update_id + 1;
                }

                if let Some(parsed) = parse_update(update) {
                    self.handle_command(parsed.chat_id, parsed.command).await;
                }
            }
        }
    }

    async fn handle_command(&self, chat_id: i64, command: BotCommand) {
        if let Some(text) = static_reply(command) {
            self.reply(chat_id, text).await;
            return;
        }

        tracing::info!(chat_id, "multisig creation requested");
        self.reply(chat_id, ACK_TEXT).await;

        // Every creation gets its own task, keypairs, and transactions;
        // concurrent requests share nothing.
        let telegram = self.telegram.clone();
        let runner = Arc::clone(&self.runner);
        tokio::spawn(async move {
            let outcome = runner.create_multisig().await;
            let text = format_outcome(&outcome);
            if let Err(e) = telegram.send_message(chat_id, &text).await {
                tracing::error!(chat_id, "Failed to deliver worker result: {}", e);
            }
        });
    }

    async fn reply(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.telegram.send_message(chat_id, text).await {
            tracing::error!(chat_id, "Failed to send reply: {}", e);
        }
    }
}

/// The fixed reply for side-effect-free commands; `None` means the command
/// goes to the worker.
fn static_reply(command: BotCommand) -> Option<&'static str> {
    match command {
        BotCommand::Start => Some(WELCOME_TEXT),
        BotCommand::Hi => Some(GREETING_TEXT),
        BotCommand::CreateMultisig => None,
    }
}

/// Format a worker outcome into the chat reply
pub fn format_outcome(outcome: &WorkerOutcome) -> String {
    match outcome {
        WorkerOutcome::Result(WorkerResult::Success(created)) => format!(
            "✅ Multisig created!\n\n🔑 Multisig PDA: {}\n👤 Creator: {}\n👥 Member 2: {}\n📝 TX: {}",
            created.multisig_pda, created.creator, created.member2, created.tx
        ),
        WorkerOutcome::Result(WorkerResult::Failure(failure)) => {
            format!("❌ Failed: {}", failure.error)
        }
        WorkerOutcome::Stderr(stderr) => {
            format!("❌ Error: {}", truncate_chars(stderr, STDERR_LIMIT))
        }
        WorkerOutcome::Unparseable => PARSE_FAILURE_TEXT.to_string(),
    }
}

/// Truncate to at most `limit` characters, never splitting a code point
fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_replies() {
        assert_eq!(static_reply(BotCommand::Start), Some(WELCOME_TEXT));
        assert_eq!(static_reply(BotCommand::Hi), Some(GREETING_TEXT));
        assert_eq!(static_reply(BotCommand::CreateMultisig), None);
    }

    #[test]
    fn test_format_success_contains_all_values() {
        let outcome =
            WorkerOutcome::Result(WorkerResult::success("ADDR1", "SIG1", "ADDR2", "ADDR3"));
        let text = format_outcome(&outcome);

        assert!(text.starts_with("✅ Multisig created!"));
        assert!(text.contains("ADDR1"));
        assert!(text.contains("SIG1"));
        assert!(text.contains("ADDR2"));
        assert!(text.contains("ADDR3"));
    }

    #[test]
    fn test_format_worker_failure() {
        let outcome = WorkerOutcome::Result(WorkerResult::failure("Airdrop failed: dry faucet"));
        assert_eq!(
            format_outcome(&outcome),
            "❌ Failed: Airdrop failed: dry faucet"
        );
    }

    #[test]
    fn test_format_stderr_is_truncated() {
        let outcome = WorkerOutcome::Stderr("x".repeat(5000));
        let text = format_outcome(&outcome);

        assert!(text.starts_with("❌ Error: "));
        assert_eq!(text.chars().count(), "❌ Error: ".chars().count() + 1500);
    }

    #[test]
    fn test_format_short_stderr_untouched() {
        let outcome = WorkerOutcome::Stderr("panic at the rpc".to_string());
        assert_eq!(format_outcome(&outcome), "❌ Error: panic at the rpc");
    }

    #[test]
    fn test_format_unparseable() {
        assert_eq!(format_outcome(&WorkerOutcome::Unparseable), PARSE_FAILURE_TEXT);
    }

    #[test]
    fn test_subprocess_success_fixture_reaches_template() {
        let stdout =
            br#"{"ok":true,"multisigPda":"ADDR1","tx":"SIG1","creator":"ADDR2","member2":"ADDR3"}"#;
        let text = format_outcome(&crate::runner::interpret_output(stdout, b""));

        assert!(text.starts_with("✅ Multisig created!"));
        for value in ["ADDR1", "SIG1", "ADDR2", "ADDR3"] {
            assert!(text.contains(value), "missing {} in {}", value, text);
        }
    }

    #[test]
    fn test_subprocess_stderr_wins_over_valid_stdout() {
        let stdout =
            br#"{"ok":true,"multisigPda":"ADDR1","tx":"SIG1","creator":"ADDR2","member2":"ADDR3"}"#;
        let stderr = "e".repeat(5000);
        let text = format_outcome(&crate::runner::interpret_output(stdout, stderr.as_bytes()));

        assert!(text.starts_with("❌ Error: "));
        assert!(!text.contains("ADDR1"));
        assert_eq!(text.chars().count(), "❌ Error: ".chars().count() + 1500);
    }

    #[test]
    fn test_subprocess_garbage_stdout_reaches_parse_failure() {
        let text = format_outcome(&crate::runner::interpret_output(b"garbage", b""));
        assert_eq!(text, PARSE_FAILURE_TEXT);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "é".repeat(10);
        assert_eq!(truncate_chars(&s, 4).chars().count(), 4);
        assert_eq!(truncate_chars("short", 1500), "short");
    }
}
