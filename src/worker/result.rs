//! Worker result wire shape
//!
//! The JSON field names (`multisigPda`, `tx`, `creator`, `member2`) are the
//! subprocess contract between the dispatcher and the worker; changing them
//! breaks every consumer parsing the worker's stdout.

use serde::{Deserialize, Serialize};

/// Outcome of one multisig creation attempt.
///
/// Exactly one variant is ever populated: a successful run carries the four
/// addresses/signatures and no error, a failed run carries only the error
/// string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkerResult {
    Success(MultisigCreated),
    Failure(WorkerFailure),
}

/// Success payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigCreated {
    pub ok: bool,
    pub multisig_pda: String,
    pub tx: String,
    pub creator: String,
    pub member2: String,
}

/// Failure payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerFailure {
    pub ok: bool,
    pub error: String,
}

impl WorkerResult {
    pub fn success(
        multisig_pda: impl Into<String>,
        tx: impl Into<String>,
        creator: impl Into<String>,
        member2: impl Into<String>,
    ) -> Self {
        Self::Success(MultisigCreated {
            ok: true,
            multisig_pda: multisig_pda.into(),
            tx: tx.into(),
            creator: creator.into(),
            member2: member2.into(),
        })
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(WorkerFailure {
            ok: false,
            error: error.into(),
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_wire_shape() {
        let result = WorkerResult::success("ADDR1", "SIG1", "ADDR2", "ADDR3");
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&result).unwrap()).unwrap();

        assert_eq!(json["ok"], true);
        assert_eq!(json["multisigPda"], "ADDR1");
        assert_eq!(json["tx"], "SIG1");
        assert_eq!(json["creator"], "ADDR2");
        assert_eq!(json["member2"], "ADDR3");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_wire_shape() {
        let result = WorkerResult::failure("boom");
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&result).unwrap()).unwrap();

        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("multisigPda").is_none());
        assert!(json.get("tx").is_none());
    }

    #[test]
    fn test_parse_success_fixture() {
        let fixture = r#"{"ok":true,"multisigPda":"ADDR1","tx":"SIG1","creator":"ADDR2","member2":"ADDR3"}"#;
        let result: WorkerResult = serde_json::from_str(fixture).unwrap();

        assert!(result.is_ok());
        match result {
            WorkerResult::Success(created) => {
                assert_eq!(created.multisig_pda, "ADDR1");
                assert_eq!(created.tx, "SIG1");
                assert_eq!(created.creator, "ADDR2");
                assert_eq!(created.member2, "ADDR3");
            }
            WorkerResult::Failure(_) => unreachable!(),
        }
    }

    #[test]
    fn test_parse_failure_fixture() {
        let result: WorkerResult =
            serde_json::from_str(r#"{"ok":false,"error":"Airdrop failed: timeout"}"#).unwrap();

        assert!(!result.is_ok());
        match result {
            WorkerResult::Failure(failure) => {
                assert_eq!(failure.error, "Airdrop failed: timeout");
            }
            WorkerResult::Success(_) => unreachable!(),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_result() {
        assert!(serde_json::from_str::<WorkerResult>("not json").is_err());
        assert!(serde_json::from_str::<WorkerResult>(r#"{"ok":true}"#).is_err());
        assert!(serde_json::from_str::<WorkerResult>("{}").is_err());
    }
}
