//! Stack domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stack outputs keyed by output name
pub type OutputMap = BTreeMap<String, String>;

/// Coarse stack status derived from the provider's raw status string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackStatus {
    /// Any in-progress or otherwise non-terminal status
    Pending,
    /// `CREATE_COMPLETE` or `UPDATE_COMPLETE`
    Complete,
    /// `*_FAILED` or `*ROLLBACK_COMPLETE`
    Failed,
    /// `DELETE_COMPLETE`
    Deleted,
}

impl StackStatus {
    /// Classifies a raw provider status string
    pub fn classify(raw: &str) -> Self {
        match raw {
            "CREATE_COMPLETE" | "UPDATE_COMPLETE" => StackStatus::Complete,
            "DELETE_COMPLETE" => StackStatus::Deleted,
            s if s.ends_with("_FAILED") || s.ends_with("ROLLBACK_COMPLETE") => StackStatus::Failed,
            _ => StackStatus::Pending,
        }
    }

    /// Returns true if polling should stop on this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StackStatus::Pending)
    }

    /// Returns true for terminal statuses that are not a success
    pub fn is_failure(&self) -> bool {
        matches!(self, StackStatus::Failed | StackStatus::Deleted)
    }
}

/// Live state of a named stack as observed through a describe call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDescriptor {
    pub stack_name: String,
    pub stack_id: Option<String>,
    /// Status string exactly as reported by the provider
    pub raw_status: String,
    pub status: StackStatus,
    pub status_reason: Option<String>,
    pub outputs: OutputMap,
}

impl StackDescriptor {
    /// Creates a descriptor, deriving the coarse status from `raw_status`
    pub fn new(stack_name: impl Into<String>, raw_status: impl Into<String>) -> Self {
        let raw_status = raw_status.into();
        Self {
            stack_name: stack_name.into(),
            stack_id: None,
            status: StackStatus::classify(&raw_status),
            raw_status,
            status_reason: None,
            outputs: OutputMap::new(),
        }
    }

    pub fn with_stack_id(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = Some(stack_id.into());
        self
    }

    pub fn with_status_reason(mut self, reason: impl Into<String>) -> Self {
        self.status_reason = Some(reason.into());
        self
    }

    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success_statuses() {
        assert_eq!(StackStatus::classify("CREATE_COMPLETE"), StackStatus::Complete);
        assert_eq!(StackStatus::classify("UPDATE_COMPLETE"), StackStatus::Complete);
    }

    #[test]
    fn test_classify_failure_statuses() {
        for raw in [
            "CREATE_FAILED",
            "ROLLBACK_FAILED",
            "UPDATE_ROLLBACK_FAILED",
            "DELETE_FAILED",
            "UPDATE_ROLLBACK_COMPLETE",
            "IMPORT_ROLLBACK_COMPLETE",
            "ROLLBACK_COMPLETE",
        ] {
            assert_eq!(StackStatus::classify(raw), StackStatus::Failed, "{raw}");
        }
        assert_eq!(StackStatus::classify("DELETE_COMPLETE"), StackStatus::Deleted);
    }

    #[test]
    fn test_classify_in_progress_statuses() {
        for raw in [
            "CREATE_IN_PROGRESS",
            "UPDATE_IN_PROGRESS",
            "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS",
            "ROLLBACK_IN_PROGRESS",
            "REVIEW_IN_PROGRESS",
        ] {
            let status = StackStatus::classify(raw);
            assert_eq!(status, StackStatus::Pending, "{raw}");
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn test_descriptor_builder() {
        let desc = StackDescriptor::new("infra", "UPDATE_COMPLETE")
            .with_stack_id("arn:stack/infra/1")
            .with_output("B", "2")
            .with_output("A", "1");

        assert_eq!(desc.status, StackStatus::Complete);
        assert_eq!(desc.stack_id.as_deref(), Some("arn:stack/infra/1"));
        let keys: Vec<_> = desc.outputs.keys().cloned().collect();
        assert_eq!(keys, vec!["A".to_string(), "B".to_string()]);
    }
}
