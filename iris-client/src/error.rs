//! Error types for the service clients
//!
//! Provider faults are classified here, once, into a small closed set of
//! kinds. Callers branch on [`ErrorKind`] and never inspect provider messages.

use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Remote operation that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    DescribeStacks,
    CreateStack,
    UpdateStack,
    StartExecution,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Operation::DescribeStacks => "DescribeStacks",
            Operation::CreateStack => "CreateStack",
            Operation::UpdateStack => "UpdateStack",
            Operation::StartExecution => "StartExecution",
        };
        f.write_str(s)
    }
}

/// Closed classification of client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The named stack does not exist (yet)
    NotFound,
    /// An update was rejected because the stack already matches the request
    NoUpdates,
    /// Anything else: permissions, throttling, network, invalid templates
    Other,
}

/// Errors that can occur when calling the infrastructure or workflow service
#[derive(Debug, Error)]
pub enum ClientError {
    /// Stack does not exist
    #[error("Stack not found: {0}")]
    StackNotFound(String),

    /// Update had nothing to change
    #[error("No updates are to be performed on stack {0}")]
    NoUpdates(String),

    /// Provider rejected the call
    #[error("{operation} failed for {subject}: {message}")]
    Service {
        operation: Operation,
        /// Resource the call targeted (stack name or workflow id)
        subject: String,
        /// Provider error code, if the fault came from the service
        code: Option<String>,
        message: String,
    },

    /// Provider response lacked a field the client relies on
    #[error("Malformed {operation} response for {subject}: {message}")]
    MalformedResponse {
        operation: Operation,
        subject: String,
        message: String,
    },
}

impl ClientError {
    /// Returns the classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::StackNotFound(_) => ErrorKind::NotFound,
            ClientError::NoUpdates(_) => ErrorKind::NoUpdates,
            ClientError::Service { .. } | ClientError::MalformedResponse { .. } => {
                ErrorKind::Other
            }
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this error is a "no updates" rejection
    pub fn is_no_updates(&self) -> bool {
        self.kind() == ErrorKind::NoUpdates
    }

    /// Classifies an SDK error raised by `operation` against `subject`
    pub fn from_sdk<E, R>(operation: Operation, subject: &str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        match err.code() {
            Some(code) => {
                let message = err.message().unwrap_or_default().to_string();
                classify(operation, subject, Some(code), &message)
            }
            // Dispatch, timeout and response-parsing failures carry no code
            None => ClientError::Service {
                operation,
                subject: subject.to_string(),
                code: None,
                message: DisplayErrorContext(&err).to_string(),
            },
        }
    }
}

const VALIDATION_ERROR_CODE: &str = "ValidationError";

/// Maps a provider error code and message onto a [`ClientError`]
///
/// CloudFormation reports both a missing stack and an empty update as a
/// `ValidationError`; the message is the only discriminator. Each is only
/// recognised for the operation that can legitimately produce it.
pub(crate) fn classify(
    operation: Operation,
    subject: &str,
    code: Option<&str>,
    message: &str,
) -> ClientError {
    let is_validation = code == Some(VALIDATION_ERROR_CODE);

    match operation {
        Operation::DescribeStacks if is_validation && message.contains("does not exist") => {
            ClientError::StackNotFound(subject.to_string())
        }
        Operation::UpdateStack
            if is_validation && message.contains("No updates are to be performed") =>
        {
            ClientError::NoUpdates(subject.to_string())
        }
        _ => ClientError::Service {
            operation,
            subject: subject.to_string(),
            code: code.map(str::to_string),
            message: message.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_missing_stack_is_not_found() {
        let err = classify(
            Operation::DescribeStacks,
            "iris-mlops-infra",
            Some("ValidationError"),
            "Stack with id iris-mlops-infra does not exist",
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Stack not found: iris-mlops-infra");
    }

    #[test]
    fn test_update_without_changes_is_no_updates() {
        let err = classify(
            Operation::UpdateStack,
            "iris-mlops-infra",
            Some("ValidationError"),
            "No updates are to be performed.",
        );
        assert!(err.is_no_updates());
    }

    #[test]
    fn test_not_found_phrase_outside_describe_is_other() {
        // A create rejected for a missing role must not be mistaken for a missing stack
        let err = classify(
            Operation::CreateStack,
            "iris-mlops-infra",
            Some("ValidationError"),
            "Role arn:aws:iam::1:role/x does not exist",
        );
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_not_found_phrase_requires_validation_code() {
        let err = classify(
            Operation::DescribeStacks,
            "iris-mlops-infra",
            Some("AccessDenied"),
            "User is not authorized; policy does not exist",
        );
        assert_eq!(err.kind(), ErrorKind::Other);
        match err {
            ClientError::Service { code, .. } => assert_eq!(code.as_deref(), Some("AccessDenied")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_validation_errors_are_other() {
        let err = classify(
            Operation::UpdateStack,
            "iris-mlops-pipeline",
            Some("ValidationError"),
            "Template format error: unsupported structure",
        );
        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(err.to_string().contains("UpdateStack failed for iris-mlops-pipeline"));
    }
}
