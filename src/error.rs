use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Any failure that cannot be confidently attributed to any other error
    /// category in this enum.
    ///
    /// Use of Internal is never a guarantee that the error was not, for
    /// example, caused by the user - merely that the code cannot tell.
    Internal,

    /// The user provided invalid input or performed an action that is
    /// unsupported or impossible to complete.
    User,
}

/// Fine-grained condition flags for consumers that want to branch on error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Empty phrase, empty password, password below the minimum length, or a
    /// phrase of non-standard shape that the caller did not confirm.
    InvalidInput,
    /// Decryption did not produce a phrase. Deliberately carries no detail:
    /// a wrong password, a corrupted envelope and a malformed envelope are
    /// indistinguishable.
    DecryptionFailed,
    /// Password could not be obtained from the configured reader.
    PassphraseUnavailable,
    /// The operating system random source failed to produce salt bytes.
    RandomSource,
    /// Interaction with the filesystem, stdin/stdout, or other I/O failed.
    Io,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct SeedboxError {
    /// Broad error category, always provided.
    pub category: ErrorCategory,
    /// Optional specific condition tag for consumers that need to
    /// branch their behavior. Any code consuming errors MUST handle
    /// the absence of a defined kind.
    pub kind: Option<ErrorKind>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl SeedboxError {
    /// Creates a new error that also tags the failure with a kind.
    pub fn with_kind(category: ErrorCategory, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that carries both a kind tag and the originating source error.
    pub fn with_kind_and_source(
        category: ErrorCategory,
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Shorthand for the caller-misuse errors raised at the encrypt boundary.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorCategory::User, ErrorKind::InvalidInput, msg)
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Wraps the current error with a higher-level message while preserving the original as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let category = self.category;
        let kind = self.kind;
        Self {
            category,
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// The single outcome of every failed decryption step.
///
/// Bad base64, a missing marker, a malformed salt, bad padding and invalid
/// UTF-8 all collapse into this value so that nothing about the cause
/// reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("decryption failed, check password and input")]
pub struct DecryptionFailed;

impl From<DecryptionFailed> for SeedboxError {
    fn from(err: DecryptionFailed) -> Self {
        SeedboxError::with_kind(
            ErrorCategory::User,
            ErrorKind::DecryptionFailed,
            err.to_string(),
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SeedboxError>;
