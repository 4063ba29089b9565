//! Error types for the object model and reference resolution
//!
//! Most operations return `anyhow::Result` and attach context as they bubble up.
//! Malformed input is reported through [`ParseError`], which is raised into
//! `anyhow::Error` so callers can tell it apart from I/O failures with
//! `downcast_ref::<ParseError>()`. Parse errors are fatal: no partially parsed
//! object is ever returned alongside one.

use thiserror::Error;

/// Fatal errors raised while decoding hex, objects, or references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input is of odd length {length}")]
    OddLength { length: usize },

    #[error("invalid hexadecimal byte at position {position}")]
    InvalidHexByte { position: usize },

    #[error("invalid object id length: expected 20 bytes, got {length}")]
    InvalidObjectIdLength { length: usize },

    #[error("object header is missing its NUL terminator")]
    MissingNul,

    #[error("malformed object header: {header:?}")]
    MalformedHeader { header: String },

    #[error("expected a {expected} object, found {found:?}")]
    UnexpectedObjectType { expected: String, found: String },

    #[error("object header declares {declared} bytes but the body has {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("unrecognized tree entry mode {0:?}")]
    UnknownMode(String),

    #[error("truncated tree entry: {0}")]
    TruncatedEntry(&'static str),

    #[error("tree entry {0:?} is duplicated or out of order")]
    UnsortedEntry(String),

    #[error("malformed commit: {0}")]
    MalformedCommit(String),

    #[error("malformed timestamp {0:?}")]
    MalformedTimestamp(String),

    #[error("malformed identity {0:?}")]
    MalformedIdentity(String),

    #[error("malformed reference {name}: {reason}")]
    MalformedReference { name: String, reason: String },

    #[error("too many redirects while resolving reference {0}")]
    TooManyRedirects(String),
}

/// An internal algorithm invariant did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("no pending tree node was recorded for {0}")]
    MissingPendingNode(String),

    #[error("snapshot finished without producing a root tree")]
    MissingRootTree,
}
