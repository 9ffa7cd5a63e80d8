//! Error taxonomy for the resolution pipeline.
//!
//! Two layers, matching where the failure is detected:
//!
//! - [`ParseError`]: the input URL never matched a known marketplace shape.
//!   Raised before any network access; the caller can simply re-prompt.
//! - [`ResolutionError`]: a pipeline stage failed. Aborts the current
//!   resolution only; a subsequent attempt starts from scratch.
//!
//! Errors carry the offending input so the presentation layer can show a
//! specific message instead of a generic failure. Nothing is retried.

use thiserror::Error;

/// Input-parsing failures, detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The URL does not match any known marketplace link shape.
    #[error("unrecognized marketplace link: {0}")]
    UnrecognizedFormat(String),

    /// The URL matched a marketplace shape but the trailing segment is not
    /// a numeric token id.
    #[error("marketplace link has no numeric token id: {0}")]
    MissingTokenId(String),
}

/// Pipeline failures. Each aborts the current resolution and is surfaced
/// verbatim to the caller.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Neither the ERC-721 nor the ERC-1155 query path produced a token URI.
    #[error("contract {0} answers neither the ERC-721 nor the ERC-1155 interface")]
    UnsupportedContract(String),

    /// The token's metadata could not be fetched or parsed.
    #[error("metadata at {uri} unavailable: {reason}")]
    MetadataUnavailable { uri: String, reason: String },

    /// An RPC round trip failed at the transport level.
    #[error("network failure during {context}: {reason}")]
    NetworkFailure { context: String, reason: String },
}
