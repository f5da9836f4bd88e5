use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are split so callers can distinguish a token that
/// never was valid from one that simply aged out, even though both end up as
/// an unauthenticated response at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}
