use thiserror::Error;

/// Errors surfaced by the KZG library.
///
/// Every fallible operation returns a discriminated result; a failed call
/// never leaks partially initialized state. Verification functions layer a
/// boolean verdict on top: `Err(BadArgs)` means the inputs could not be
/// decoded, `Ok(false)` means the proof is cryptographically invalid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KzgError {
    /// Malformed caller input: wrong length, non-canonical scalar, point not
    /// on the curve or not in the prime-order subgroup, non-power-of-two FFT
    /// size, setup counts that do not match the compiled preset.
    #[error("bad arguments: {0}")]
    BadArgs(String),

    /// Trusted setup file could not be read.
    #[error("i/o error: {0}")]
    Io(String),

    /// Invariant violation. Indicates a bug or corrupt compiled tables, not
    /// bad input.
    #[error("internal error: {0}")]
    Internal(String),
}
