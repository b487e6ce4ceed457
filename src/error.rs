//! Error types for the boundary-facing, non-hot-path operations (§1.1).
//!
//! Everything on the hot path (NTT, reduction, basemul) is total over its
//! documented preconditions and never returns `Result` — this type exists
//! for the handful of operations whose input comes from outside the crate's
//! control, such as decoding an externally supplied byte buffer of the
//! wrong length.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("expected a {expected}-byte buffer, got {actual}")]
    WrongBufferLength { expected: usize, actual: usize },

    #[error("unsupported eta value {0}, ML-KEM only defines eta in {{2, 3}}")]
    UnsupportedEta(usize),

    #[error("unsupported compression width {0}, ML-KEM only defines d in {{1, 4, 5, 10, 11}}")]
    UnsupportedCompressionWidth(usize),
}
