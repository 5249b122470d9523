//! Runtime error types.
//!
//! The runtime surface is deliberately small: schema problems (padding,
//! zero fields, unsupported shapes) are compile-time failures raised by the
//! `Record` derive, and allocation failure follows the global allocator's
//! abort convention. Bounds violations on the checked accessors are the one
//! recoverable condition.

use thiserror::Error;

/// A checked accessor was asked for an index at or beyond the container's
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of bounds for container of length {len}")]
pub struct OutOfBounds {
    /// The requested element index.
    pub index: usize,
    /// The container length at the time of the access.
    pub len: usize,
}
