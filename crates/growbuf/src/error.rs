// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for growbuf.

use thiserror::Error;

/// Error type for `GrowableBuffer` and `GrowableVec` operations.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum GrowableBufferError {
    /// The allocator could not satisfy a request, either at creation or
    /// while growing.
    ///
    /// `requested_bytes` is `None` when the byte size itself overflowed
    /// `usize` and no request could be formed.
    #[error("Allocation failure: could not allocate {requested_bytes:?} bytes")]
    AllocationFailure {
        /// Size in bytes of the rejected request.
        requested_bytes: Option<usize>,
    },

    /// Attempted to pop from a buffer that holds no elements.
    #[error("Buffer is empty: nothing to pop")]
    EmptyBuffer,

    /// Pushed element length does not match the buffer's element size.
    #[error("Element size mismatch: expected {expected} bytes, got {actual}")]
    ElementSizeMismatch {
        /// The buffer's element size.
        expected: usize,
        /// Length of the slice passed to `push()`.
        actual: usize,
    },
}
