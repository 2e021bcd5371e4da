// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Type-erased growable buffer of fixed-size elements.
//!
//! `GrowableBuffer` stores opaque elements of `element_size` bytes in one
//! contiguous allocation, doubling its capacity whenever a push finds it full.
//! `GrowableVec<T>` is a typed facade over it for plain-old-data `T`.
//!
//! # Core Guarantees
//!
//! - **Fallible allocation**: creation and growth use fallible reservations and
//!   report [`GrowableBufferError::AllocationFailure`] instead of aborting.
//! - **All-or-nothing growth**: a push whose growth fails leaves length,
//!   capacity and contents exactly as they were.
//! - **Checked pop**: popping an empty buffer returns
//!   [`GrowableBufferError::EmptyBuffer`].
//! - **No aliasing**: `pop()` returns an owned copy; `pop_with()` lends the
//!   element bytes only for the duration of a closure.
//!
//! The buffer performs no internal locking. Callers sharing one between
//! threads must serialize access.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use growbuf::{GrowableBuffer, GrowableBufferError};
//!
//! fn example() -> Result<(), GrowableBufferError> {
//!     let element_size = NonZeroUsize::new(4).expect("non-zero");
//!     let mut buffer = GrowableBuffer::create(NonZeroUsize::MIN, element_size)?;
//!
//!     for (i, value) in [10u32, 20, 30].iter().enumerate() {
//!         assert_eq!(buffer.push(&value.to_ne_bytes())?, i);
//!     }
//!     assert_eq!(buffer.capacity(), 4);
//!
//!     assert_eq!(buffer.pop()?, 30u32.to_ne_bytes());
//!     assert_eq!(buffer.pop()?, 20u32.to_ne_bytes());
//!     assert_eq!(buffer.pop()?, 10u32.to_ne_bytes());
//!
//!     // Empty pop is an error, not an out-of-bounds read
//!     assert_eq!(buffer.pop(), Err(GrowableBufferError::EmptyBuffer));
//!
//!     buffer.destroy();
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Typed Facade
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use growbuf::{GrowableBufferError, GrowableVec};
//!
//! fn example() -> Result<(), GrowableBufferError> {
//!     let mut vec = GrowableVec::<u64>::with_capacity(NonZeroUsize::MIN)?;
//!     vec.push(u64::MAX)?;
//!     assert_eq!(vec.pop()?, u64::MAX);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to inject allocation failures:
//!
//! ```toml
//! [dev-dependencies]
//! growbuf = { version = "*", features = ["test_utils"] }
//! ```
//!
//! Then use `GrowableBufferBehaviour` to make growth fail until it is reset.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod error;
mod growable_buffer;
mod growable_vec;

#[cfg(test)]
mod tests;

pub use error::GrowableBufferError;
pub use growable_buffer::GrowableBuffer;
pub use growable_vec::GrowableVec;

#[cfg(any(test, feature = "test_utils"))]
pub use growable_buffer::GrowableBufferBehaviour;
