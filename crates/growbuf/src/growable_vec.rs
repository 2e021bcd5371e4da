// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use core::num::NonZeroUsize;

use bytemuck::Pod;

use crate::error::GrowableBufferError;
use crate::growable_buffer::GrowableBuffer;

#[cfg(any(test, feature = "test_utils"))]
use crate::growable_buffer::GrowableBufferBehaviour;

/// Typed view over a [`GrowableBuffer`].
///
/// The element size is fixed at compile time to `size_of::<T>()`, so pushes
/// can never hand the buffer a slice of the wrong width. `T` must be
/// [`Pod`]: values are copied in and out as raw bytes. Zero-sized `T` is
/// rejected at compile time.
///
/// # Example
///
/// ```rust
/// use core::num::NonZeroUsize;
/// use growbuf::{GrowableBufferError, GrowableVec};
///
/// fn example() -> Result<(), GrowableBufferError> {
///     let mut vec = GrowableVec::<u32>::with_capacity(NonZeroUsize::MIN)?;
///
///     vec.push(10)?;
///     vec.push(20)?;
///     vec.push(30)?;
///
///     assert_eq!(vec.pop()?, 30);
///     assert_eq!(vec.pop()?, 20);
///     assert_eq!(vec.pop()?, 10);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
///
/// Zero-sized types do not compile:
///
/// ```compile_fail
/// use core::num::NonZeroUsize;
/// use growbuf::GrowableVec;
///
/// let _ = GrowableVec::<()>::with_capacity(NonZeroUsize::MIN);
/// ```
pub struct GrowableVec<T: Pod> {
    inner: GrowableBuffer,
    _marker: PhantomData<T>,
}

impl<T: Pod> core::fmt::Debug for GrowableVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GrowableVec")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<T: Pod> GrowableVec<T> {
    const ELEMENT_SIZE: NonZeroUsize = match NonZeroUsize::new(core::mem::size_of::<T>()) {
        Some(size) => size,
        None => panic!("GrowableVec does not support zero-sized types"),
    };

    /// Creates a vector with room for `initial_elements` values.
    ///
    /// # Errors
    ///
    /// Returns [`GrowableBufferError::AllocationFailure`] if the allocation
    /// cannot be satisfied.
    pub fn with_capacity(initial_elements: NonZeroUsize) -> Result<Self, GrowableBufferError> {
        Ok(Self {
            inner: GrowableBuffer::create(initial_elements, Self::ELEMENT_SIZE)?,
            _marker: PhantomData,
        })
    }

    /// Returns the number of values currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the vector holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of slots allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Appends `value` and returns the index it was stored at.
    ///
    /// # Errors
    ///
    /// Returns [`GrowableBufferError::AllocationFailure`] if growth was
    /// required and could not be satisfied. The vector is left untouched.
    pub fn push(&mut self, value: T) -> Result<usize, GrowableBufferError> {
        self.inner.push(bytemuck::bytes_of(&value))
    }

    /// Removes and returns the last value.
    ///
    /// # Errors
    ///
    /// Returns [`GrowableBufferError::EmptyBuffer`] if the vector is empty.
    pub fn pop(&mut self) -> Result<T, GrowableBufferError> {
        self.inner.pop_with(bytemuck::pod_read_unaligned::<T>)
    }

    /// Releases the vector and its storage.
    pub fn destroy(self) {
        self.inner.destroy();
    }

    /// Changes the test behaviour of the underlying buffer.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: GrowableBufferBehaviour) {
        self.inner.change_behaviour(behaviour);
    }
}
