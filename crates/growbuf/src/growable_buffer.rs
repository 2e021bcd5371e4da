// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;
use core::num::NonZeroUsize;

use crate::error::GrowableBufferError;

/// Test behaviour for injecting failures in `GrowableBuffer` operations.
///
/// This is only available with the `test_utils` feature and allows users
/// to test error handling paths in their code by simulating allocator
/// exhaustion.
///
/// The behaviour is sticky - once set, it remains active until changed.
///
/// # Example
///
/// ```rust
/// // test_utils feature required in dev-dependencies
/// #[cfg(test)]
/// mod tests {
///     use core::num::NonZeroUsize;
///     use growbuf::{GrowableBuffer, GrowableBufferBehaviour, GrowableBufferError};
///
///     #[test]
///     fn test_handles_allocation_failure() -> Result<(), GrowableBufferError> {
///         let mut buffer = GrowableBuffer::create(NonZeroUsize::MIN, NonZeroUsize::MIN)?;
///         buffer.push(&[1])?;
///
///         // Inject failure: growth is refused until reset
///         buffer.change_behaviour(GrowableBufferBehaviour::FailAtGrow);
///         assert!(buffer.push(&[2]).is_err());
///
///         // Reset to normal behaviour
///         buffer.change_behaviour(GrowableBufferBehaviour::None);
///         buffer.push(&[2])?;
///         Ok(())
///     }
/// }
/// ```
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GrowableBufferBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every growth reports `AllocationFailure` before touching the buffer.
    FailAtGrow,
}

/// Type-erased growable buffer of fixed-size elements.
///
/// Elements are opaque blocks of `element_size` bytes stored back to back in a
/// single owned allocation: element `i` lives at byte offset
/// `i * element_size`. When a push finds the buffer full, capacity doubles.
///
/// # Growth
///
/// 1. Compute `2 * capacity` (overflow is reported as `AllocationFailure`)
/// 2. Allocate the new region with a fallible reservation
/// 3. Copy the live elements into it
/// 4. Release the old region
///
/// Nothing in `self` is modified until step 2 has succeeded, so a failed
/// growth leaves the buffer exactly as it was.
///
/// # Concurrency
///
/// The buffer performs no locking. Every mutating method takes `&mut self`;
/// callers sharing a buffer between threads must serialize access themselves.
///
/// # Example
///
/// ```rust
/// use core::num::NonZeroUsize;
/// use growbuf::{GrowableBuffer, GrowableBufferError};
///
/// fn example() -> Result<(), GrowableBufferError> {
///     let element_size = NonZeroUsize::new(4).expect("non-zero");
///     let mut buffer = GrowableBuffer::create(NonZeroUsize::MIN, element_size)?;
///
///     assert_eq!(buffer.push(&10u32.to_ne_bytes())?, 0);
///     assert_eq!(buffer.push(&20u32.to_ne_bytes())?, 1);
///     assert_eq!(buffer.capacity(), 2);
///
///     assert_eq!(buffer.pop()?, 20u32.to_ne_bytes());
///     assert_eq!(buffer.pop()?, 10u32.to_ne_bytes());
///     assert!(buffer.pop().is_err());
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct GrowableBuffer {
    storage: Vec<u8>,
    capacity: usize,
    element_size: NonZeroUsize,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: GrowableBufferBehaviour,
}

impl core::fmt::Debug for GrowableBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("element_size", &self.element_size)
            .finish_non_exhaustive()
    }
}

/// Reserves room for `capacity` elements of `element_size` bytes.
fn allocate_storage(
    capacity: usize,
    element_size: NonZeroUsize,
) -> Result<Vec<u8>, GrowableBufferError> {
    let bytes = capacity
        .checked_mul(element_size.get())
        .ok_or(GrowableBufferError::AllocationFailure {
            requested_bytes: None,
        })?;

    let mut storage = Vec::new();
    storage
        .try_reserve_exact(bytes)
        .map_err(|_| GrowableBufferError::AllocationFailure {
            requested_bytes: Some(bytes),
        })?;

    Ok(storage)
}

impl GrowableBuffer {
    /// Creates a buffer with room for `initial_elements` elements of
    /// `element_size` bytes each.
    ///
    /// # Errors
    ///
    /// Returns [`GrowableBufferError::AllocationFailure`] if the allocation
    /// cannot be satisfied, including when `initial_elements * element_size`
    /// overflows or exceeds `isize::MAX` bytes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core::num::NonZeroUsize;
    /// use growbuf::GrowableBuffer;
    ///
    /// let slots = NonZeroUsize::new(8).expect("non-zero");
    /// let element_size = NonZeroUsize::new(16).expect("non-zero");
    /// let buffer = GrowableBuffer::create(slots, element_size).expect("Failed to create");
    ///
    /// assert_eq!(buffer.len(), 0);
    /// assert_eq!(buffer.capacity(), 8);
    /// assert_eq!(buffer.element_size(), 16);
    /// ```
    pub fn create(
        initial_elements: NonZeroUsize,
        element_size: NonZeroUsize,
    ) -> Result<Self, GrowableBufferError> {
        let storage = allocate_storage(initial_elements.get(), element_size)?;

        Ok(Self {
            storage,
            capacity: initial_elements.get(),
            element_size,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: GrowableBufferBehaviour::default(),
        })
    }

    /// Returns the number of elements currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len() / self.element_size.get()
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns the number of element-slots allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the byte width of one element.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size.get()
    }

    // `capacity` starts from a `NonZeroUsize` and only doubles, so it is never 0.
    fn grown_capacity(&self) -> Result<usize, GrowableBufferError> {
        self.capacity
            .checked_mul(2)
            .ok_or(GrowableBufferError::AllocationFailure {
                requested_bytes: None,
            })
    }

    #[cold]
    #[inline(never)]
    pub(crate) fn grow(&mut self) -> Result<(), GrowableBufferError> {
        let new_capacity = self.grown_capacity()?;

        #[cfg(any(test, feature = "test_utils"))]
        if matches!(self.behaviour, GrowableBufferBehaviour::FailAtGrow) {
            return Err(GrowableBufferError::AllocationFailure {
                requested_bytes: new_capacity.checked_mul(self.element_size.get()),
            });
        }

        let mut storage = allocate_storage(new_capacity, self.element_size)?;
        storage.extend_from_slice(&self.storage);

        // Dropping the previous Vec releases the old region.
        self.storage = storage;
        self.capacity = new_capacity;

        Ok(())
    }

    /// Appends a copy of `element` and returns the index it was stored at.
    ///
    /// Doubles the capacity first if the buffer is full.
    ///
    /// # Errors
    ///
    /// - [`GrowableBufferError::ElementSizeMismatch`] if `element.len()` differs
    ///   from [`element_size()`](Self::element_size).
    /// - [`GrowableBufferError::AllocationFailure`] if growth was required and
    ///   could not be satisfied. The buffer is left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core::num::NonZeroUsize;
    /// use growbuf::{GrowableBuffer, GrowableBufferError};
    ///
    /// fn example() -> Result<(), GrowableBufferError> {
    ///     let element_size = NonZeroUsize::new(2).expect("non-zero");
    ///     let mut buffer = GrowableBuffer::create(NonZeroUsize::MIN, element_size)?;
    ///
    ///     assert_eq!(buffer.push(&[1, 2])?, 0);
    ///     assert_eq!(buffer.push(&[3, 4])?, 1);
    ///
    ///     // Wrong width is rejected
    ///     assert!(buffer.push(&[5]).is_err());
    ///     assert_eq!(buffer.len(), 2);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn push(&mut self, element: &[u8]) -> Result<usize, GrowableBufferError> {
        if element.len() != self.element_size.get() {
            return Err(GrowableBufferError::ElementSizeMismatch {
                expected: self.element_size.get(),
                actual: element.len(),
            });
        }

        if self.len() == self.capacity {
            self.grow()?;
        }

        let index = self.len();
        self.storage.extend_from_slice(element);

        Ok(index)
    }

    /// Removes the last element and passes its bytes to `f`.
    ///
    /// The slice handed to `f` is only valid for the duration of the call;
    /// nothing borrowed from the buffer outlives it. Capacity is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GrowableBufferError::EmptyBuffer`] if the buffer holds no
    /// elements. `f` is not called in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core::num::NonZeroUsize;
    /// use growbuf::{GrowableBuffer, GrowableBufferError};
    ///
    /// fn example() -> Result<(), GrowableBufferError> {
    ///     let element_size = NonZeroUsize::new(4).expect("non-zero");
    ///     let mut buffer = GrowableBuffer::create(NonZeroUsize::MIN, element_size)?;
    ///     buffer.push(&7u32.to_le_bytes())?;
    ///
    ///     let value = buffer.pop_with(|bytes| {
    ///         u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    ///     })?;
    ///
    ///     assert_eq!(value, 7);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    pub fn pop_with<R, F>(&mut self, f: F) -> Result<R, GrowableBufferError>
    where
        F: FnOnce(&[u8]) -> R,
    {
        let last = self
            .len()
            .checked_sub(1)
            .ok_or(GrowableBufferError::EmptyBuffer)?;
        let offset = last * self.element_size.get();

        let result = f(&self.storage[offset..]);
        self.storage.truncate(offset);

        Ok(result)
    }

    /// Removes the last element and returns an owned copy of its bytes.
    ///
    /// The returned `Vec` does not alias the buffer, so it stays valid across
    /// later pushes and pops. Capacity is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GrowableBufferError::EmptyBuffer`] if the buffer holds no
    /// elements.
    pub fn pop(&mut self) -> Result<Vec<u8>, GrowableBufferError> {
        self.pop_with(|bytes| bytes.to_vec())
    }

    /// Releases the buffer and its storage.
    ///
    /// Equivalent to dropping it; consuming `self` rules out a second call.
    pub fn destroy(self) {
        drop(self);
    }

    /// Changes the test behaviour for this buffer.
    ///
    /// This is only available with the `test_utils` feature and allows
    /// injecting allocation failures for testing error handling paths.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: GrowableBufferBehaviour) {
        self.behaviour = behaviour;
    }

    #[cfg(test)]
    pub(crate) fn with_raw_capacity(capacity: usize, element_size: NonZeroUsize) -> Self {
        Self {
            storage: Vec::new(),
            capacity,
            element_size,
            behaviour: GrowableBufferBehaviour::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn live_bytes(&self) -> &[u8] {
        &self.storage
    }

    #[cfg(test)]
    pub(crate) fn reserved_bytes(&self) -> usize {
        self.storage.capacity()
    }

    #[cfg(test)]
    pub(crate) fn storage_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }
}
