// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::num::NonZeroUsize;

use crate::GrowableBuffer;

pub(crate) fn nz(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).expect("Failed to build NonZeroUsize")
}

pub(crate) fn u32_buffer(initial_elements: usize) -> GrowableBuffer {
    GrowableBuffer::create(nz(initial_elements), nz(core::mem::size_of::<u32>()))
        .expect("Failed to create GrowableBuffer")
}

pub(crate) fn push_u32(buffer: &mut GrowableBuffer, value: u32) -> usize {
    buffer
        .push(&value.to_ne_bytes())
        .expect("Failed to buffer.push(..)")
}

pub(crate) fn pop_u32(buffer: &mut GrowableBuffer) -> u32 {
    let bytes = buffer.pop().expect("Failed to buffer.pop()");
    u32::from_ne_bytes(bytes.try_into().expect("Failed to convert popped bytes"))
}
