// SPDX-License-Identifier: Apache-2.0
//
// Copyright 2025 Cisco Systems, Inc. and its affiliates
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! single-pass cursor over a fuzzer-provided byte buffer.
//!
//! `ByteSource` is the entropy source threaded through every generator
//! invocation. it wraps an [`arbitrary::Unstructured`] but, unlike
//! `Unstructured`'s own `arbitrary()` methods, never silently falls back to
//! a default value when bytes run out: exhaustion is surfaced as
//! [`OutOfInput`], which the property runner maps to the `Invalid` outcome
//! rather than a failure.

use std::fmt;

use arbitrary::Unstructured;

/// signal raised when a read is attempted past the end of the buffer.
///
/// this is not an error in the usual sense: it is the mechanism by which a
/// generator tells the runner "this input was too short to be interesting",
/// which the runner reports as the `Invalid` outcome (never `Fail`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfInput;

impl fmt::Display for OutOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "out of input bytes")
    }
}

impl std::error::Error for OutOfInput {}

/// result of a single generator step: a value plus the advanced source, or
/// [`OutOfInput`] if the buffer was exhausted.
pub type GenResult<T> = Result<T, OutOfInput>;

/// cursor over a finite, externally owned byte buffer.
///
/// reads advance the position monotonically and never go backwards. a
/// `ByteSource` is single-use for one test iteration: construct a fresh one
/// per call into the generator tree.
pub struct ByteSource<'a> {
    inner: Unstructured<'a>,
}

impl<'a> ByteSource<'a> {
    /// wrap a fuzzer-provided buffer for a single test iteration.
    pub fn new(data: &'a [u8]) -> Self {
        ByteSource {
            inner: Unstructured::new(data),
        }
    }

    /// bytes remaining before the next read signals [`OutOfInput`].
    pub fn remaining(&self) -> usize {
        self.inner.len()
    }

    /// `true` once every byte of the buffer has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.inner.is_empty()
    }

    /// consume exactly `k` bytes and return them.
    ///
    /// `k == 0` always succeeds with an empty slice, even on an exhausted
    /// source (matches `const`'s "consumes no bytes" contract when `k`
    /// happens to be zero).
    pub fn read_bytes_fixed(&mut self, k: usize) -> GenResult<&'a [u8]> {
        self.inner.bytes(k).map_err(|_| OutOfInput)
    }

    /// consume one length-prefix byte `L`, then `L` bytes; yields a byte
    /// string of length 0..=255.
    pub fn read_bytes_var(&mut self) -> GenResult<&'a [u8]> {
        let len = self.read_u8()? as usize;
        self.read_bytes_fixed(len)
    }

    /// consume one byte.
    pub fn read_u8(&mut self) -> GenResult<u8> {
        let bytes = self.read_bytes_fixed(1)?;
        Ok(bytes[0])
    }

    /// consume one byte, reinterpreted as two's-complement signed.
    pub fn read_i8(&mut self) -> GenResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// consume 2 bytes, decode as unsigned little-endian.
    pub fn read_u16(&mut self) -> GenResult<u16> {
        let bytes = self.read_bytes_fixed(2)?;
        Ok(u16::from_le_bytes(bytes.try_into().unwrap()))
    }

    /// consume 2 bytes, reinterpret as two's-complement signed.
    pub fn read_i16(&mut self) -> GenResult<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// consume 4 bytes, decode as unsigned little-endian.
    pub fn read_u32(&mut self) -> GenResult<u32> {
        let bytes = self.read_bytes_fixed(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    /// consume 4 bytes, reinterpret as two's-complement signed.
    pub fn read_i32(&mut self) -> GenResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// consume 8 bytes, decode as unsigned little-endian.
    pub fn read_u64(&mut self) -> GenResult<u64> {
        let bytes = self.read_bytes_fixed(8)?;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }

    /// consume 8 bytes, reinterpret as two's-complement signed.
    pub fn read_i64(&mut self) -> GenResult<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// consume `size_of::<isize>()` bytes, decode as a platform-word signed
    /// integer, full range.
    pub fn read_isize(&mut self) -> GenResult<isize> {
        const N: usize = std::mem::size_of::<isize>();
        let bytes = self.read_bytes_fixed(N)?;
        let arr: [u8; N] = bytes.try_into().unwrap();
        Ok(isize::from_le_bytes(arr))
    }

    /// consume 8 bytes, decode as IEEE-754 binary64 in the platform's
    /// native byte order (no NaN/subnormal filtering).
    pub fn read_double(&mut self) -> GenResult<f64> {
        let bytes = self.read_bytes_fixed(8)?;
        Ok(f64::from_ne_bytes(bytes.try_into().unwrap()))
    }
}
