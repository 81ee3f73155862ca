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

//! leaf generators: the primitives every combinator eventually bottoms out
//! into.

use super::Gen;
use crate::error::GeneratorBuildError;

/// platform-word signed integer, full range.
pub fn int() -> Gen<isize> {
    Gen::new(|src| src.read_isize())
}

/// full-range unsigned 8-bit integer.
pub fn uint8() -> Gen<u8> {
    Gen::new(|src| src.read_u8())
}

/// full-range signed 8-bit integer.
pub fn int8() -> Gen<i8> {
    Gen::new(|src| src.read_i8())
}

/// full-range unsigned 16-bit integer.
pub fn uint16() -> Gen<u16> {
    Gen::new(|src| src.read_u16())
}

/// full-range signed 16-bit integer.
pub fn int16() -> Gen<i16> {
    Gen::new(|src| src.read_i16())
}

/// full-range unsigned 32-bit integer.
pub fn uint32() -> Gen<u32> {
    Gen::new(|src| src.read_u32())
}

/// full-range signed 32-bit integer.
pub fn int32() -> Gen<i32> {
    Gen::new(|src| src.read_i32())
}

/// full-range unsigned 64-bit integer.
pub fn uint64() -> Gen<u64> {
    Gen::new(|src| src.read_u64())
}

/// full-range signed 64-bit integer.
pub fn int64() -> Gen<i64> {
    Gen::new(|src| src.read_i64())
}

/// full IEEE-754 binary64 range, including NaNs, infinities, and
/// subnormals — no filtering.
pub fn float() -> Gen<f64> {
    Gen::new(|src| src.read_double())
}

/// reads one byte, yields `true` iff its low bit is set.
///
/// spec Open Question (a): this is the byte policy we pick and commit to
/// for seed compatibility — callers relying on `bool_`'s output for a
/// saved seed can count on this forever.
pub fn bool_() -> Gen<bool> {
    Gen::new(|src| Ok(src.read_u8()? & 1 == 1))
}

/// variable-length byte string, 0..=255 bytes (length-prefixed).
pub fn bytes() -> Gen<Vec<u8>> {
    Gen::new(|src| Ok(src.read_bytes_var()?.to_vec()))
}

/// exactly `k` bytes. `k == 0` is valid and always yields an empty vector.
pub fn bytes_fixed(k: usize) -> Gen<Vec<u8>> {
    Gen::new(move |src| Ok(src.read_bytes_fixed(k)?.to_vec()))
}

/// integers uniformly distributed, from the fuzzer's perspective, in
/// `[min, min + n)`. `n` must be `>= 1`.
pub fn range(min: i64, n: i64) -> Result<Gen<i64>, GeneratorBuildError> {
    if n < 1 {
        return Err(GeneratorBuildError::NonPositiveRangeWidth { n });
    }
    let width = n as u64;
    Ok(Gen::new(move |src| {
        let raw = src.read_u64()?;
        Ok(min + (raw % width) as i64)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::ByteSource;

    #[test]
    fn bool_reads_low_bit() {
        let mut src = ByteSource::new(&[0x02, 0x03]);
        assert_eq!(bool_().run(&mut src).unwrap(), false);
        assert_eq!(bool_().run(&mut src).unwrap(), true);
    }

    #[test]
    fn range_rejects_non_positive_width() {
        assert!(range(10, 0).is_err());
        assert!(range(10, -1).is_err());
    }

    #[test]
    fn range_stays_within_bounds() {
        let g = range(10, 5).unwrap();
        for first_byte in 0u8..=255 {
            let mut src = ByteSource::new(&[first_byte, 0, 0, 0, 0, 0, 0, 0]);
            let v = g.run(&mut src).unwrap();
            assert!((10..15).contains(&v));
        }
    }

    #[test]
    fn uint8_consumes_exactly_one_byte() {
        let mut src = ByteSource::new(&[0x2a]);
        assert_eq!(uint8().run(&mut src).unwrap(), 0x2a);
        assert!(src.is_exhausted());
    }

    #[test]
    fn bytes_fixed_zero_never_reads() {
        let mut src = ByteSource::new(&[]);
        assert_eq!(bytes_fixed(0).run(&mut src).unwrap(), Vec::<u8>::new());
    }
}
