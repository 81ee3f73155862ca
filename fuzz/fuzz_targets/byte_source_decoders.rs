#![no_main]
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
//
// SPDX-License-Identifier: Apache-2.0

use fuzzforge::byte_source::ByteSource;
use libfuzzer_sys::fuzz_target;

// every decoder must either return a value or `OutOfInput` — never panic,
// regardless of how the buffer runs out mid-read.
fuzz_target!(|data: &[u8]| {
    let mut src = ByteSource::new(data);
    loop {
        let before = src.remaining();
        let _ = src.read_u8();
        let _ = src.read_i8();
        let _ = src.read_u16();
        let _ = src.read_i16();
        let _ = src.read_u32();
        let _ = src.read_i32();
        let _ = src.read_u64();
        let _ = src.read_i64();
        let _ = src.read_isize();
        let _ = src.read_double();
        let _ = src.read_bytes_var();
        let _ = src.read_bytes_fixed(3);
        if src.remaining() == before {
            // nothing left that any decoder could consume.
            break;
        }
    }
});
