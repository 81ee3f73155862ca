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
use fuzzforge::generator::{int, list, map, option, pair, uint8};
use libfuzzer_sys::fuzz_target;

// a moderately nested generator tree, built fresh each iteration: a pair of
// a platform integer and a list of (optional byte, byte) pairs. running it
// twice against an identical buffer must yield identical values and
// consume identical byte counts, regardless of what the fuzzer feeds it.
fuzz_target!(|data: &[u8]| {
    let tree = || {
        pair(
            int(),
            list(map((option(uint8()), uint8()), |a: Option<u8>, b: u8| {
                (a, b)
            })),
        )
    };

    let mut first = ByteSource::new(data);
    let v1 = tree().run(&mut first);

    let mut second = ByteSource::new(data);
    let v2 = tree().run(&mut second);

    match (v1, v2) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a, b, "same buffer, same tree, different value");
            assert_eq!(first.remaining(), second.remaining());
        }
        (Err(_), Err(_)) => {}
        other => panic!("same buffer, same tree, divergent exhaustion: {other:?}"),
    }
});
