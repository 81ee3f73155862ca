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

use std::cell::RefCell;

use fuzzforge::generator::{list, uint8};
use fuzzforge::harness::{self, EXIT_FAIL, EXIT_INVALID, EXIT_PASS};
use fuzzforge::property::check_eq;
use fuzzforge::registry;
use libfuzzer_sys::fuzz_target;

thread_local! {
    static REGISTERED: RefCell<bool> = RefCell::new(false);
}

// the outcome protocol's own trust boundary, exercised end to end: for any
// byte buffer, driving a registered test through `harness::run_once` must
// return one of exactly the three defined exit codes. the property body
// itself never panics (`reverse` is its own inverse), so the only way this
// target can crash is if `harness`/`outcome` failed to catch something
// they were supposed to.
fuzz_target!(|data: &[u8]| {
    REGISTERED.with(|flag| {
        if !*flag.borrow() {
            registry::add_test(
                Some("fuzz_reverse_twice_is_identity"),
                (list(uint8()),),
                |xs: Vec<u8>| {
                    let mut once = xs.clone();
                    once.reverse();
                    let mut twice = once;
                    twice.reverse();
                    check_eq(xs, twice);
                },
            );
            *flag.borrow_mut() = true;
        }
    });

    let test = registry::find("fuzz_reverse_twice_is_identity").expect("registered above");
    let code = harness::run_once(&test, data);
    assert!(matches!(code, EXIT_PASS | EXIT_INVALID | EXIT_FAIL));
});
