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

use fuzzforge::byte_source::ByteSource;
use fuzzforge::generator::{self, choose, int, list, map, option, pair, range, uint8};
use fuzzforge::harness;
use fuzzforge::outcome::{run, Outcome};
use fuzzforge::property::{check, check_eq, guard};
use fuzzforge::registry;

#[test]
fn same_buffer_and_tree_produce_bitwise_identical_values() {
    let g = pair(int(), list(uint8()));
    let buffer = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0x01, 0xAA, 0x00];

    let mut first = ByteSource::new(&buffer);
    let v1 = g.run(&mut first).unwrap();

    let mut second = ByteSource::new(&buffer);
    let v2 = g.run(&mut second).unwrap();

    assert_eq!(v1, v2);
    assert_eq!(first.remaining(), second.remaining());
}

#[test]
fn map_arity_three_applies_in_declared_order() {
    let g = map((uint8(), uint8(), uint8()), |a: u8, b: u8, c: u8| {
        format!("{a}-{b}-{c}")
    });
    let mut src = ByteSource::new(&[1, 2, 3]);
    assert_eq!(g.run(&mut src).unwrap(), "1-2-3");
}

#[test]
fn choose_selects_by_modulus_of_first_byte() {
    let g = choose(vec![
        generator::const_("a".to_string()),
        generator::const_("b".to_string()),
        generator::const_("c".to_string()),
    ])
    .unwrap();
    // 7 % 3 == 1 -> "b"
    let mut src = ByteSource::new(&[7]);
    assert_eq!(g.run(&mut src).unwrap(), "b");
}

#[test]
fn list_low_bit_zero_terminates_including_empty_case() {
    let g = list(uint8());
    let mut empty_src = ByteSource::new(&[0x00]);
    assert_eq!(g.run(&mut empty_src).unwrap(), Vec::<u8>::new());
}

#[test]
fn truncated_buffer_is_invalid_never_fail_never_pass() {
    let g = pair(int(), int());
    let mut src = ByteSource::new(&[0x01]);
    let outcome = match g.run(&mut src) {
        Ok(_) => Outcome::Pass,
        Err(out_of_input) => Outcome::from(out_of_input),
    };
    assert_eq!(outcome, Outcome::Invalid);
}

#[test]
fn range_never_escapes_its_bounds_across_every_selector_byte() {
    let g = range(10, 5).unwrap();
    for b in 0u8..=255 {
        let mut src = ByteSource::new(&[b, 0, 0, 0, 0, 0, 0, 0]);
        let v = g.run(&mut src).unwrap();
        assert!((10..15).contains(&v));
    }
}

#[test]
fn const_consumes_zero_bytes() {
    let g = generator::const_(7);
    let mut src = ByteSource::new(&[]);
    assert_eq!(g.run(&mut src).unwrap(), 7);
    assert_eq!(src.remaining(), 0);
}

#[test]
fn option_zero_selector_never_runs_inner_generator() {
    let g = option(int());
    // one selector byte only; if the inner `int` ran, this would underflow.
    let mut src = ByteSource::new(&[0x00]);
    assert_eq!(g.run(&mut src).unwrap(), None);
}

#[test]
fn check_eq_failure_carries_both_printed_values() {
    let outcome = run(|| check_eq(vec![1, 2, 3], vec![1, 2, 4]));
    match outcome {
        Outcome::Fail { printed, .. } => {
            let printed = printed.unwrap();
            assert!(printed.contains("1, 2, 3"));
            assert!(printed.contains("1, 2, 4"));
        }
        other => panic!("expected Fail, got {other:?}"),
    }
}

#[test]
fn guard_false_never_reported_as_failure() {
    assert_eq!(run(|| guard(1 + 1 == 3)), Outcome::Invalid);
}

#[test]
fn end_to_end_test_through_the_registry_and_harness() {
    registry::add_test(
        Some("integration_end_to_end"),
        (int(), int()),
        |a: isize, b: isize| {
            check(a.wrapping_add(b) == b.wrapping_add(a));
        },
    );
    let test = registry::find("integration_end_to_end").unwrap();
    let code = harness::run_once(&test, &[0u8; 32]);
    assert_eq!(code, harness::EXIT_PASS);
}

#[test]
fn end_to_end_failing_property_reports_exit_fail() {
    registry::add_test(Some("integration_always_fails"), (int(),), |_n: isize| {
        check(false);
    });
    let test = registry::find("integration_always_fails").unwrap();
    let code = harness::run_once(&test, &[0u8; 16]);
    assert_eq!(code, harness::EXIT_FAIL);
}
