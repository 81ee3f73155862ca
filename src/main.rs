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

use std::io;

use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;

use fuzzforge::cli::{Cli, Mode};
use fuzzforge::generator::{int, list, range, uint8};
use fuzzforge::{harness, property, registry};

/// register the tests this demo binary ships with.
///
/// a real collaborator binary would do this once at startup for whatever
/// tests its own crate defines; the library places no constraint on how
/// many there are or where they're declared.
fn register_demo_tests() {
    registry::add_test(
        Some("sum_is_commutative"),
        (int(), int()),
        |a: isize, b: isize| {
            property::check_eq(a.wrapping_add(b), b.wrapping_add(a));
        },
    );

    registry::add_test(
        Some("reverse_twice_is_identity"),
        (list(uint8()),),
        |xs: Vec<u8>| {
            let mut once = xs.clone();
            once.reverse();
            let mut twice = once;
            twice.reverse();
            property::check_eq(xs, twice);
        },
    );

    let bounded = range(10, 5).expect("range width is positive");
    registry::add_test(Some("range_stays_in_bounds"), (bounded,), |n: i64| {
        property::check(n >= 10 && n < 15);
    });
}

fn main() -> Result<()> {
    color_eyre::install()?;

    register_demo_tests();

    let args = Cli::parse();

    let test = match &args.test {
        Some(name) => {
            registry::find(name).ok_or_else(|| eyre!("no registered test named `{name}`"))?
        }
        None => registry::get(0).ok_or_else(|| eyre!("no tests registered"))?,
    };

    registry::freeze();

    let code = match args.mode {
        Mode::List => {
            for i in 0..registry::len() {
                if let Some(t) = registry::get(i) {
                    println!("{}", t.name().unwrap_or("<unnamed>"));
                }
            }
            harness::EXIT_PASS
        }
        Mode::Run { file } => harness::run_file_once(&test, &file)?,
        Mode::Persistent => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            harness::run_persistent(&test, &mut stdin.lock(), &mut stdout.lock())?
        }
        Mode::Corpus { dir } => {
            let paths: Vec<_> = std::fs::read_dir(&dir)?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|path| path.is_file())
                .collect();
            let report = harness::run_corpus_batch(&test, &paths)?;
            println!(
                "{} total, {} passed, {} invalid, {} failed",
                report.total,
                report.passed,
                report.invalid,
                report.failures.len()
            );
            report.exit_code()
        }
    };

    std::process::exit(code);
}
