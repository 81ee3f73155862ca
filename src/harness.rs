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

//! the entry point a surrounding binary calls into: obtains a byte buffer
//! from the fuzzer collaborator, drives a registered [`Test`] against it,
//! and signals the outcome back in whatever form that collaborator expects.
//!
//! three modes are supported, per the external-interfaces contract:
//! single-shot (one buffer from a file, for manual seed replay),
//! AFL-style persistent mode (a framed loop over stdin, for the fork-server
//! integration), and a batch replay mode (many seed files at once, run in
//! parallel with `rayon`) — useful for re-checking an entire saved corpus,
//! which isn't part of the original interface but doesn't violate its
//! single-generator-tree-per-iteration ordering guarantee, since each seed
//! file gets its own independent `ByteSource`.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::byte_source::ByteSource;
use crate::outcome::Outcome;
use crate::registry::Test;

/// process exit code for [`Outcome::Pass`].
pub const EXIT_PASS: i32 = 0;
/// process exit code for [`Outcome::Fail`] and [`Outcome::Crash`] — the
/// fuzzer collaborator treats both as "this input crashed the target".
pub const EXIT_FAIL: i32 = 1;
/// process exit code for [`Outcome::Invalid`]: a distinguished, small,
/// nonzero value disjoint from [`EXIT_FAIL`], reserved by convention for
/// "skip this input, it doesn't count" (the fuzzer collaborator must not
/// treat it as a crash).
pub const EXIT_INVALID: i32 = 77;

fn exit_code_for(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Pass => EXIT_PASS,
        Outcome::Invalid => EXIT_INVALID,
        Outcome::Fail { .. } | Outcome::Crash { .. } => EXIT_FAIL,
    }
}

/// print a failure or crash diagnostic to standard error, in the format the
/// fuzzer's saved-crash log expects: the test name, then the outcome.
fn report(test: &Test, outcome: &Outcome) {
    let name = test.name().unwrap_or("<unnamed>");
    match outcome {
        Outcome::Fail { .. } | Outcome::Crash { .. } => {
            eprintln!("test `{name}`: {outcome}");
        }
        Outcome::Invalid | Outcome::Pass => {}
    }
}

/// run `test` once against `data`, reporting to stderr on `Fail`/`Crash`,
/// and return the exit code the calling binary should terminate with.
pub fn run_once(test: &Test, data: &[u8]) -> i32 {
    let mut source = ByteSource::new(data);
    let outcome = test.run(&mut source);
    report(test, &outcome);
    exit_code_for(&outcome)
}

/// single-shot mode: read one buffer from `path` (or standard input, for
/// `path == "-"`) and run `test` against it.
pub fn run_file_once(test: &Test, path: &Path) -> io::Result<i32> {
    let data = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(path)?
    };
    Ok(run_once(test, &data))
}

/// the AFL-style persistent-mode handshake token, written once on startup
/// to tell the fuzzer collaborator this process is ready to receive
/// framed buffers on standard input.
const READY_TOKEN: &[u8] = b"AFL_PERSISTENT_READY\n";

/// AFL-style persistent mode: signal readiness once, then loop reading
/// length-framed buffers from `reader` (a 4-byte little-endian length
/// prefix followed by that many bytes) until EOF.
///
/// each iteration's outcome is written to `writer` as a single byte
/// (`0` = pass, `1` = invalid, `2` = fail/crash) so the collaborator can
/// track iteration results without parsing stderr; a `Fail` or `Crash`
/// additionally prints a diagnostic to stderr and ends the loop early,
/// returning [`EXIT_FAIL`] so the wrapping process aborts and the fuzzer
/// records the crashing input.
pub fn run_persistent<R: Read, W: Write>(
    test: &Test,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<i32> {
    writer.write_all(READY_TOKEN)?;
    writer.flush()?;

    loop {
        let mut len_buf = [0u8; 4];
        match reader.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(EXIT_PASS),
            Err(e) => return Err(e),
        }
        let len = u32::from_le_bytes(len_buf) as usize;

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data)?;

        let mut source = ByteSource::new(&data);
        let outcome = test.run(&mut source);

        let marker: u8 = match outcome {
            Outcome::Pass => 0,
            Outcome::Invalid => 1,
            Outcome::Fail { .. } | Outcome::Crash { .. } => {
                report(test, &outcome);
                writer.write_all(&[2])?;
                writer.flush()?;
                return Ok(EXIT_FAIL);
            }
        };
        writer.write_all(&[marker])?;
        writer.flush()?;
    }
}

/// summary of a batch replay over a saved corpus directory.
pub struct BatchReport {
    pub total: usize,
    pub passed: usize,
    pub invalid: usize,
    pub failures: Vec<(PathBuf, Outcome)>,
}

impl BatchReport {
    /// `0` if nothing failed or crashed, [`EXIT_FAIL`] otherwise — suitable
    /// as a process exit code for a "replay the whole corpus" binary mode.
    pub fn exit_code(&self) -> i32 {
        if self.failures.is_empty() {
            EXIT_PASS
        } else {
            EXIT_FAIL
        }
    }
}

/// run `test` against every file in `paths`, in parallel.
///
/// each file gets its own `ByteSource`; nothing is shared across them
/// except the (read-only, after [`crate::registry::freeze`]) test itself,
/// so this does not disturb the single-generator-tree-per-iteration
/// ordering guarantee — that guarantee is about byte consumption order
/// *within* one buffer, not about how many buffers run concurrently.
pub fn run_corpus_batch(test: &Test, paths: &[PathBuf]) -> io::Result<BatchReport> {
    let results: Vec<(PathBuf, io::Result<Outcome>)> = paths
        .par_iter()
        .map(|path| {
            let outcome = std::fs::read(path).map(|data| {
                let mut source = ByteSource::new(&data);
                test.run(&mut source)
            });
            (path.clone(), outcome)
        })
        .collect();

    let mut report = BatchReport {
        total: results.len(),
        passed: 0,
        invalid: 0,
        failures: Vec::new(),
    };

    for (path, outcome) in results {
        let outcome = outcome?;
        match &outcome {
            Outcome::Pass => report.passed += 1,
            Outcome::Invalid => report.invalid += 1,
            Outcome::Fail { .. } | Outcome::Crash { .. } => {
                eprintln!("{}: {outcome}", path.display());
                report.failures.push((path, outcome));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::int;
    use crate::registry;
    use std::io::Cursor;

    fn make_test(name: &str) -> Test {
        registry::add_test(Some(name), (int(),), |n: isize| {
            crate::property::guard(n != 0);
            crate::property::check(n == n);
        });
        registry::find(name).unwrap()
    }

    #[test]
    fn run_once_passing_buffer_exits_zero() {
        let test = make_test("harness_run_once_pass");
        let data = [1u8; 16];
        assert_eq!(run_once(&test, &data), EXIT_PASS);
    }

    #[test]
    fn run_once_guard_rejected_buffer_exits_invalid() {
        let test = make_test("harness_run_once_invalid");
        let data = [0u8; 16];
        assert_eq!(run_once(&test, &data), EXIT_INVALID);
    }

    #[test]
    fn persistent_loop_reports_pass_then_stops_at_eof() {
        let test = make_test("harness_persistent_pass");
        let payload = [1u8; 16];
        let mut framed = Vec::new();
        framed.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        framed.extend_from_slice(&payload);

        let mut reader = Cursor::new(framed);
        let mut writer = Vec::new();
        let code = run_persistent(&test, &mut reader, &mut writer).unwrap();

        assert_eq!(code, EXIT_PASS);
        assert!(writer.starts_with(READY_TOKEN));
        assert_eq!(writer[READY_TOKEN.len()], 0);
    }

    #[test]
    fn persistent_loop_stops_early_on_fail() {
        registry::add_test(Some("harness_persistent_fail"), (int(),), |n: isize| {
            crate::property::check(n != 7);
        });
        let test = registry::find("harness_persistent_fail").unwrap();

        let payload = 7isize.to_le_bytes();
        let mut framed = Vec::new();
        framed.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        framed.extend_from_slice(&payload);
        // a second iteration that would pass, proving the loop never gets there.
        framed.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        framed.extend_from_slice(&0isize.to_le_bytes());

        let mut reader = Cursor::new(framed);
        let mut writer = Vec::new();
        let code = run_persistent(&test, &mut reader, &mut writer).unwrap();

        assert_eq!(code, EXIT_FAIL);
        assert_eq!(*writer.last().unwrap(), 2);
    }
}
