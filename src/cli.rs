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

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line front end for the demo binary.
///
/// This is a thin wrapper the core harness itself exposes no flags for —
/// see `fuzzforge::harness` for the entry points a different collaborator
/// binary could wire up differently.
#[derive(Parser, Debug)]
#[command(name = "fuzzforge-demo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// name of the registered test to run; defaults to the first test
    /// registered at startup
    #[arg(short, long, value_name = "NAME")]
    pub test: Option<String>,

    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// run once against a single seed file ("-" reads standard input)
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// AFL-style persistent mode: loop reading framed buffers from stdin
    Persistent,
    /// replay every file in a directory in parallel, reporting failures
    Corpus {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// list every registered test name
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_mode_with_file() {
        let cli = Cli::parse_from(["fuzzforge-demo", "run", "seed.bin"]);
        match cli.mode {
            Mode::Run { file } => assert_eq!(file, PathBuf::from("seed.bin")),
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn parses_test_name_flag() {
        let cli = Cli::parse_from(["fuzzforge-demo", "--test", "my_test", "list"]);
        assert_eq!(cli.test.as_deref(), Some("my_test"));
    }

    #[test]
    fn parses_corpus_mode_with_dir() {
        let cli = Cli::parse_from(["fuzzforge-demo", "corpus", "seeds/"]);
        match cli.mode {
            Mode::Corpus { dir } => assert_eq!(dir, PathBuf::from("seeds/")),
            other => panic!("expected Corpus, got {other:?}"),
        }
    }
}
