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

//! construction-time errors for the generator algebra.
//!
//! these are programmer mistakes (a bad `range` bound, an empty `choose`
//! list) rather than per-test runtime outcomes. they are reported
//! synchronously, at the point the offending generator is built, and are
//! not part of the pass/fail/invalid outcome protocol.

use std::fmt;

/// a generator was constructed with arguments that can never produce a
/// valid generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorBuildError {
    /// `range(min, n)` was called with `n <= 0`.
    NonPositiveRangeWidth { n: i64 },
    /// `choose(gs)` was called with an empty list of alternatives.
    EmptyChoices,
}

impl fmt::Display for GeneratorBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorBuildError::NonPositiveRangeWidth { n } => {
                write!(f, "range width must be >= 1, got {n}")
            }
            GeneratorBuildError::EmptyChoices => {
                write!(f, "choose() requires a non-empty list of generators")
            }
        }
    }
}

impl std::error::Error for GeneratorBuildError {}
