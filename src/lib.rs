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

//! A property-based testing library driven by a coverage-guided fuzzer.
//!
//! Users declare [`generator`] combinators describing how to decode
//! structured values out of a raw byte stream, compose them into
//! [`property`] functions, and [`registry::add_test`] them. A
//! [`harness`] then consumes buffers supplied by an external fuzzer,
//! decodes them through the generator tree, runs the property, and
//! reports the [`outcome::Outcome`] back to the fuzzer collaborator.
//!
//! # Examples
//!
//! ```
//! use fuzzforge::generator::int;
//! use fuzzforge::outcome::{run, Outcome};
//! use fuzzforge::property::check_eq;
//!
//! let g = int();
//! let outcome = run(|| check_eq(1 + 1, 2));
//! assert_eq!(outcome, Outcome::Pass);
//! let _ = g; // generators are typically driven by the harness, not by hand
//! ```

pub mod byte_source;
pub mod cli;
pub mod error;
pub mod generator;
pub mod harness;
pub mod outcome;
pub mod printer;
pub mod property;
pub mod registry;

pub use byte_source::{ByteSource, GenResult, OutOfInput};
pub use error::GeneratorBuildError;
pub use generator::Gen;
pub use outcome::Outcome;
pub use printer::Printer;
pub use registry::Test;
