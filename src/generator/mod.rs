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

//! the generator algebra: a typed combinator language over [`ByteSource`].
//!
//! # Module Organization
//!
//! - `primitives`: leaf generators (`int`, `uint8`, `bool_`, `float`, `bytes`, `range`, ...)
//! - `combinators`: composition (`map`, `choose`, `option`, `pair`, `list`, `fix`, ...)
//! - `tuple`: the `GenTuple` trait that gives `map`/`pair`/friends static,
//!   per-arity argument lists without a single "any arity" trait object

mod combinators;
mod primitives;
mod tuple;

pub use combinators::{
    choose, concat_gen_list, const_, dynamic_bind, fix, list, list1, map, option, pair,
    result_of, unlazy, with_printer,
};
pub use primitives::{
    bool_, bytes, bytes_fixed, float, int, int16, int32, int64, int8, range, uint16, uint32,
    uint64, uint8,
};
pub use tuple::{Apply, GenTuple};

use std::rc::Rc;

use crate::byte_source::{ByteSource, GenResult};
use crate::printer::Printer;

/// the maximum number of elements [`list`] and [`list1`] will ever produce,
/// regardless of how many continuation bytes the buffer has left (spec
/// Open Question (b): a conservative, documented bound).
pub const MAX_LIST_LEN: usize = 4096;

/// a deterministic, partial function from a [`ByteSource`] to a value of
/// type `T`.
///
/// `Gen<T>` is a value: it has no identity, equality is not defined, and
/// cloning it gives an independent handle to the same generation logic
/// (the clone is cheap — it shares the underlying closure via `Rc`).
/// generators compose through the functions in this module rather than
/// through methods, mirroring the combinator-first style the
/// specification describes.
pub struct Gen<T> {
    run: Rc<dyn Fn(&mut ByteSource) -> GenResult<T>>,
    printer: Option<Printer<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            run: Rc::clone(&self.run),
            printer: self.printer.clone(),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// build a generator directly from its byte-stream interpreter.
    ///
    /// most callers reach for the combinators in this module instead; this
    /// is the escape hatch they're built on top of.
    pub fn new(run: impl Fn(&mut ByteSource) -> GenResult<T> + 'static) -> Self {
        Gen {
            run: Rc::new(run),
            printer: None,
        }
    }

    /// draw one value, advancing `source`.
    pub fn run(&self, source: &mut ByteSource) -> GenResult<T> {
        (self.run)(source)
    }

    /// the printer most recently attached via [`with_printer`], if any.
    pub fn printer(&self) -> Option<&Printer<T>> {
        self.printer.as_ref()
    }
}
