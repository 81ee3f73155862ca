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

//! the process-wide collection of named tests, each pairing a generator
//! tree with a property function.
//!
//! registration is a single-writer phase: `add_test` is meant to be called
//! during process startup, before the harness loop begins. once the loop
//! starts it calls [`freeze`], after which further registration is a
//! programmer error and panics rather than silently racing the loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::byte_source::ByteSource;
use crate::generator::{Apply, GenTuple};
use crate::outcome::{self, Outcome};

/// a registered test: an optional name, paired with the closure that draws
/// arguments from a [`ByteSource`] and runs the property against them.
pub struct Test {
    name: Option<String>,
    run: Rc<dyn Fn(&mut ByteSource) -> Outcome>,
}

impl Clone for Test {
    fn clone(&self) -> Self {
        Test {
            name: self.name.clone(),
            run: Rc::clone(&self.run),
        }
    }
}

impl Test {
    /// this test's name, if one was given to [`add_test`].
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// draw arguments from `source` and run the property, yielding its
    /// outcome. out-of-input while drawing arguments is `Invalid`, same as
    /// out-of-input from inside the property body.
    pub fn run(&self, source: &mut ByteSource) -> Outcome {
        (self.run)(source)
    }
}

thread_local! {
    static TESTS: RefCell<Vec<Test>> = RefCell::new(Vec::new());
    static FROZEN: Cell<bool> = Cell::new(false);
}

/// register a test pairing `gens` (a tuple of generators, see [`GenTuple`])
/// with `property`, a plain function or closure whose positional arguments
/// match `gens` in type and order.
///
/// panics if called after [`freeze`] — tests must all be registered before
/// the harness loop starts.
pub fn add_test<Gens, F>(name: Option<&str>, gens: Gens, property: F)
where
    Gens: GenTuple + 'static,
    Gens::Output: 'static,
    F: Apply<Gens::Output, Output = ()> + 'static,
{
    let run = move |source: &mut ByteSource| -> Outcome {
        match gens.run_all(source) {
            Ok(args) => outcome::run(|| {
                property.apply(args);
            }),
            Err(_out_of_input) => Outcome::Invalid,
        }
    };

    let test = Test {
        name: name.map(str::to_owned),
        run: Rc::new(run),
    };

    FROZEN.with(|frozen| {
        if frozen.get() {
            panic!("add_test called after the harness loop began; register all tests during process startup");
        }
    });
    TESTS.with(|tests| tests.borrow_mut().push(test));
}

/// freeze the registry: every later [`add_test`] call panics.
///
/// called once by the harness loop before it starts consuming buffers from
/// the fuzzer collaborator.
pub fn freeze() {
    FROZEN.with(|frozen| frozen.set(true));
}

/// number of currently registered tests.
pub fn len() -> usize {
    TESTS.with(|tests| tests.borrow().len())
}

/// the test at `index`, if one was registered there.
pub fn get(index: usize) -> Option<Test> {
    TESTS.with(|tests| tests.borrow().get(index).cloned())
}

/// the first test registered under `name`, if any.
pub fn find(name: &str) -> Option<Test> {
    TESTS.with(|tests| {
        tests
            .borrow()
            .iter()
            .find(|t| t.name.as_deref() == Some(name))
            .cloned()
    })
}
