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

//! pretty-printer machinery for failure reporting.
//!
//! a [`Printer<T>`] is a value, like a generator: it can be built, cloned,
//! and attached to a generator via [`with_printer`](crate::generator::with_printer)
//! without changing the values that generator produces. attachment is
//! decorative — it only changes what the failure report looks like.
//!
//! the module-level [`register`]/[`lookup`] pair is a thread-local,
//! best-effort registry keyed by `TypeId`: whenever `with_printer` attaches
//! a printer to a generator of type `T`, that printer also becomes the
//! ambient fallback for `T` anywhere else in the process (single fuzzer
//! child, single thread — see the crate's concurrency model). this is what
//! lets `check_eq` find "the nearest attached printer" for a type without
//! the caller threading a generator reference through every property.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// a pretty-printer for values of type `T`.
///
/// printers are values with no identity, same as generators: cloning a
/// `Printer` gives you an independent handle to the same formatting logic.
#[derive(Clone)]
pub struct Printer<T> {
    write: Rc<dyn Fn(&mut dyn fmt::Write, &T) -> fmt::Result>,
}

impl<T: 'static> Printer<T> {
    /// build a printer from a formatting closure.
    pub fn new(f: impl Fn(&mut dyn fmt::Write, &T) -> fmt::Result + 'static) -> Self {
        Printer { write: Rc::new(f) }
    }

    /// printer for any `T: Debug`, used as the built-in fallback.
    pub fn from_debug() -> Self
    where
        T: fmt::Debug,
    {
        Printer::new(|w, v| write!(w, "{v:?}"))
    }

    /// format `value` into a fresh `String`.
    pub fn render(&self, value: &T) -> String {
        let mut out = String::new();
        // a `String`'s `fmt::Write` impl never fails.
        let _ = (self.write)(&mut out, value);
        out
    }
}

thread_local! {
    static REGISTRY: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// register `printer` as the ambient fallback for `T`.
///
/// called automatically by [`with_printer`](crate::generator::with_printer);
/// exposed directly for callers who want to seed the registry without
/// building a throwaway generator.
pub fn register<T: 'static>(printer: Printer<T>) {
    REGISTRY.with(|r| {
        r.borrow_mut().insert(TypeId::of::<T>(), Rc::new(printer));
    });
}

/// look up the ambient printer registered for `T`, if any.
pub fn lookup<T: 'static>() -> Option<Printer<T>> {
    REGISTRY.with(|r| {
        r.borrow()
            .get(&TypeId::of::<T>())
            .and_then(|any| any.downcast_ref::<Printer<T>>())
            .cloned()
    })
}

/// resolve the printer to use for a `check_eq` failure, in priority order:
/// an explicit printer, then the ambient registry, then a `Debug`-derived
/// fallback.
pub fn resolve<T: fmt::Debug + 'static>(explicit: Option<&Printer<T>>) -> Printer<T> {
    if let Some(p) = explicit {
        return p.clone();
    }
    if let Some(p) = lookup::<T>() {
        return p;
    }
    Printer::from_debug()
}
