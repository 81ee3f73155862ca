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

//! the user-facing vocabulary for terminating a property: `fail`/`failf`,
//! `check`/`check_eq`, and their invalid-case counterparts `guard`,
//! `bad_test`, `nonetheless`.
//!
//! every function here that doesn't return to its caller unwinds through
//! [`crate::outcome`] rather than returning a `Result` — see that module
//! for why.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::outcome::{abort_fail, abort_invalid};
use crate::printer::{self, Printer};

/// unconditionally fail the current property with `message`.
pub fn fail(message: impl Into<String>) -> ! {
    abort_fail(message.into(), None)
}

/// fail with a `format!`-style message.
#[macro_export]
macro_rules! failf {
    ($($arg:tt)*) => {
        $crate::property::fail(::std::format!($($arg)*))
    };
}

/// fail unless `condition` holds.
pub fn check(condition: bool) {
    if !condition {
        abort_fail("check failed".to_string(), None);
    }
}

/// fail unless `x == y` under default structural equality, printing both
/// sides with the best-effort fallback printer.
pub fn check_eq<T>(x: T, y: T)
where
    T: PartialEq + fmt::Debug + 'static,
{
    check_eq_opts(&CheckEqOpts::new(), x, y)
}

/// `check_eq` with an explicit printer and/or equality policy.
///
/// resolution order matches the outcome protocol: an `eq` override wins
/// over a `cmp` override, which wins over default `PartialEq`; the printer
/// used in the failure message is the explicit one, else the generator's
/// ambient printer (see [`crate::printer`]), else a `Debug`-derived one.
pub fn check_eq_opts<T>(opts: &CheckEqOpts<T>, x: T, y: T)
where
    T: PartialEq + fmt::Debug + 'static,
{
    let equal = if let Some(eq) = &opts.eq {
        eq(&x, &y)
    } else if let Some(cmp) = &opts.cmp {
        cmp(&x, &y) == Ordering::Equal
    } else {
        x == y
    };

    if !equal {
        let printer = printer::resolve(opts.pp.as_ref());
        let printed = format!("left:  {}\nright: {}", printer.render(&x), printer.render(&y));
        abort_fail("check_eq: values are not equal".to_string(), Some(printed));
    }
}

/// builder for [`check_eq_opts`]'s optional printer and equality policy.
pub struct CheckEqOpts<T> {
    pp: Option<Printer<T>>,
    eq: Option<Rc<dyn Fn(&T, &T) -> bool>>,
    cmp: Option<Rc<dyn Fn(&T, &T) -> Ordering>>,
}

impl<T> Default for CheckEqOpts<T> {
    fn default() -> Self {
        CheckEqOpts {
            pp: None,
            eq: None,
            cmp: None,
        }
    }
}

impl<T: 'static> CheckEqOpts<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// use this printer instead of the ambient or `Debug`-derived one.
    pub fn pp(mut self, printer: Printer<T>) -> Self {
        self.pp = Some(printer);
        self
    }

    /// use this equality function instead of default `PartialEq`. takes
    /// priority over [`Self::cmp`].
    pub fn eq(mut self, eq: impl Fn(&T, &T) -> bool + 'static) -> Self {
        self.eq = Some(Rc::new(eq));
        self
    }

    /// use this comparator, reduced to equality via `== Ordering::Equal`.
    pub fn cmp(mut self, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.cmp = Some(Rc::new(cmp));
        self
    }
}

/// mark the current input invalid unless `condition` holds.
pub fn guard(condition: bool) {
    if !condition {
        abort_invalid();
    }
}

/// unconditionally mark the current input invalid.
pub fn bad_test() -> ! {
    abort_invalid()
}

/// unwrap `value`, marking the current input invalid on `None`.
///
/// named for its typical use: "this would be interesting, but nonetheless,
/// without it there's nothing to check".
pub fn nonetheless<T>(value: Option<T>) -> T {
    match value {
        Some(v) => v,
        None => abort_invalid(),
    }
}
