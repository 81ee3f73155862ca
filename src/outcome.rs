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

//! the four-valued outcome protocol a property terminates with, and the
//! non-local-exit plumbing that gets it there.
//!
//! `fail`/`failf`/`check`/`check_eq` on one side and `guard`/`bad_test`/
//! `nonetheless` on the other need to abort the property function from
//! arbitrarily deep inside user code without the user threading a `Result`
//! through every call. we use `std::panic::panic_any` with a private,
//! typed payload ([`Abort`]) carried across the unwind, and catch it at the
//! single trust boundary in [`run`]. any panic whose payload isn't an
//! `Abort` is a genuine crash and is reported as such — the runner never
//! mistakes a real panic for a deliberate outcome signal.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::byte_source::OutOfInput;

/// outcome of one property invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// the property returned normally.
    Pass,
    /// a counterexample was found.
    Fail {
        message: String,
        printed: Option<String>,
    },
    /// the generated input was uninteresting; does not count as a failure.
    Invalid,
    /// the property panicked without going through the outcome protocol.
    Crash { message: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => write!(f, "pass"),
            Outcome::Fail { message, printed } => {
                write!(f, "FAIL: {message}")?;
                if let Some(p) = printed {
                    write!(f, "\n{p}")?;
                }
                Ok(())
            }
            Outcome::Invalid => write!(f, "invalid"),
            Outcome::Crash { message } => write!(f, "CRASH: {message}"),
        }
    }
}

/// payload carried across the unwind for a deliberate, non-local exit.
///
/// not exported: user code reaches this only through [`crate::property`]'s
/// functions, never by constructing it directly.
pub(crate) enum Abort {
    Fail {
        message: String,
        printed: Option<String>,
    },
    Invalid,
}

/// raise an `Abort::Fail`, unwinding to the nearest [`run`] boundary.
pub(crate) fn abort_fail(message: String, printed: Option<String>) -> ! {
    panic::panic_any(Abort::Fail { message, printed })
}

/// raise an `Abort::Invalid`, unwinding to the nearest [`run`] boundary.
pub(crate) fn abort_invalid() -> ! {
    panic::panic_any(Abort::Invalid)
}

/// run a property body, converting its termination mode into an [`Outcome`].
///
/// catches exactly the three non-pass terminations the outcome protocol
/// defines: our own `Abort::Fail`, our own `Abort::Invalid`, and — for
/// anything else that unwound the stack — a synthetic `Crash`. never
/// rethrows: the caller always gets a concrete `Outcome`.
pub fn run(property: impl FnOnce()) -> Outcome {
    // suppress the default panic hook's stderr dump for our own synthetic
    // aborts; a genuine crash still prints normally so the fuzzer's saved
    // log has the real panic location in it. `set_hook` is process-global,
    // not per-thread, so concurrently running properties race on which
    // hook is installed; that only affects what gets printed to stderr
    // during the race, never the `Outcome` this function returns, which is
    // why the crate's own concurrency model (one test per process) avoids
    // the race entirely. the previous hook is kept alive behind an `Arc` so
    // it can be reinstalled afterward instead of being dropped in favor of
    // the default hook.
    let previous_hook: Arc<dyn Fn(&panic::PanicHookInfo<'_>) + Send + Sync> =
        Arc::from(panic::take_hook());
    let hook_for_install = Arc::clone(&previous_hook);
    panic::set_hook(Box::new(move |info| {
        let is_synthetic = info.payload().is::<Abort>();
        if !is_synthetic {
            hook_for_install(info);
        }
    }));

    let result = panic::catch_unwind(AssertUnwindSafe(property));

    panic::set_hook(Box::new(move |info| previous_hook(info)));

    match result {
        Ok(()) => Outcome::Pass,
        Err(payload) => match payload.downcast::<Abort>() {
            Ok(abort) => match *abort {
                Abort::Fail { message, printed } => Outcome::Fail { message, printed },
                Abort::Invalid => Outcome::Invalid,
            },
            Err(payload) => Outcome::Crash {
                message: crash_message(&payload),
            },
        },
    }
}

/// best-effort extraction of a human-readable message from an arbitrary
/// panic payload.
fn crash_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unhandled panic with unrecognized payload".to_string()
    }
}

/// out-of-input while drawing generator arguments maps directly to
/// `Invalid`, never `Fail` and never `Pass` (spec property: truncated
/// input never produces a counterexample).
impl From<OutOfInput> for Outcome {
    fn from(_: OutOfInput) -> Self {
        Outcome::Invalid
    }
}
