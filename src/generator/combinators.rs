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

//! composition: building bigger generators out of smaller ones.

use std::cell::RefCell;
use std::rc::Rc;

use super::tuple::{Apply, GenTuple};
use super::{Gen, MAX_LIST_LEN};
use crate::byte_source::ByteSource;
use crate::error::GeneratorBuildError;
use crate::printer::{self, Printer};

/// consumes no bytes; always yields a clone of `v`.
pub fn const_<T: Clone + 'static>(v: T) -> Gen<T> {
    Gen::new(move |_src| Ok(v.clone()))
}

/// runs every generator in `gens` left to right against the shared source,
/// then applies `f` to the tuple of results, positionally.
///
/// `gens` is any of `(Gen<A>,)`, `(Gen<A>, Gen<B>)`, ... up to arity 8 (see
/// [`GenTuple`]); `f`'s arity and argument types must match, enforced
/// entirely at compile time via [`Apply`].
pub fn map<Gens, F>(gens: Gens, f: F) -> Gen<F::Output>
where
    Gens: GenTuple + 'static,
    Gens::Output: 'static,
    F: Apply<Gens::Output> + 'static,
    F::Output: 'static,
{
    Gen::new(move |src| {
        let args = gens.run_all(src)?;
        Ok(f.apply(args))
    })
}

/// reads one byte `b`, then runs `gs[b mod gs.len()]`.
///
/// `gs` must be non-empty; an empty list is a construction-time error, not a
/// runtime outcome.
pub fn choose<T: 'static>(gs: Vec<Gen<T>>) -> Result<Gen<T>, GeneratorBuildError> {
    if gs.is_empty() {
        return Err(GeneratorBuildError::EmptyChoices);
    }
    Ok(Gen::new(move |src| {
        let b = src.read_u8()? as usize;
        let chosen = &gs[b % gs.len()];
        chosen.run(src)
    }))
}

/// reads one selector byte; `0` yields `None` and consumes nothing further,
/// any other value runs `g` and wraps its result in `Some`.
pub fn option<T: 'static>(g: Gen<T>) -> Gen<Option<T>> {
    Gen::new(move |src| {
        let selector = src.read_u8()?;
        if selector == 0 {
            Ok(None)
        } else {
            Ok(Some(g.run(src)?))
        }
    })
}

/// runs `ga` then `gb`, left to right, yielding the pair.
pub fn pair<A: 'static, B: 'static>(ga: Gen<A>, gb: Gen<B>) -> Gen<(A, B)> {
    Gen::new(move |src| {
        let a = ga.run(src)?;
        let b = gb.run(src)?;
        Ok((a, b))
    })
}

/// one selector byte chooses the ok-variant (runs `ga`) or the error-variant
/// (runs `gb`).
pub fn result_of<T: 'static, E: 'static>(ga: Gen<T>, gb: Gen<E>) -> Gen<Result<T, E>> {
    Gen::new(move |src| {
        let selector = src.read_u8()?;
        if selector % 2 == 0 {
            Ok(Ok(ga.run(src)?))
        } else {
            Ok(Err(gb.run(src)?))
        }
    })
}

/// repeatedly reads a continuation byte; while its low bit is 1, runs `g`
/// and appends the result, stopping at the first 0. bounded by
/// [`MAX_LIST_LEN`] regardless of how much buffer remains.
pub fn list<T: 'static>(g: Gen<T>) -> Gen<Vec<T>> {
    Gen::new(move |src| {
        let mut out = Vec::new();
        while out.len() < MAX_LIST_LEN {
            let cont = src.read_u8()?;
            if cont & 1 == 0 {
                break;
            }
            out.push(g.run(src)?);
        }
        Ok(out)
    })
}

/// like [`list`], but guaranteed to produce at least one element before the
/// continuation loop runs.
pub fn list1<T: 'static>(g: Gen<T>) -> Gen<Vec<T>> {
    Gen::new(move |src| {
        let mut out = vec![g.run(src)?];
        while out.len() < MAX_LIST_LEN {
            let cont = src.read_u8()?;
            if cont & 1 == 0 {
                break;
            }
            out.push(g.run(src)?);
        }
        Ok(out)
    })
}

/// runs each generator in `gs` in order, running `sep_g` between every
/// adjacent pair, and concatenates the resulting strings.
pub fn concat_gen_list(sep_g: Gen<String>, gs: Vec<Gen<String>>) -> Gen<String> {
    Gen::new(move |src| {
        let mut out = String::new();
        for (i, g) in gs.iter().enumerate() {
            if i > 0 {
                out.push_str(&sep_g.run(src)?);
            }
            out.push_str(&g.run(src)?);
        }
        Ok(out)
    })
}

/// forces `thunk` on first use, caches the resulting generator, and
/// delegates every subsequent call to the cached generator.
///
/// exists to break construction-time cycles when defining recursive
/// generators: `thunk` can reference a generator that is still being built,
/// as long as it isn't actually invoked until after construction completes.
pub fn unlazy<T: 'static>(thunk: impl Fn() -> Gen<T> + 'static) -> Gen<T> {
    let cached: Rc<RefCell<Option<Gen<T>>>> = Rc::new(RefCell::new(None));
    Gen::new(move |src: &mut ByteSource| {
        let inner = {
            let mut slot = cached.borrow_mut();
            if slot.is_none() {
                *slot = Some(thunk());
            }
            slot.as_ref().unwrap().clone()
        };
        inner.run(src)
    })
}

/// constructs the fixed point of `f`: a generator `g` such that `g` behaves
/// identically to `f(g)`.
///
/// `f` receives a handle to `g` itself before `g` is fully built (two-phase
/// init via a shared cell), so recursive generators can be defined directly
/// instead of going through [`unlazy`].
pub fn fix<T: 'static>(f: impl FnOnce(Gen<T>) -> Gen<T>) -> Gen<T> {
    let slot: Rc<RefCell<Option<Gen<T>>>> = Rc::new(RefCell::new(None));
    let slot_for_self = Rc::clone(&slot);
    let self_ref: Gen<T> = Gen::new(move |src: &mut ByteSource| {
        let inner = slot_for_self
            .borrow()
            .as_ref()
            .expect("fix: generator invoked before construction completed")
            .clone();
        inner.run(src)
    });
    let built = f(self_ref);
    *slot.borrow_mut() = Some(built.clone());
    built
}

/// yields the same values as `g`; attaches `p` as the generator's printer,
/// and registers `p` as the ambient fallback printer for `T` (see
/// [`crate::printer`]).
pub fn with_printer<T: 'static>(p: Printer<T>, g: Gen<T>) -> Gen<T> {
    printer::register(p.clone());
    let mut attached = g;
    attached.printer = Some(p);
    attached
}

/// runs `g` to obtain a value `v`, then runs `k(v)` against the remainder of
/// the source. the monadic bind.
///
/// `k`'s choice of generator depends on a runtime value, which defeats any
/// static analysis of the generator tree (size estimation, shrinfo,
/// whatever the fuzzer side wants to precompute). prefer `map` wherever the
/// shape of the downstream generator doesn't actually depend on `v`.
pub fn dynamic_bind<T: 'static, U: 'static>(
    g: Gen<T>,
    k: impl Fn(T) -> Gen<U> + 'static,
) -> Gen<U> {
    Gen::new(move |src| {
        let v = g.run(src)?;
        k(v).run(src)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::primitives::{bool_, uint8};

    #[test]
    fn const_consumes_no_bytes() {
        let mut src = ByteSource::new(&[]);
        assert_eq!(const_(42).run(&mut src).unwrap(), 42);
    }

    #[test]
    fn map_applies_left_to_right() {
        let g = map((uint8(), uint8()), |a: u8, b: u8| a as u32 + b as u32);
        let mut src = ByteSource::new(&[0x03, 0x04]);
        assert_eq!(g.run(&mut src).unwrap(), 7);
    }

    #[test]
    fn choose_rejects_empty() {
        assert_eq!(
            choose::<u8>(Vec::new()).unwrap_err(),
            GeneratorBuildError::EmptyChoices
        );
    }

    #[test]
    fn choose_picks_by_modulus() {
        let g = choose(vec![const_(10u8), const_(20u8), const_(30u8)]).unwrap();
        let mut src = ByteSource::new(&[4]); // 4 % 3 == 1
        assert_eq!(g.run(&mut src).unwrap(), 20);
    }

    #[test]
    fn option_zero_selector_is_none() {
        let g = option(uint8());
        let mut src = ByteSource::new(&[0x00]);
        assert_eq!(g.run(&mut src).unwrap(), None);
    }

    #[test]
    fn option_nonzero_selector_runs_inner() {
        let g = option(uint8());
        let mut src = ByteSource::new(&[0x01, 0x2a]);
        assert_eq!(g.run(&mut src).unwrap(), Some(0x2a));
    }

    #[test]
    fn list_stops_on_low_bit_zero() {
        let g = list(uint8());
        let mut src = ByteSource::new(&[0x01, 0xAA, 0x01, 0xBB, 0x00]);
        assert_eq!(g.run(&mut src).unwrap(), vec![0xAA, 0xBB]);
        assert_eq!(src.remaining(), 0);
    }

    #[test]
    fn list_can_be_empty() {
        let g = list(uint8());
        let mut src = ByteSource::new(&[0x00]);
        assert_eq!(g.run(&mut src).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn list1_always_has_one_element() {
        let g = list1(uint8());
        let mut src = ByteSource::new(&[0xAA, 0x00]);
        assert_eq!(g.run(&mut src).unwrap(), vec![0xAA]);
    }

    #[test]
    fn pair_runs_in_order() {
        let g = pair(uint8(), bool_());
        let mut src = ByteSource::new(&[0x05, 0x01]);
        assert_eq!(g.run(&mut src).unwrap(), (5u8, true));
    }

    #[test]
    fn unlazy_forces_once_and_caches() {
        use std::cell::Cell;
        let calls = Rc::new(Cell::new(0));
        let calls_clone = Rc::clone(&calls);
        let g = unlazy(move || {
            calls_clone.set(calls_clone.get() + 1);
            uint8()
        });
        let mut src = ByteSource::new(&[1, 2, 3]);
        g.run(&mut src).unwrap();
        g.run(&mut src).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn fix_terminates_on_finite_input() {
        // a generator for a run-length-limited list of bytes, defined via
        // its own fixed point instead of `list`.
        let g: Gen<Vec<u8>> = fix(|self_ref| {
            map((uint8(), option(self_ref)), |head: u8, tail: Option<Vec<u8>>| {
                let mut v = vec![head];
                if let Some(rest) = tail {
                    v.extend(rest);
                }
                v
            })
        });
        let mut src = ByteSource::new(&[0xAA, 0x00]);
        assert_eq!(g.run(&mut src).unwrap(), vec![0xAA]);
    }

    #[test]
    fn dynamic_bind_chooses_downstream_generator_from_value() {
        let g = dynamic_bind(uint8(), |n| {
            if n % 2 == 0 {
                const_("even".to_string())
            } else {
                const_("odd".to_string())
            }
        });
        let mut src = ByteSource::new(&[3]);
        assert_eq!(g.run(&mut src).unwrap(), "odd");
    }
}
