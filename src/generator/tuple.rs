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

//! static arity for `map`: a tuple of generators to a tuple of values, and
//! a plain closure of matching arity to apply to that tuple.
//!
//! the original interface relies on higher-rank encoding to let `map`
//! accept a heterogeneous list of generators matched against a property
//! function's arity. here we pick the "builder that accumulates typed
//! generators" option: `(Gen<A>, Gen<B>, ...)` is itself the builder, and
//! `GenTuple`/`Apply` are implemented for tuples up to arity 8 by macro so
//! every arity gets real static type checking, with no derive and no
//! runtime arity check.

use super::Gen;
use crate::byte_source::{ByteSource, GenResult};

/// a fixed-size heterogeneous list of generators whose values are drawn,
/// left to right, into a single tuple.
pub trait GenTuple {
    /// the tuple of values this list of generators produces.
    type Output;

    /// run every generator in order against the same source, left to right.
    fn run_all(&self, source: &mut ByteSource) -> GenResult<Self::Output>;
}

/// a function invocable with the positional arguments drawn from a
/// [`GenTuple`]'s output, rather than with that output packed into a tuple.
pub trait Apply<Args> {
    type Output;
    fn apply(&self, args: Args) -> Self::Output;
}

macro_rules! impl_gen_tuple {
    ($($idx:tt => $t:ident),+) => {
        impl<$($t: 'static),+> GenTuple for ($(Gen<$t>,)+) {
            type Output = ($($t,)+);

            fn run_all(&self, source: &mut ByteSource) -> GenResult<Self::Output> {
                Ok(($(self.$idx.run(source)?,)+))
            }
        }

        impl<Func, R, $($t),+> Apply<($($t,)+)> for Func
        where
            Func: Fn($($t),+) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn apply(&self, args: ($($t,)+)) -> R {
                let ($($t,)+) = args;
                self($($t),+)
            }
        }
    };
}

impl_gen_tuple!(0 => A);
impl_gen_tuple!(0 => A, 1 => B);
impl_gen_tuple!(0 => A, 1 => B, 2 => C);
impl_gen_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
impl_gen_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_gen_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
impl_gen_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
impl_gen_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);
