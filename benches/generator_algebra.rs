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

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fuzzforge::byte_source::ByteSource;
use fuzzforge::generator::{int, list, map, pair, range, uint8};

fn bench_primitive_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_decode");
    let buf = [0x2au8; 16];

    group.bench_function("uint8", |b| {
        let g = uint8();
        b.iter(|| {
            let mut src = ByteSource::new(&buf);
            black_box(g.run(&mut src).unwrap())
        });
    });

    group.bench_function("int", |b| {
        let g = int();
        b.iter(|| {
            let mut src = ByteSource::new(&buf);
            black_box(g.run(&mut src).unwrap())
        });
    });

    group.bench_function("range", |b| {
        let g = range(0, 1000).unwrap();
        b.iter(|| {
            let mut src = ByteSource::new(&buf);
            black_box(g.run(&mut src).unwrap())
        });
    });

    group.finish();
}

fn bench_list_by_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_by_length");

    for len in [0usize, 10, 100, 1000] {
        let mut buf = Vec::with_capacity(len * 2 + 1);
        for _ in 0..len {
            buf.push(1u8); // continue
            buf.push(0xAA); // element
        }
        buf.push(0); // stop

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &buf, |b, buf| {
            let g = list(uint8());
            b.iter(|| {
                let mut src = ByteSource::new(buf);
                black_box(g.run(&mut src).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_composed_tuple(c: &mut Criterion) {
    let mut group = c.benchmark_group("composed_tuple");

    let buf = [0u8; 64];
    group.bench_function("pair_of_int_and_list", |b| {
        let g = pair(int(), list(uint8()));
        b.iter(|| {
            let mut src = ByteSource::new(&buf);
            black_box(g.run(&mut src).unwrap())
        });
    });

    group.bench_function("map_three_primitives", |b| {
        let g = map((uint8(), uint8(), uint8()), |a: u8, b: u8, c: u8| {
            (a, b, c)
        });
        b.iter(|| {
            let mut src = ByteSource::new(&buf);
            black_box(g.run(&mut src).unwrap())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_primitive_decode,
    bench_list_by_length,
    bench_composed_tuple
);
criterion_main!(benches);
