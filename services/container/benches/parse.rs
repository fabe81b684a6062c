// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::Write;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use cloudfiles_container::StreamingContainerParser;

criterion_group!(benches, bench);
criterion_main!(benches);

fn listing(n: usize) -> String {
    let mut s = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<account name=\"bench\">\n");
    for i in 0..n {
        writeln!(
            s,
            "<container><name>container-{i:06}</name><count>{i}</count><bytes>{}</bytes></container>",
            i * 4096
        )
        .expect("write to string must succeed");
    }
    s.push_str("</account>\n");
    s
}

pub fn bench(c: &mut Criterion) {
    let body = listing(10_000);
    let mut group = c.benchmark_group("streaming_container_parser");
    group.throughput(Throughput::Bytes(body.len() as u64));

    for size in [64usize, 1024, 16 * 1024, body.len()] {
        group.bench_with_input(BenchmarkId::new("chunk", size), &size, |b, &size| {
            b.iter(|| {
                let mut p = StreamingContainerParser::new();
                for chunk in body.as_bytes().chunks(size) {
                    p.feed(chunk).expect("feed must succeed");
                }
                p.finish().expect("finish must succeed");
                assert_eq!(p.containers().len(), 10_000);
            })
        });
    }

    group.finish();
}
