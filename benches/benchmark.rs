use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use crt_scanf::family;
use crt_scanf::{Arg, sscanf};

fn sscanf_benchmark(c: &mut Criterion) {
    let input = black_box("Candy -> 2.75");
    c.bench_function("sscanf string & f64", |b| {
        b.iter(|| {
            let mut product = [0u8; 16];
            let mut price = 0f64;
            sscanf!(input, "%15s -> %lf", &mut product, &mut price);
            black_box(product);
            black_box(price);
        })
    });

    c.bench_function("sscanf integers", |b| {
        b.iter(|| {
            let (mut hex, mut detected, mut count) = (0u32, 0i64, 0i32);
            let assigned = family::sscanf(
                black_box(b"0xdeadbeef -017 tail"),
                b"%x %lli%n",
                [Arg::from(&mut hex), Arg::from(&mut detected), Arg::from(&mut count)],
            );
            black_box((assigned, hex, detected, count));
        })
    });
}

fn swscanf_benchmark(c: &mut Criterion) {
    let input: Vec<u16> = "Candy -> 2.75".encode_utf16().collect();
    let format: Vec<u16> = "%[^ ] -> %f".encode_utf16().collect();
    c.bench_function("swscanf class & f32", |b| {
        b.iter(|| {
            let mut product = [0u16; 16];
            let mut price = 0f32;
            let assigned = family::swscanf(
                black_box(&input),
                &format,
                [Arg::from(&mut product), Arg::from(&mut price)],
            );
            black_box((assigned, product, price));
        })
    });
}

criterion_group!(benches, sscanf_benchmark, swscanf_benchmark);
criterion_main!(benches);
