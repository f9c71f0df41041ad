//! Benchmarks for structural transforms.
//!
//! Reshape only copies the leaf buffer, while transpose, permute and slicing
//! gather leaves in a new order.
//!
//! Run with:
//! ```bash
//! cargo bench --bench reshape_transpose
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use varplus_core::{AxisSlice, NdArray, Value};

fn counting(shape: &[usize]) -> NdArray {
    let total: usize = shape.iter().product();
    NdArray::from_flat((0..total as i64).map(Value::Int).collect(), shape).unwrap()
}

fn bench_reshape(c: &mut Criterion) {
    let mut group = c.benchmark_group("reshape");

    let test_cases = vec![
        ("2d_to_1d", vec![300, 300], vec![90_000]),
        ("1d_to_3d", vec![27_000], vec![30, 30, 30]),
        ("3d_to_2d", vec![30, 30, 30], vec![900, 30]),
    ];

    for (name, from_shape, to_shape) in test_cases {
        let table = counting(&from_shape);
        group.throughput(Throughput::Elements(table.size() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(&table, &to_shape),
            |b, (table, to_shape)| {
                b.iter(|| black_box(table.reshape(black_box(to_shape)).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");

    for size in [32, 128, 512] {
        let table = counting(&[size, size]);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(table.transpose().unwrap()));
        });
    }

    group.finish();
}

fn bench_permute(c: &mut Criterion) {
    let mut group = c.benchmark_group("permute");

    let test_cases = vec![
        ("3d_cycle", vec![40, 40, 40], vec![2, 0, 1]),
        ("3d_reverse", vec![40, 40, 40], vec![2, 1, 0]),
        ("4d_swap_01", vec![16, 16, 16, 16], vec![1, 0, 2, 3]),
    ];

    for (name, shape, perm) in test_cases {
        let table = counting(&shape);
        group.throughput(Throughput::Elements(table.size() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(&table, &perm),
            |b, (table, perm)| {
                b.iter(|| black_box(table.permute(black_box(perm)).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let table = counting(&[200, 200]);
    let spec = [AxisSlice::stepped(10, 190, 2), AxisSlice::range(50, 150)];
    c.bench_function("slice_strided_200x200", |b| {
        b.iter(|| black_box(table.slice(black_box(&spec)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_reshape,
    bench_transpose,
    bench_permute,
    bench_slice
);
criterion_main!(benches);
