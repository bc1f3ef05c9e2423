// Chebyshev engine benchmarks

use cheb_spectral::Chebyshev;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, Array2};
use std::hint::black_box;

const SIZES: [usize; 4] = [17, 65, 257, 1025];

fn samples(cheb: &Chebyshev) -> Array1<f64> {
    cheb.points().mapv(|x| (3.0 * x).sin() * x.exp())
}

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_ch");
    for &n in &SIZES {
        let cheb = Chebyshev::new(n, -1.0, 1.0).unwrap();
        let v = samples(&cheb);
        let mut ch = Array1::zeros(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| cheb.to_ch(&black_box(v.view()), &mut ch.view_mut()))
        });
    }
    group.finish();
}

fn bench_derivative(c: &mut Criterion) {
    let mut group = c.benchmark_group("der");
    for &n in &SIZES {
        let cheb = Chebyshev::new(n, 0.0, 2.0).unwrap();
        let v = samples(&cheb);
        let mut dv = Array1::zeros(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| cheb.der(&black_box(v.view()), &mut dv.view_mut()))
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for &n in &SIZES {
        let cheb = Chebyshev::new(n, 0.0, 2.0).unwrap();
        let v = samples(&cheb);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let mut w = v.clone();
                cheb.filter(&mut w.view_mut()).map(|_| black_box(w))
            })
        });
    }
    group.finish();
}

fn bench_der_batch(c: &mut Criterion) {
    let cheb = Chebyshev::new(129, -1.0, 1.0).unwrap();
    let v = samples(&cheb);
    let rows = Array2::from_shape_fn((256, 129), |(r, i)| v[i] * (r as f64 + 1.0));

    c.bench_function("der_batch_256x129", |b| {
        b.iter(|| cheb.der_batch(&black_box(rows.view())))
    });
}

criterion_group!(benches, bench_forward, bench_derivative, bench_filter, bench_der_batch);
criterion_main!(benches);
