use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mlkem_poly_core::invntt::poly_invntt;
use mlkem_poly_core::ntt::poly_ntt;
use mlkem_poly_core::params::{N, Q};

fn sample_poly() -> [i16; N] {
    let mut p = [0i16; N];
    for (i, x) in p.iter_mut().enumerate() {
        *x = (i as i16 * 1103 + 17) % Q;
    }
    p
}

fn bench_ntt(c: &mut Criterion) {
    c.bench_function("poly_ntt", |b| {
        b.iter(|| {
            let mut p = sample_poly();
            poly_ntt(black_box(&mut p));
            black_box(p)
        })
    });
}

fn bench_invntt(c: &mut Criterion) {
    c.bench_function("poly_invntt", |b| {
        b.iter(|| {
            let mut p = sample_poly();
            poly_ntt(&mut p);
            poly_invntt(black_box(&mut p));
            black_box(p)
        })
    });
}

criterion_group!(benches, bench_ntt, bench_invntt);
criterion_main!(benches);
