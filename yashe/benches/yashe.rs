use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use yashe::{Ciphertext, ParametersLiteral, Yashe};

fn instance(log_n: usize) -> Yashe {
    let literal: ParametersLiteral = ParametersLiteral {
        log_n,
        ..ParametersLiteral::default()
    };
    Yashe::with_seed(&literal, [0u8; 32]).unwrap()
}

fn encrypt_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("yashe");
    for log_n in [5, 8, 10] {
        let mut yashe: Yashe = instance(log_n);
        let ct: Ciphertext = yashe.encrypt_integer(42).unwrap();
        group.bench_with_input(BenchmarkId::new("encrypt", 1 << log_n), &(), |b, _| {
            b.iter(|| yashe.encrypt_integer(42).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decrypt", 1 << log_n), &(), |b, _| {
            b.iter(|| yashe.decrypt_integer(&ct).unwrap())
        });
    }
}

fn homomorphic(c: &mut Criterion) {
    let mut group = c.benchmark_group("yashe");
    for log_n in [5, 8] {
        let mut yashe: Yashe = instance(log_n);
        let a: Ciphertext = yashe.encrypt_integer(42).unwrap();
        let b: Ciphertext = yashe.encrypt_integer(13).unwrap();
        group.bench_with_input(BenchmarkId::new("add", 1 << log_n), &(), |bench, _| {
            bench.iter(|| yashe.add(&a, &b).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("mul", 1 << log_n), &(), |bench, _| {
            bench.iter(|| yashe.mul(&a, &b).unwrap())
        });
    }
}

criterion_group!(benches, encrypt_decrypt, homomorphic);
criterion_main!(benches);
