use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use math::modulus::prime::{NTTFriendlyPrimesGenerator, Prime};
use math::poly::Poly;
use math::ring::Ring;

fn ring(log_n: usize) -> Ring<u64> {
    let n: usize = 1 << log_n;
    let prime: Prime<u64> = NTTFriendlyPrimesGenerator::new(60, 2 * n as u64)
        .next_upstream_prime()
        .unwrap();
    Ring::new(n, prime).unwrap()
}

fn ntt(c: &mut Criterion) {
    fn runner<'a, const FORWARD: bool, const LAZY: bool>(ring: &'a Ring<u64>) -> Box<dyn FnMut() + 'a> {
        let mut a: Poly<u64> = ring.new_poly();
        for i in 0..a.n() {
            a.0[i] = i as u64;
        }
        if FORWARD {
            Box::new(move || ring.ntt_inplace::<LAZY>(&mut a))
        } else {
            Box::new(move || ring.intt_inplace::<LAZY>(&mut a))
        }
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> = c.benchmark_group("ntt");

    for log_n in 6..14 {
        let ring: Ring<u64> = ring(log_n);

        let runners: [(&str, Box<dyn FnMut()>); 4] = [
            ("forward/lazy=true", runner::<true, true>(&ring)),
            ("forward/lazy=false", runner::<true, false>(&ring)),
            ("backward/lazy=true", runner::<false, true>(&ring)),
            ("backward/lazy=false", runner::<false, false>(&ring)),
        ];

        for (name, mut runner) in runners {
            let id: BenchmarkId = BenchmarkId::new(name, format!("n={}", 1 << log_n));
            b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| b.iter(&mut runner));
        }
    }
}

criterion_group!(benches, ntt);
criterion_main!(benches);
