use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wavefft::{CqtConfig, SpectralEngine};

fn signal(n: usize) -> (Vec<f32>, Vec<f32>) {
    let real = (0..n).map(|i| (i as f32 * 0.1).sin()).collect();
    (real, vec![0.0; n])
}

fn bench_forward(c: &mut Criterion) {
    let mut g = c.benchmark_group("forward");
    for &size in &[256usize, 1024, 4096] {
        let mut engine = SpectralEngine::new();
        engine.initialize_transform(size).unwrap();
        let (real, imag) = signal(size);

        g.bench_with_input(BenchmarkId::new("radix2", size), &size, |b, _| {
            b.iter(|| {
                let mut re = real.clone();
                let mut im = imag.clone();
                engine.forward_transform(&mut re, &mut im).unwrap();
                black_box((re, im))
            });
        });
    }
    g.finish();
}

fn bench_inverse(c: &mut Criterion) {
    let mut engine = SpectralEngine::new();
    engine.initialize_transform(1024).unwrap();
    let (real, imag) = signal(1024);

    c.bench_function("inverse_1024", |b| {
        b.iter(|| {
            let mut re = real.clone();
            let mut im = imag.clone();
            engine.inverse_transform(&mut re, &mut im).unwrap();
            black_box((re, im))
        });
    });
}

fn bench_cqt(c: &mut Criterion) {
    let config = CqtConfig::new(44100.0).with_min_freq(55.0).with_octaves(7);
    let mut engine = SpectralEngine::new();
    engine.initialize_transform(4096).unwrap();

    c.bench_function("build_kernels_4096_84", |b| {
        b.iter(|| {
            engine.release_kernels();
            engine.build_kernels(&config, 4096).unwrap();
        });
    });

    let (mut real, mut imag) = signal(4096);
    engine.forward_transform(&mut real, &mut imag).unwrap();
    let bins = config.total_bins();
    let mut out_re = vec![0.0; bins];
    let mut out_im = vec![0.0; bins];

    c.bench_function("evaluate_cqt_4096_84", |b| {
        b.iter(|| {
            engine
                .evaluate_cqt(&real, &imag, &mut out_re, &mut out_im, 12, 7)
                .unwrap();
            black_box(&out_re);
        });
    });
}

criterion_group!(benches, bench_forward, bench_inverse, bench_cqt);
criterion_main!(benches);
