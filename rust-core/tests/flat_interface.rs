#![cfg(feature = "cqt")]

use std::f32::consts::PI;

use wavefft::{boundary, SpectralEngine};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn magnitude(re: f32, im: f32) -> f32 {
    (re * re + im * im).sqrt()
}

#[test]
fn impulse_transforms_to_flat_spectrum() {
    init_logging();
    let mut engine = SpectralEngine::new();
    assert!(boundary::initialize_transform(&mut engine, 8));

    let mut real = vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let mut imag = vec![0.0; 8];
    assert!(boundary::forward_transform(&engine, Some(&mut real), Some(&mut imag), 8));
    assert!(real.iter().all(|&x| (x - 1.0).abs() < 1e-6));
    assert!(imag.iter().all(|&x| x.abs() < 1e-6));

    assert!(boundary::inverse_transform(&engine, Some(&mut real), Some(&mut imag), 8));
    assert!((real[0] - 1.0).abs() < 1e-6);
    assert!(real[1..].iter().all(|&x| x.abs() < 1e-6));
}

#[test]
fn longer_buffers_use_only_the_first_n_values() {
    init_logging();
    let mut engine = SpectralEngine::new();
    assert!(boundary::initialize_transform(&mut engine, 4));

    let mut real = vec![1.0, 1.0, 1.0, 1.0, 7.0, 7.0];
    let mut imag = vec![0.0; 6];
    assert!(boundary::forward_transform(&engine, Some(&mut real), Some(&mut imag), 4));
    assert!((real[0] - 4.0).abs() < 1e-6);
    assert_eq!(&real[4..], &[7.0, 7.0]);
}

#[test]
fn semitone_bank_below_nyquist() {
    init_logging();
    let mut engine = SpectralEngine::new();
    assert!(boundary::initialize_transform(&mut engine, 1024));
    assert!(boundary::build_kernels(&mut engine, 12, 1, 1024, 44100.0, 55.0));

    let bank = engine.kernels().unwrap();
    assert_eq!(bank.bins(), 12);
    assert_eq!(bank.size(), 1024);
    for bin in 0..12 {
        let (re, im) = bank.kernel(bin);
        let energy: f32 = re.iter().zip(im.iter()).map(|(a, b)| a * a + b * b).sum();
        assert!(energy > 0.0, "bin {} is silent", bin);
    }
}

#[test]
fn tone_peaks_in_matching_bin() {
    init_logging();
    let n = 1024;
    let sample_rate = 8000.0;
    let mut engine = SpectralEngine::new();
    assert!(boundary::initialize_transform(&mut engine, n as i32));
    assert!(boundary::build_kernels(&mut engine, 12, 6, n as i32, sample_rate, 250.0));

    let mut real: Vec<f32> = (0..n)
        .map(|i| (2.0 * PI * 1000.0 * i as f32 / sample_rate).cos())
        .collect();
    let mut imag = vec![0.0; n];
    assert!(boundary::forward_transform(&engine, Some(&mut real), Some(&mut imag), n as i32));

    let mut out_re = vec![0.0; 72];
    let mut out_im = vec![0.0; 72];
    assert!(boundary::evaluate_cqt(
        &engine,
        Some(&real),
        Some(&imag),
        Some(&mut out_re),
        Some(&mut out_im),
        n as i32,
        12,
        6
    ));

    let peak = (0..72)
        .max_by(|&a, &b| {
            magnitude(out_re[a], out_im[a])
                .partial_cmp(&magnitude(out_re[b], out_im[b]))
                .unwrap()
        })
        .unwrap();
    assert_eq!(peak, 24);

    // Bins above 4000 Hz (Nyquist) are silent
    for bin in 49..72 {
        assert_eq!(out_re[bin], 0.0);
        assert_eq!(out_im[bin], 0.0);
    }
}

#[test]
fn kernel_cache_keeps_first_parameters() {
    init_logging();
    let mut engine = SpectralEngine::new();
    assert!(boundary::initialize_transform(&mut engine, 512));
    assert!(boundary::build_kernels(&mut engine, 12, 1, 512, 44100.0, 55.0));
    assert!(boundary::build_kernels(&mut engine, 12, 1, 512, 8000.0, 200.0));

    let config = engine.kernels().unwrap().config();
    assert_eq!(config.sample_rate, 44100.0);
    assert_eq!(config.min_freq, 55.0);
}

#[test]
fn evaluation_of_fewer_bins_than_built() {
    init_logging();
    let mut engine = SpectralEngine::new();
    assert!(boundary::initialize_transform(&mut engine, 256));
    assert!(boundary::build_kernels(&mut engine, 12, 2, 256, 8000.0, 100.0));

    let input = vec![0.5; 256];
    let mut out_re = vec![0.0; 12];
    let mut out_im = vec![0.0; 12];
    assert!(boundary::evaluate_cqt(
        &engine,
        Some(&input),
        Some(&input),
        Some(&mut out_re),
        Some(&mut out_im),
        256,
        12,
        1
    ));
    assert!(!boundary::evaluate_cqt(
        &engine,
        Some(&input),
        Some(&input),
        Some(&mut out_re),
        Some(&mut out_im),
        256,
        12,
        3
    ));
}
