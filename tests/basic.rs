use rand::Rng;
use timbre::{fft, frame, io, spectrum, utils, window, Signal};

#[test]
fn frame_length_examples() {
    assert_eq!(frame::frame_length(16000, 0.02).unwrap(), 512);
    assert_eq!(frame::frame_length(8000, 0.2).unwrap(), 2048);
    assert_eq!(frame::frame_length(44100, 0.02).unwrap(), 1024);
}

#[test]
fn non_overlapping_frame_count() {
    let l = 256;
    for len in [256usize, 257, 1000, 1024, 4097] {
        let y = vec![0.5f32; len];
        let frames = frame::frame_signal(&y, l, 0.0).unwrap();
        let expected = (len - l).div_ceil(l) + 1;
        assert_eq!(frames.len(), expected, "len {len}");
        assert!(frames.iter().all(|f| f.len() == l));
        // Every input sample appears exactly once
        let total: f32 = frames.iter().flatten().sum();
        assert!((total - 0.5 * len as f32).abs() < 1e-3);
    }
}

#[test]
fn windows_keep_length_and_rectangular_is_identity() {
    let mut rng = rand::thread_rng();
    let frame: Vec<f32> = (0..512).map(|_| rng.gen_range(-1.0f32..1.0)).collect();
    assert_eq!(window::apply_window(&frame, window::WindowType::Rectangular), frame);
    for kind in window::WindowType::ALL {
        assert_eq!(window::apply_window(&frame, kind).len(), frame.len());
    }
}

#[test]
fn fft_agrees_with_rustfft() {
    use num_complex::Complex64;
    use rustfft::FftPlanner;

    let mut rng = rand::thread_rng();
    let x: Vec<Complex64> = (0..256)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();
    let ours = fft::fft(&x).unwrap();

    // The forward transform uses e^{+2πi/n}, which rustfft calls the
    // (unnormalized) inverse direction.
    let mut reference = x.clone();
    FftPlanner::<f64>::new()
        .plan_fft_inverse(x.len())
        .process(&mut reference);

    for (a, b) in ours.iter().zip(&reference) {
        assert!((a - b).norm() < 1e-9);
    }
}

#[test]
fn spectrum_axis_and_shape() {
    let frames = frame::frame_signal(&io::tone(1000.0, 8000, 0.5), 256, 0.5).unwrap();
    let (mag, freqs) = spectrum::spectrum(&frames, 8000).unwrap();
    assert_eq!(mag.shape(), &[129, frames.len()]);
    assert_eq!(freqs.len(), 129);
    assert_eq!(freqs[32], 1000.0);
    let peak = (0..mag.nrows())
        .max_by(|&a, &b| mag[(a, 1)].total_cmp(&mag[(b, 1)]))
        .unwrap();
    assert_eq!(peak, 32);
}

#[test]
fn wav_roundtrip() {
    let sample_rate = 16000u32;
    let mut rng = rand::thread_rng();
    let samples: Vec<f32> = (0..1024).map(|_| rng.gen_range(-0.8f32..0.8f32)).collect();
    let signal = Signal::new(samples, sample_rate).unwrap();

    let path = std::env::temp_dir().join("timbre_roundtrip_test.wav");
    io::save_wav(&path, &signal).unwrap();
    let loaded = io::load_wav(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.sample_rate(), sample_rate);
    assert_eq!(loaded.len(), signal.len());

    // Integer PCM comes back normalized to its peak
    let peak = signal.samples().iter().fold(0.0f32, |m, v| m.max(v.abs()));
    let expected: Vec<f32> = signal.samples().iter().map(|v| v / peak).collect();
    let mse = utils::mse(&expected, loaded.samples());
    assert!(mse < 2e-4, "mse too high: {mse}");
}

#[test]
fn wav_keeps_first_channel() {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let path = std::env::temp_dir().join("timbre_stereo_test.wav");
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for i in 0..100i16 {
        writer.write_sample(i * 100).unwrap();
        writer.write_sample(-20000i16).unwrap();
    }
    writer.finalize().unwrap();

    let loaded = io::load_wav(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.len(), 100);
    assert_eq!(loaded.samples()[0], 0.0);
    assert_eq!(loaded.samples()[99], 1.0);
}
