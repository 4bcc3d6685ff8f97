use rand::Rng;
use timbre::analysis::{spectral_features, AnalysisConfig};
use timbre::feature::{basic, spectral};
use timbre::spectrum::{self, Band, TELEPHONY_BANDS};
use timbre::{frame, io, window};

fn white_noise(n: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-0.5f32..0.5)).collect()
}

fn magnitude_frames(y: &[f32], sr: u32, frame_length: usize) -> (ndarray::Array2<f32>, Vec<f32>) {
    let frames = frame::frame_signal(y, frame_length, 0.5).unwrap();
    let frames = window::apply_window_frames(&frames, window::WindowType::Hamming);
    spectrum::spectrum(&frames, sr).unwrap()
}

#[test]
fn zcr_alternating_sign() {
    for len in [2usize, 10, 101, 1024] {
        let y: Vec<f32> = (0..len).map(|i| if i % 2 == 0 { 0.3 } else { -0.3 }).collect();
        let expected = (len - 1) as f32 / (2 * len) as f32;
        assert!((basic::zero_crossing_rate(&y) - expected).abs() < 1e-7);
    }
}

#[test]
fn noise_is_flatter_than_a_tone() {
    let sr = 16000;
    let (noise, _) = magnitude_frames(&white_noise(8192), sr, 1024);
    let (tone, _) = magnitude_frames(&io::tone(1000.0, sr, 0.5), sr, 1024);
    let band = Band::new(0.0, 8000.0).unwrap();

    let noise_sfm = spectral::spectral_flatness_frames(&noise, band, sr)[2];
    let tone_sfm = spectral::spectral_flatness_frames(&tone, band, sr)[2];
    assert!(noise_sfm > 0.3, "noise sfm {noise_sfm}");
    assert!(tone_sfm < 0.05, "tone sfm {tone_sfm}");

    let noise_scf = spectral::spectral_crest_frames(&noise, band, sr)[2];
    let tone_scf = spectral::spectral_crest_frames(&tone, band, sr)[2];
    assert!(tone_scf > 10.0 * noise_scf, "scf {tone_scf} vs {noise_scf}");
}

#[test]
fn centroid_follows_tone_frequency() {
    let sr = 16000;
    for freq in [500.0f32, 1500.0, 3000.0] {
        let (mag, freqs) = magnitude_frames(&io::tone(freq, sr, 0.5), sr, 1024);
        let centroid = spectral::spectral_centroid_frames(&mag, &freqs).unwrap()[2];
        assert!((centroid - freq).abs() < 0.05 * freq, "{centroid} vs {freq}");
        let bandwidth = spectral::effective_bandwidth_frames(&mag, &freqs).unwrap()[2];
        assert!(bandwidth < 0.2 * freq, "bandwidth {bandwidth}");
    }
}

#[test]
fn band_energy_ratios_sum_to_at_most_one() {
    let sr = 16000;
    let (mag, _) = magnitude_frames(&white_noise(8192), sr, 1024);
    for t in 0..mag.ncols() {
        let total: f32 = TELEPHONY_BANDS
            .iter()
            .map(|&b| spectral::band_energy_ratio_frames(&mag, b, sr)[t])
            .sum();
        assert!(total <= 1.0 + 1e-5);
        assert!(total > 0.3);
    }
}

#[test]
fn volume_tracks_loudness() {
    let quiet: Vec<f32> = io::tone(440.0, 16000, 1.0).iter().map(|v| v * 0.1).collect();
    let loud = io::tone(440.0, 16000, 1.0);
    let config = AnalysisConfig::default();
    let q = spectral_features(&quiet, 16000, &config).unwrap();
    let l = spectral_features(&loud, 16000, &config).unwrap();
    let ratio = l.volume.mean() / q.volume.mean();
    assert!((ratio - 100.0).abs() < 1.0, "ratio {ratio}");
}

#[test]
fn bandwidth_std_of_stationary_tone_is_small() {
    // 1 kHz sits exactly on a bin of the 4096-point frames and every hop
    // starts on a whole period, so all full frames see the same spectrum
    let y = io::tone(1000.0, 16000, 2.0);
    let features = spectral_features(&y, 16000, &AnalysisConfig::default()).unwrap();
    let series = timbre::analysis::FeatureSeries {
        // Drop the zero-padded tail frames
        values: features.bandwidth.values[..features.bandwidth.len() - 2].to_vec(),
        times: Vec::new(),
    };
    assert!(series.std_dev() < 5.0, "std {}", series.std_dev());
}
