//! WAV Analysis Example
//!
//! Loads a WAV file (first argument) or, without one, a synthetic vowel-like
//! signal, and prints every feature track the crate computes.
//!
//! ```text
//! RUST_LOG=info cargo run --example analyze_wav -- speech.wav
//! ```

use log::info;
use timbre::analysis::{
    f0_track, spectral_features, spectrogram_db, AnalysisConfig, PitchMethod,
};
use timbre::feature::basic;
use timbre::segment::{segment_voice_activity, SegmentationConfig};
use timbre::{io, Signal};

fn main() {
    env_logger::init();
    info!("WAV Analysis Example");

    let signal = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading {path}");
            io::load_wav(&path).unwrap()
        }
        None => {
            info!("No file given, using a synthetic 220 Hz pulse train");
            let mut y: Vec<f32> = io::pulse_train(73, 32000);
            y.extend(vec![0.0; 8000]);
            Signal::new(y, 16000).unwrap()
        }
    };
    let sr = signal.sample_rate();
    let y = signal.samples();
    info!(
        "{} samples at {sr} Hz ({:.2} s)",
        signal.len(),
        signal.duration().as_secs_f32()
    );

    // Time domain
    info!("Time domain");
    info!("  RMS: {:.4}", basic::rms(y));
    info!("  Short-time energy: {:.6}", basic::short_time_energy(y));
    info!("  Zero-crossing rate: {:.4}", basic::zero_crossing_rate(y));

    // Spectrogram
    let config = AnalysisConfig::default();
    let spec = spectrogram_db(y, sr, &config).unwrap();
    info!(
        "Spectrogram up to {} Hz: {} bins x {} frames",
        config.max_frequency,
        spec.nrows(),
        spec.ncols()
    );

    // Spectral features
    let features = spectral_features(y, sr, &config).unwrap();
    info!("Spectral features ({} frames)", features.volume.len());
    info!("  Volume: mean {:.4}", features.volume.mean());
    info!("  Centroid: mean {:.1} Hz", features.centroid.mean());
    info!(
        "  Effective bandwidth: mean {:.1} Hz, std {:.1} Hz",
        features.bandwidth.mean(),
        features.bandwidth.std_dev()
    );
    for band in &features.bands {
        let mean = |v: &[f32]| v.iter().sum::<f32>() / v.len().max(1) as f32;
        info!(
            "  Band {:.0}-{:.0} Hz: BER {:.3}  SFM {:.3}  SCF {:.1}",
            band.band.low_hz,
            band.band.high_hz,
            mean(&band.energy_ratio),
            mean(&band.flatness),
            mean(&band.crest)
        );
    }

    // Pitch
    let pitch_config = AnalysisConfig::pitch();
    for method in [PitchMethod::Cepstral, PitchMethod::Amdf] {
        let track = f0_track(y, sr, &pitch_config, method).unwrap();
        info!("F0 ({method}): mean {:.1} Hz over {} frames", track.mean(), track.len());
    }

    // Segmentation
    let activity = segment_voice_activity(y, &SegmentationConfig::default()).unwrap();
    info!(
        "Voice activity: silence ratio {:.2}, {} voiced / {} unvoiced / {} silent parts",
        activity.silence_ratio,
        activity.voiced.len(),
        activity.unvoiced.len(),
        activity.silent.len()
    );
}
