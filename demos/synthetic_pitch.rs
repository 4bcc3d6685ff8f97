//! Synthetic Pitch Tracking Example
//!
//! This example compares the three F0 estimators on signals with a known
//! fundamental:
//! - a pulse train (flat harmonic spectrum)
//! - a pure tone
//! - a tone with a few harmonics

use log::info;
use timbre::analysis::{f0_track, AnalysisConfig, PitchMethod};
use timbre::io;

fn harmonic_tone(f0: f32, sr: u32, duration: f32) -> Vec<f32> {
    let mut y = vec![0.0f32; (duration * sr as f32) as usize];
    for (k, amp) in [(1.0f32, 1.0f32), (2.0, 0.5), (3.0, 0.25), (4.0, 0.125)] {
        for (sample, t) in y.iter_mut().zip(io::tone(f0 * k, sr, duration)) {
            *sample += amp * t / 1.875;
        }
    }
    y
}

fn main() {
    env_logger::init();
    info!("Synthetic Pitch Tracking Example");

    let sr = 16000;
    let config = AnalysisConfig::pitch();
    let signals = [
        ("pulse train, 250 Hz", io::pulse_train(64, sr as usize)),
        ("pure tone, 180 Hz", io::tone(180.0, sr, 1.0)),
        ("harmonic tone, 120 Hz", harmonic_tone(120.0, sr, 1.0)),
    ];

    for (name, y) in &signals {
        info!("{name}");
        for method in [
            PitchMethod::Cepstral,
            PitchMethod::Amdf,
            PitchMethod::Autocorrelation,
        ] {
            let track = f0_track(y, sr, &config, method).unwrap();
            info!(
                "  {:<16} mean {:7.1} Hz  std {:6.1} Hz  ({} frames)",
                method.to_string(),
                track.mean(),
                track.std_dev(),
                track.len()
            );
        }
    }
}
