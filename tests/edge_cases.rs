//! Edge case tests for boundary conditions and unusual inputs.
//!
//! Tests cover:
//! - Empty and single-sample input
//! - Degenerate (silent) frames
//! - Parameter validation

use timbre::analysis::{f0_track, spectral_features, AnalysisConfig, PitchMethod};
use timbre::feature::{basic, spectral};
use timbre::segment::{segment_voice_activity, SegmentationConfig};
use timbre::{fft, frame, pitch, spectrum, Error};

// Empty input

#[test]
fn empty_signal_framing() {
    assert!(frame::frame_signal(&[], 512, 0.5).unwrap().is_empty());
}

#[test]
fn empty_signal_pipelines() {
    let config = AnalysisConfig::default();
    assert!(matches!(
        spectral_features(&[], 16000, &config),
        Err(Error::EmptyAudio)
    ));
    assert!(matches!(
        f0_track(&[], 16000, &config, PitchMethod::Amdf),
        Err(Error::EmptyAudio)
    ));
    assert!(matches!(
        segment_voice_activity(&[], &SegmentationConfig::default()),
        Err(Error::EmptyAudio)
    ));
}

#[test]
fn empty_frame_features() {
    assert_eq!(basic::zero_crossing_rate(&[]), 0.0);
    assert_eq!(basic::rms(&[]), 0.0);
    assert_eq!(spectral::volume(&[]), 0.0);
    assert_eq!(spectral::spectral_centroid(&[], &[]).unwrap(), 0.0);
}

// Single sample

#[test]
fn single_sample() {
    assert_eq!(frame::frame_signal(&[0.5], 4, 0.0).unwrap(), vec![vec![0.5, 0.0, 0.0, 0.0]]);
    assert_eq!(basic::zero_crossing_rate(&[0.5]), 0.0);
    assert_eq!(pitch::amdf(&[0.5]).unwrap(), vec![0.0]);
    let y = fft::fft(&[num_complex::Complex64::new(0.5, 0.0)]).unwrap();
    assert_eq!(y[0].re, 0.5);
}

#[test]
fn single_sample_pipeline() {
    let features = spectral_features(&[0.25], 16000, &AnalysisConfig::default()).unwrap();
    assert_eq!(features.volume.len(), 1);
}

// Silent frames fall back to sentinels

#[test]
fn silent_frames_yield_zero_features() {
    let silence = vec![0.0f32; 32000];
    let features = spectral_features(&silence, 16000, &AnalysisConfig::default()).unwrap();
    assert!(features.volume.values.iter().all(|&v| v == 0.0));
    assert!(features.centroid.values.iter().all(|&v| v == 0.0));
    assert!(features.bandwidth.values.iter().all(|&v| v == 0.0));
    for band in &features.bands {
        assert!(band.energy_ratio.iter().all(|&v| v == 0.0));
        assert!(band.flatness.iter().all(|&v| v == 0.0));
        assert!(band.crest.iter().all(|&v| v == 0.0));
    }
}

#[test]
fn silent_frame_amdf_falls_back() {
    assert_eq!(pitch::f0_amdf(&[0.0; 256], 8000).unwrap(), 8000.0);
}

#[test]
fn silent_frame_cepstrum_is_finite() {
    let c = pitch::real_cepstrum(&[0.0; 256]).unwrap();
    assert!(c.iter().all(|v| v.is_finite()));
}

// Parameter validation

#[test]
fn invalid_parameters_fail_fast() {
    assert!(frame::frame_length(0, 0.02).is_err());
    assert!(frame::frame_signal(&[0.0; 64], 16, 1.0).is_err());
    assert!("gaussian".parse::<timbre::window::WindowType>().is_err());
    assert!(fft::fft(&vec![num_complex::Complex64::new(0.0, 0.0); 6]).is_err());
    assert!(spectrum::Band::new(500.0, 100.0).is_err());
    assert!(matches!(
        segment_voice_activity(&[0.1; 64], &SegmentationConfig::default().with_n_frames(0)),
        Err(Error::InvalidParameter { .. })
    ));
    let bad_overlap = AnalysisConfig::default().with_overlap(1.5);
    assert!(spectral_features(&[0.1; 64], 16000, &bad_overlap).is_err());
}

#[test]
fn non_finite_audio_rejected() {
    let y = vec![0.0, f32::NAN, 0.0];
    assert!(matches!(
        spectral_features(&y, 16000, &AnalysisConfig::default()),
        Err(Error::NonFiniteAudio)
    ));
}
