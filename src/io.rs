//! WAV loading and synthetic test signals.

use crate::signal::Signal;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("hound error: {0}")]
    Hound(#[from] hound::Error),
    #[error("unsupported sample format: {bits}-bit {format:?}")]
    UnsupportedFormat { bits: u16, format: SampleFormat },
    #[error("file declares no channels")]
    NoChannels,
}

/// Load a WAV file as a mono [`Signal`].
///
/// Only the first channel is kept. Integer PCM is divided by its peak
/// absolute value so the loudest sample reaches ±1 (an all-zero file stays
/// zero); 32-bit float PCM is returned unchanged.
///
/// # Errors
/// Returns `crate::Error::Audio` if the file cannot be read or uses an
/// unsupported sample format, and `Error::NonFiniteAudio` if float samples
/// are not finite.
pub fn load_wav<P: AsRef<Path>>(path: P) -> crate::Result<Signal> {
    let mut reader = WavReader::open(path.as_ref()).map_err(AudioError::Hound)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(AudioError::NoChannels.into());
    }

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .step_by(channels)
            .collect::<Result<_, _>>()
            .map_err(AudioError::Hound)?,
        (SampleFormat::Int, bits) if bits <= 32 => {
            let raw: Vec<i32> = reader
                .samples::<i32>()
                .step_by(channels)
                .collect::<Result<_, _>>()
                .map_err(AudioError::Hound)?;
            normalize_peak(&raw)
        }
        (format, bits) => return Err(AudioError::UnsupportedFormat { bits, format }.into()),
    };

    log::debug!(
        "loaded {} ({} Hz, {} channel(s), {} samples kept)",
        path.as_ref().display(),
        spec.sample_rate,
        channels,
        samples.len()
    );
    Signal::new(samples, spec.sample_rate)
}

/// Scale integer samples by their peak absolute value.
fn normalize_peak(raw: &[i32]) -> Vec<f32> {
    let peak = raw.iter().map(|&s| (s as i64).abs()).max().unwrap_or(0);
    if peak == 0 {
        return vec![0.0; raw.len()];
    }
    let peak = peak as f64;
    raw.iter().map(|&s| (s as f64 / peak) as f32).collect()
}

/// Save a mono signal as 16-bit integer PCM.
///
/// Samples are clipped to `[-1, 1]` before quantization.
pub fn save_wav<P: AsRef<Path>>(path: P, signal: &Signal) -> crate::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).map_err(AudioError::Hound)?;
    for &sample in signal.samples() {
        let s = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(s).map_err(AudioError::Hound)?;
    }
    writer.finalize().map_err(AudioError::Hound)?;
    Ok(())
}

/// Generate a pure tone.
///
/// The phase is computed in `f64`, so the tone stays stationary over long
/// durations.
pub fn tone(frequency: f32, sr: u32, duration: f32) -> Vec<f32> {
    let n_samples = (duration * sr as f32) as usize;
    let angular_freq = 2.0 * std::f64::consts::PI * frequency as f64 / sr as f64;
    (0..n_samples)
        .map(|i| (angular_freq * i as f64).sin() as f32)
        .collect()
}

/// Generate a unit impulse every `period` samples, starting at sample 0.
///
/// A pulse train has a perfectly periodic spectrum, which makes it the
/// reference input for the pitch estimators. A `period` of zero yields
/// silence.
///
/// # Example
/// ```
/// use timbre::io::pulse_train;
///
/// assert_eq!(pulse_train(3, 7), vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
/// ```
pub fn pulse_train(period: usize, n_samples: usize) -> Vec<f32> {
    (0..n_samples)
        .map(|i| if period > 0 && i % period == 0 { 1.0 } else { 0.0 })
        .collect()
}
