//! End-to-end feature tracks over a whole signal.
//!
//! Each function frames the signal according to an [`AnalysisConfig`],
//! windows every frame and reduces it to one value (or one spectrum column).
//! Nothing is cached between calls; changing a parameter simply means
//! calling again with a different configuration.

use crate::feature::spectral::{self, BandFeatures};
use crate::frame;
use crate::pitch;
use crate::spectrum::{self, TELEPHONY_BANDS};
use crate::window::{self, WindowType};
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// Framing and windowing parameters shared by the analysis pipelines.
///
/// # Example
/// ```
/// use timbre::analysis::AnalysisConfig;
/// use timbre::window::WindowType;
///
/// let config = AnalysisConfig::default()
///     .with_overlap(0.75)
///     .with_window(WindowType::Blackman);
/// assert_eq!(config.min_frame_duration, 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Minimum frame duration in seconds; the frame length is the smallest
    /// power of two lasting at least this long
    pub min_frame_duration: f32,
    /// Fraction of each frame shared with the next, in `[0, 1)`
    pub overlap: f32,
    /// Window applied to every frame
    pub window: WindowType,
    /// Highest frequency kept by [`spectrogram_db`], in Hz
    pub max_frequency: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_frame_duration: 0.2,
            overlap: 0.5,
            window: WindowType::Hamming,
            max_frequency: 2000.0,
        }
    }
}

impl AnalysisConfig {
    /// Short frames (20 ms) suited to pitch tracking.
    pub fn pitch() -> Self {
        Self {
            min_frame_duration: 0.02,
            ..Self::default()
        }
    }

    /// Set the minimum frame duration in seconds.
    pub fn with_min_frame_duration(mut self, seconds: f32) -> Self {
        self.min_frame_duration = seconds;
        self
    }

    /// Set the frame overlap.
    pub fn with_overlap(mut self, overlap: f32) -> Self {
        self.overlap = overlap;
        self
    }

    /// Set the window.
    pub fn with_window(mut self, window: WindowType) -> Self {
        self.window = window;
        self
    }

    /// Set the spectrogram's frequency limit in Hz.
    pub fn with_max_frequency(mut self, max_frequency: f32) -> Self {
        self.max_frequency = max_frequency;
        self
    }

    /// Frame length in samples at sample rate `sr`.
    pub fn frame_length(&self, sr: u32) -> crate::Result<usize> {
        frame::frame_length(sr, self.min_frame_duration)
    }

    /// Hop between frames in samples at sample rate `sr`.
    pub fn hop_length(&self, sr: u32) -> crate::Result<usize> {
        frame::hop_length(self.frame_length(sr)?, self.overlap)
    }
}

/// Frames of a signal together with their timing.
struct Framed {
    frames: Vec<Vec<f32>>,
    times: Vec<f32>,
}

fn split_frames(y: &[f32], sr: u32, config: &AnalysisConfig) -> crate::Result<Framed> {
    crate::utils::valid_audio(y)?;
    let frame_length = config.frame_length(sr)?;
    let hop = frame::hop_length(frame_length, config.overlap)?;
    let frames = frame::frame_signal(y, frame_length, config.overlap)?;
    log::debug!(
        "framed {} samples at {sr} Hz into {} frames of {frame_length} (hop {hop})",
        y.len(),
        frames.len()
    );
    Ok(Framed {
        times: frame::frame_times(frames.len(), hop, sr),
        frames,
    })
}

fn windowed_frames(y: &[f32], sr: u32, config: &AnalysisConfig) -> crate::Result<Framed> {
    let framed = split_frames(y, sr, config)?;
    Ok(Framed {
        frames: window::apply_window_frames(&framed.frames, config.window),
        times: framed.times,
    })
}

/// A per-frame scalar track with the start time of each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSeries {
    pub values: Vec<f32>,
    /// Seconds, `i * hop_length / sr`
    pub times: Vec<f32>,
}

impl FeatureSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean of the values; 0.0 for an empty series.
    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        (sum / self.values.len() as f64) as f32
    }

    /// Population standard deviation of the values; 0.0 for an empty series.
    pub fn std_dev(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mean = self.mean() as f64;
        let var: f64 = self
            .values
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / self.values.len() as f64;
        var.sqrt() as f32
    }
}

/// Magnitude spectrogram in decibels, limited to `config.max_frequency`.
///
/// # Returns
/// Matrix of shape `(n_bins, n_frames)`, row 0 being 0 Hz
///
/// # Errors
/// Returns an error for an empty or non-finite signal or an invalid
/// configuration.
///
/// # Example
/// ```
/// use timbre::analysis::{spectrogram_db, AnalysisConfig};
///
/// let y = timbre::io::tone(440.0, 16000, 1.0);
/// let spec = spectrogram_db(&y, 16000, &AnalysisConfig::default()).unwrap();
/// // 4096-point frames: 2000 Hz is bin 512
/// assert_eq!(spec.nrows(), 513);
/// ```
pub fn spectrogram_db(y: &[f32], sr: u32, config: &AnalysisConfig) -> crate::Result<Array2<f32>> {
    let framed = windowed_frames(y, sr, config)?;
    let (magnitudes, _) = spectrum::spectrum(&framed.frames, sr)?;
    let db = spectrum::amplitude_to_db(&magnitudes);
    Ok(spectrum::crop_frequencies(&db, sr, config.max_frequency))
}

/// Frame-level pitch estimator used by [`f0_track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PitchMethod {
    #[default]
    Cepstral,
    Amdf,
    Autocorrelation,
}

impl PitchMethod {
    /// Estimate F0 of one frame.
    pub fn estimate(self, frame: &[f32], sr: u32) -> crate::Result<f32> {
        match self {
            PitchMethod::Cepstral => pitch::f0_cepstral(frame, sr),
            PitchMethod::Amdf => pitch::f0_amdf(frame, sr),
            PitchMethod::Autocorrelation => pitch::f0_autocorrelation(frame, sr),
        }
    }
}

impl fmt::Display for PitchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PitchMethod::Cepstral => "cepstral",
            PitchMethod::Amdf => "amdf",
            PitchMethod::Autocorrelation => "autocorrelation",
        })
    }
}

impl FromStr for PitchMethod {
    type Err = crate::Error;

    fn from_str(name: &str) -> crate::Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "cepstral" | "cepstrum" => Ok(PitchMethod::Cepstral),
            "amdf" => Ok(PitchMethod::Amdf),
            "autocorrelation" | "acf" => Ok(PitchMethod::Autocorrelation),
            _ => Err(crate::Error::invalid_parameter(
                "pitch_method",
                name,
                "expected cepstral, amdf or autocorrelation",
            )),
        }
    }
}

/// Track F0 over a signal, one estimate per frame.
///
/// The estimators see the frames unwindowed: AMDF and autocorrelation
/// compare the frame against shifted copies of itself, which a taper would
/// distort, and the cepstral estimator applies its own Hann window.
/// `config.window` is ignored here. Use [`AnalysisConfig::pitch`] for the
/// usual 20 ms frames.
///
/// # Errors
/// Returns an error for an empty or non-finite signal, an invalid
/// configuration, or frames too short for the chosen estimator.
///
/// # Example
/// ```
/// use timbre::analysis::{f0_track, AnalysisConfig, PitchMethod};
///
/// let y = timbre::io::pulse_train(64, 16000);
/// let track = f0_track(&y, 16000, &AnalysisConfig::pitch(), PitchMethod::Amdf).unwrap();
/// assert!((track.values[0] - 250.0).abs() < 12.5);
/// ```
pub fn f0_track(
    y: &[f32],
    sr: u32,
    config: &AnalysisConfig,
    method: PitchMethod,
) -> crate::Result<FeatureSeries> {
    let framed = split_frames(y, sr, config)?;

    let values: Vec<f32> = {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            framed
                .frames
                .par_iter()
                .map(|frame| method.estimate(frame, sr))
                .collect::<crate::Result<_>>()?
        }
        #[cfg(not(feature = "parallel"))]
        {
            framed
                .frames
                .iter()
                .map(|frame| method.estimate(frame, sr))
                .collect::<crate::Result<_>>()?
        }
    };
    log::debug!("{method} f0 track: {} frames", values.len());

    Ok(FeatureSeries {
        values,
        times: framed.times,
    })
}

/// Spectral descriptors of every frame of a signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralSeries {
    pub volume: FeatureSeries,
    pub centroid: FeatureSeries,
    pub bandwidth: FeatureSeries,
    /// One entry per band of [`TELEPHONY_BANDS`], in order
    pub bands: Vec<BandFeatures>,
}

/// Compute volume, centroid, effective bandwidth and the per-band
/// descriptors over the full magnitude spectrum of every frame.
///
/// # Errors
/// Returns an error for an empty or non-finite signal or an invalid
/// configuration.
pub fn spectral_features(
    y: &[f32],
    sr: u32,
    config: &AnalysisConfig,
) -> crate::Result<SpectralSeries> {
    let framed = windowed_frames(y, sr, config)?;
    let (magnitudes, freqs) = spectrum::spectrum(&framed.frames, sr)?;

    let series = |values: Vec<f32>| FeatureSeries {
        values,
        times: framed.times.clone(),
    };
    let result = SpectralSeries {
        volume: series(spectral::volume_frames(&magnitudes)),
        centroid: series(spectral::spectral_centroid_frames(&magnitudes, &freqs)?),
        bandwidth: series(spectral::effective_bandwidth_frames(&magnitudes, &freqs)?),
        bands: TELEPHONY_BANDS
            .iter()
            .map(|&band| BandFeatures::compute(&magnitudes, band, sr))
            .collect(),
    };
    log::debug!(
        "spectral features over {} frames: mean centroid {:.1} Hz, bandwidth std {:.1} Hz",
        result.volume.len(),
        result.centroid.mean(),
        result.bandwidth.std_dev()
    );
    Ok(result)
}
