//! Silence / voiced / unvoiced classification.
//!
//! The signal is cut into a fixed number of near-equal parts. A part is
//! *voiced* when it crosses zero rarely and is loud relative to the loudest
//! part, *silent* when it crosses zero rarely and is quiet, and *unvoiced*
//! (fricative-like noise) whenever it crosses zero often.

use crate::feature::basic::{rms, zero_crossing_rate};
use crate::frame::split_equal;
use std::fmt;

/// Classification of one part of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameLabel {
    Silent,
    Voiced,
    Unvoiced,
}

impl fmt::Display for FrameLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FrameLabel::Silent => "silent",
            FrameLabel::Voiced => "voiced",
            FrameLabel::Unvoiced => "unvoiced",
        })
    }
}

/// A labelled sample range `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub label: FrameLabel,
}

impl Segment {
    /// Number of samples covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Configuration for [`segment_voice_activity`].
///
/// # Example
/// ```
/// use timbre::segment::SegmentationConfig;
///
/// let config = SegmentationConfig::default()
///     .with_n_frames(128)
///     .with_zcr_threshold(0.05);
/// assert_eq!(config.volume_fraction, 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentationConfig {
    /// Number of parts the signal is split into
    pub n_frames: usize,
    /// Parts with a zero-crossing rate at or above this are unvoiced
    pub zcr_threshold: f32,
    /// Fraction of the loudest part's RMS separating silent from voiced
    pub volume_fraction: f32,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            n_frames: 256,
            zcr_threshold: 0.03,
            volume_fraction: 0.05,
        }
    }
}

impl SegmentationConfig {
    /// Set the number of parts.
    pub fn with_n_frames(mut self, n_frames: usize) -> Self {
        self.n_frames = n_frames;
        self
    }

    /// Set the zero-crossing rate threshold.
    pub fn with_zcr_threshold(mut self, zcr_threshold: f32) -> Self {
        self.zcr_threshold = zcr_threshold;
        self
    }

    /// Set the volume fraction.
    pub fn with_volume_fraction(mut self, volume_fraction: f32) -> Self {
        self.volume_fraction = volume_fraction;
        self
    }

    fn validate(&self) -> crate::Result<()> {
        if self.n_frames == 0 {
            return Err(crate::Error::invalid_parameter(
                "n_frames",
                self.n_frames,
                "must be > 0",
            ));
        }
        if !self.zcr_threshold.is_finite() || self.zcr_threshold < 0.0 {
            return Err(crate::Error::invalid_parameter(
                "zcr_threshold",
                self.zcr_threshold,
                "must be a non-negative number",
            ));
        }
        if !(0.0..=1.0).contains(&self.volume_fraction) {
            return Err(crate::Error::invalid_parameter(
                "volume_fraction",
                self.volume_fraction,
                "must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Result of [`segment_voice_activity`].
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceActivity {
    /// Fraction of parts labelled silent
    pub silence_ratio: f32,
    /// Sample ranges of the silent parts, in order
    pub silent: Vec<(usize, usize)>,
    /// Sample ranges of the voiced parts, in order
    pub voiced: Vec<(usize, usize)>,
    /// Sample ranges of the unvoiced parts, in order
    pub unvoiced: Vec<(usize, usize)>,
    /// Every part with its label, in signal order
    pub segments: Vec<Segment>,
}

/// Label one part from its zero-crossing rate and RMS volume.
///
/// A part with zero volume is always silent, even when `max_volume` is zero.
pub fn classify(
    zcr: f32,
    volume: f32,
    max_volume: f32,
    config: &SegmentationConfig,
) -> FrameLabel {
    if zcr >= config.zcr_threshold {
        FrameLabel::Unvoiced
    } else if volume > 0.0 && volume >= config.volume_fraction * max_volume {
        FrameLabel::Voiced
    } else {
        FrameLabel::Silent
    }
}

/// Split a signal into `config.n_frames` parts and label each one.
///
/// # Errors
/// Returns `Error::EmptyAudio` or `Error::NonFiniteAudio` for unusable
/// input and `Error::InvalidParameter` for an invalid configuration
/// (including `n_frames == 0`).
///
/// # Example
/// ```
/// use timbre::segment::{segment_voice_activity, SegmentationConfig};
///
/// // 200 Hz tone followed by silence
/// let mut y = timbre::io::tone(200.0, 16000, 0.5);
/// y.extend(vec![0.0; 8000]);
/// let activity = segment_voice_activity(&y, &SegmentationConfig::default()).unwrap();
/// assert!((activity.silence_ratio - 0.5).abs() < 0.01);
/// ```
pub fn segment_voice_activity(
    y: &[f32],
    config: &SegmentationConfig,
) -> crate::Result<VoiceActivity> {
    crate::utils::valid_audio(y)?;
    config.validate()?;

    let bounds = split_equal(y.len(), config.n_frames)?;
    let measures: Vec<(f32, f32)> = bounds
        .iter()
        .map(|&(start, end)| {
            let part = &y[start..end];
            (zero_crossing_rate(part), rms(part))
        })
        .collect();
    let max_volume = measures.iter().map(|&(_, v)| v).fold(0.0f32, f32::max);

    let mut activity = VoiceActivity {
        silence_ratio: 0.0,
        silent: Vec::new(),
        voiced: Vec::new(),
        unvoiced: Vec::new(),
        segments: Vec::with_capacity(bounds.len()),
    };
    for (&(start, end), &(zcr, volume)) in bounds.iter().zip(&measures) {
        let label = classify(zcr, volume, max_volume, config);
        match label {
            FrameLabel::Silent => activity.silent.push((start, end)),
            FrameLabel::Voiced => activity.voiced.push((start, end)),
            FrameLabel::Unvoiced => activity.unvoiced.push((start, end)),
        }
        activity.segments.push(Segment { start, end, label });
    }
    activity.silence_ratio = activity.silent.len() as f32 / bounds.len() as f32;

    log::debug!(
        "voice activity over {} parts: {} silent, {} voiced, {} unvoiced (max rms {max_volume:.4})",
        bounds.len(),
        activity.silent.len(),
        activity.voiced.len(),
        activity.unvoiced.len()
    );
    Ok(activity)
}
