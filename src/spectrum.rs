use crate::fft::RealFftPlan;
use ndarray::{Array2, Axis, Slice};
use std::ops::Range;

/// Floor added to magnitudes before taking decibels.
const DB_AMIN: f32 = 1e-10;

/// Frequencies (Hz) of the bins produced by a real FFT of length `n_fft`.
///
/// # Returns
/// `n_fft / 2 + 1` values `k * sr / n_fft`
///
/// # Example
/// ```
/// use timbre::spectrum::rfft_frequencies;
///
/// let freqs = rfft_frequencies(16000, 8);
/// assert_eq!(freqs, vec![0.0, 2000.0, 4000.0, 6000.0, 8000.0]);
/// ```
pub fn rfft_frequencies(sr: u32, n_fft: usize) -> Vec<f32> {
    if n_fft == 0 {
        return Vec::new();
    }
    let bin_hz = sr as f64 / n_fft as f64;
    (0..=n_fft / 2).map(|k| (k as f64 * bin_hz) as f32).collect()
}

#[inline]
fn magnitude_frame(frame: &[f32], plan: &RealFftPlan) -> crate::Result<Vec<f32>> {
    Ok(plan.process(frame)?.iter().map(|c| c.norm()).collect())
}

/// Compute magnitude spectra for a batch of equal-length frames.
///
/// # Arguments
/// * `frames` - Frames to transform (already windowed, if desired)
/// * `sr` - Sample rate in Hz
///
/// # Returns
/// `(magnitudes, frequencies)` where `magnitudes` has shape
/// `(n_fft / 2 + 1, n_frames)` and `frequencies` holds the frequency of each
/// row.
///
/// # Errors
/// Returns an error if the batch is empty, the frames are empty or differ
/// in length, or `sr` is zero.
///
/// # Example
/// ```
/// use timbre::spectrum::spectrum;
///
/// let frames = vec![vec![1.0f32; 8], vec![0.0f32; 8]];
/// let (mag, freqs) = spectrum(&frames, 8000).unwrap();
/// assert_eq!(mag.shape(), &[5, 2]);
/// assert_eq!(freqs.len(), 5);
/// assert!((mag[(0, 0)] - 8.0).abs() < 1e-5);
/// ```
pub fn spectrum(frames: &[Vec<f32>], sr: u32) -> crate::Result<(Array2<f32>, Vec<f32>)> {
    crate::utils::valid_sample_rate(sr)?;
    let Some(first) = frames.first() else {
        return Err(crate::Error::EmptyAudio);
    };
    let n_fft = first.len();
    if n_fft == 0 {
        return Err(crate::Error::InvalidSize {
            name: "frame_length",
            value: 0,
            reason: "must be > 0",
        });
    }
    if let Some(bad) = frames.iter().find(|f| f.len() != n_fft) {
        return Err(crate::Error::ShapeMismatch {
            expected: format!("frames of {n_fft} samples"),
            got: format!("frame of {} samples", bad.len()),
        });
    }

    let plan = RealFftPlan::new(n_fft);
    let n_freq = plan.output_len();
    let n_frames = frames.len();

    let frame_results: Vec<Vec<f32>> = {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            frames
                .par_iter()
                .map(|frame| magnitude_frame(frame, &plan))
                .collect::<crate::Result<_>>()?
        }
        #[cfg(not(feature = "parallel"))]
        {
            frames
                .iter()
                .map(|frame| magnitude_frame(frame, &plan))
                .collect::<crate::Result<_>>()?
        }
    };

    let mut magnitudes = Array2::<f32>::zeros((n_freq, n_frames));
    for (t, column) in frame_results.iter().enumerate() {
        for (f, &val) in column.iter().enumerate() {
            magnitudes[(f, t)] = val;
        }
    }

    Ok((magnitudes, rfft_frequencies(sr, n_fft)))
}

/// Convert a magnitude spectrogram to decibels, `20 log10(|X| + 1e-10)`.
pub fn amplitude_to_db(magnitudes: &Array2<f32>) -> Array2<f32> {
    magnitudes.mapv(|m| 20.0 * (m + DB_AMIN).log10())
}

/// Index of the bin holding `freq_hz`, interpolated linearly against the
/// Nyquist frequency and clamped to `[0, n_freq]`.
///
/// `idx = floor(freq / (sr / 2) * (n_freq - 1))`
pub fn frequency_to_bin(freq_hz: f32, sr: u32, n_freq: usize) -> usize {
    if sr == 0 || n_freq == 0 || freq_hz <= 0.0 {
        return 0;
    }
    let nyquist = sr as f64 / 2.0;
    let idx = (freq_hz as f64 / nyquist * (n_freq - 1) as f64).floor() as usize;
    idx.min(n_freq)
}

/// Keep only the rows of a `(n_freq, n_frames)` spectrogram at or below
/// `max_freq_hz`.
pub fn crop_frequencies(spec: &Array2<f32>, sr: u32, max_freq_hz: f32) -> Array2<f32> {
    let n_freq = spec.nrows();
    let last = (frequency_to_bin(max_freq_hz, sr, n_freq) + 1).min(n_freq);
    spec.slice_axis(Axis(0), Slice::from(..last)).to_owned()
}

/// Half-open frequency interval `[low_hz, high_hz)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low_hz: f32,
    pub high_hz: f32,
}

impl Band {
    /// Create a band.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` unless `0 <= low_hz < high_hz`.
    pub fn new(low_hz: f32, high_hz: f32) -> crate::Result<Self> {
        if !(low_hz >= 0.0 && low_hz < high_hz) {
            return Err(crate::Error::invalid_parameter(
                "band",
                format!("[{low_hz}, {high_hz})"),
                "requires 0 <= low < high",
            ));
        }
        Ok(Self { low_hz, high_hz })
    }

    /// Contiguous bin range covered by this band in a spectrum of `n_freq`
    /// bins. May be empty when the band lies above the Nyquist frequency or
    /// is narrower than one bin.
    ///
    /// # Example
    /// ```
    /// use timbre::spectrum::Band;
    ///
    /// let band = Band::new(630.0, 1720.0).unwrap();
    /// // 16 kHz, 512-point FFT: 257 bins
    /// assert_eq!(band.bins(16000, 257), 20..55);
    /// ```
    pub fn bins(&self, sr: u32, n_freq: usize) -> Range<usize> {
        let lo = frequency_to_bin(self.low_hz, sr, n_freq);
        let hi = frequency_to_bin(self.high_hz, sr, n_freq);
        lo..hi.max(lo)
    }
}

/// Three telephony-style critical bands: 0-630 Hz, 630-1720 Hz and
/// 1720-4400 Hz.
pub const TELEPHONY_BANDS: [Band; 3] = [
    Band {
        low_hz: 0.0,
        high_hz: 630.0,
    },
    Band {
        low_hz: 630.0,
        high_hz: 1720.0,
    },
    Band {
        low_hz: 1720.0,
        high_hz: 4400.0,
    },
];
