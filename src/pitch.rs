//! Fundamental frequency (F0) estimation for single frames.
//!
//! Three estimators are provided:
//!
//! - [`f0_cepstral`]: peak of the real cepstrum within the 50-500 Hz
//!   quefrency band,
//! - [`f0_amdf`]: mean spacing of the prominent minima of the average
//!   magnitude difference function,
//! - [`f0_autocorrelation`]: first peak of the smoothed autocorrelation.
//!
//! All of them work on the radix-2 transform in [`crate::fft`].

use crate::fft;
use crate::window;
use num_complex::Complex64;

/// Added to magnitudes before the logarithm of the cepstrum.
const LOG_FLOOR: f64 = 1e-9;

/// Fraction of the AMDF range a minimum must stand out by.
const AMDF_PROMINENCE: f32 = 0.85;

/// Lowest and highest F0 searched by the cepstral estimator, in Hz.
const CEPSTRUM_FMIN: u32 = 50;
const CEPSTRUM_FMAX: u32 = 500;

/// Taps of the moving average applied to the autocorrelation.
const ACF_SMOOTHING: usize = 10;

/// Smallest lag at which an autocorrelation peak is accepted.
const ACF_MIN_LAG: usize = 5;

/// Compute the real cepstrum of a frame.
///
/// The frame is tapered with a Hann window, transformed, and the inverse
/// transform of `ln(|X| + 1e-9)` is returned (real part).
///
/// # Errors
/// Returns `Error::InvalidSize` if the frame length is zero or not a power
/// of two.
pub fn real_cepstrum(frame: &[f32]) -> crate::Result<Vec<f32>> {
    crate::utils::valid_power_of_two("frame_length", frame.len())?;
    let windowed = window::apply_window(frame, window::WindowType::Hanning);
    let mut spectrum = fft::fft_real(&windowed)?;
    for bin in spectrum.iter_mut() {
        *bin = Complex64::new((bin.norm() + LOG_FLOOR).ln(), 0.0);
    }
    fft::ifft_in_place(&mut spectrum)?;
    Ok(spectrum.iter().map(|c| c.re as f32).collect())
}

/// Estimate F0 of a frame from the peak of its real cepstrum.
///
/// Quefrencies from `sr / 500` up to (but excluding) `sr / 50` samples are
/// searched, limited to the frame length.
///
/// # Arguments
/// * `frame` - Frame of a power-of-two length
/// * `sr` - Sample rate in Hz
///
/// # Returns
/// Estimated F0 in Hz
///
/// # Errors
/// Returns `Error::InvalidSize` for a frame that is not a power of two long,
/// or `Error::InvalidParameter` if `sr` is zero or the frame is too short to
/// hold any quefrency of the search band.
///
/// # Example
/// ```
/// use timbre::{io, pitch};
///
/// // 250 Hz pulse train at 16 kHz
/// let frame = io::pulse_train(64, 1024);
/// let f0 = pitch::f0_cepstral(&frame, 16000).unwrap();
/// assert!((f0 - 250.0).abs() < 12.5);
/// ```
pub fn f0_cepstral(frame: &[f32], sr: u32) -> crate::Result<f32> {
    crate::utils::valid_sample_rate(sr)?;
    let cepstrum = real_cepstrum(frame)?;

    let start = ((sr / CEPSTRUM_FMAX) as usize).max(1);
    let end = ((sr / CEPSTRUM_FMIN) as usize).min(cepstrum.len());
    if start >= end {
        return Err(crate::Error::invalid_parameter(
            "frame",
            format!("{} samples at {sr} Hz", frame.len()),
            format!("too short for the quefrency band [{start}, {end})"),
        ));
    }

    let peak = cepstrum[start..end]
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    Ok(sr as f32 / (peak + start) as f32)
}

/// Linear autocorrelation `r(k) = Σ x[j] x[j + k]` for `k in 0..n`.
///
/// Computed as the inverse transform of `|X|²` with the frame zero-padded to
/// a power of two of at least `2n`, so the circular product never wraps.
fn linear_autocorrelation(frame: &[f32]) -> crate::Result<Vec<f64>> {
    let n = frame.len();
    let fft_size = (2 * n).next_power_of_two();
    let mut buffer = vec![Complex64::new(0.0, 0.0); fft_size];
    for (slot, &x) in buffer.iter_mut().zip(frame) {
        slot.re = x as f64;
    }

    fft::fft_in_place(&mut buffer)?;
    for c in buffer.iter_mut() {
        *c = Complex64::new(c.norm_sqr(), 0.0);
    }
    fft::ifft_in_place(&mut buffer)?;

    Ok(buffer.iter().take(n).map(|c| c.re).collect())
}

/// Average magnitude difference function of a frame.
///
/// For each lag `k` in `0..=3n/4` this is the mean squared difference
/// between the frame and its copy shifted by `k` samples, over the `n - k`
/// samples where they overlap:
///
/// `d(k) = Σ_{j < n-k} (x[j] - x[j+k])² / (n - k)`
///
/// The sum is expanded into two partial energies and the autocorrelation, so
/// the whole curve costs two FFTs. Lags past `3n/4` are left out: with fewer
/// than `n/4` overlapping samples the average is dominated by the frame edges.
///
/// # Errors
/// Returns `Error::EmptyAudio` for an empty frame.
///
/// # Example
/// ```
/// use timbre::pitch::amdf;
///
/// let curve = amdf(&[1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
/// assert_eq!(curve.len(), 7);
/// assert!(curve[2].abs() < 1e-6); // period of two samples
/// assert!(curve[1] > curve[2]);
/// ```
pub fn amdf(frame: &[f32]) -> crate::Result<Vec<f32>> {
    if frame.is_empty() {
        return Err(crate::Error::EmptyAudio);
    }
    let n = frame.len();
    let r = linear_autocorrelation(frame)?;

    // energy[i] = Σ_{j < i} x[j]²
    let mut energy = Vec::with_capacity(n + 1);
    energy.push(0.0f64);
    for &x in frame {
        let last = energy[energy.len() - 1];
        energy.push(last + (x as f64) * (x as f64));
    }
    let total = energy[n];

    Ok((0..=3 * n / 4)
        .map(|k| {
            let head = energy[n - k];
            let tail = total - energy[k];
            let d = (head + tail - 2.0 * r[k]).max(0.0);
            (d / (n - k) as f64) as f32
        })
        .collect())
}

/// Mean distance between consecutive entries of a sorted index list.
///
/// Falls back to a spacing of one sample when fewer than two minima exist.
fn mean_spacing(minima: &[usize]) -> f32 {
    if minima.len() < 2 {
        return 1.0;
    }
    let span = minima[minima.len() - 1] - minima[0];
    span as f32 / (minima.len() - 1) as f32
}

/// Estimate F0 of a frame from the spacing of the AMDF minima.
///
/// Minima of [`amdf`] whose prominence is at least 85% of the curve's range
/// are kept; their mean spacing is the period in samples. With fewer than two
/// such minima the period degenerates to one sample and the estimate equals
/// `sr`. Two minima fit in the curve only when the period is at most `3n/8`
/// samples, so F0 below `8 * sr / (3 * n)` (about 83 Hz for 512 samples at
/// 16 kHz) always takes the fallback.
///
/// # Errors
/// Returns `Error::EmptyAudio` for an empty frame or
/// `Error::InvalidParameter` if `sr` is zero.
///
/// # Example
/// ```
/// use timbre::{io, pitch};
///
/// let frame = io::pulse_train(64, 1024);
/// let f0 = pitch::f0_amdf(&frame, 16000).unwrap();
/// assert!((f0 - 250.0).abs() < 12.5);
/// ```
pub fn f0_amdf(frame: &[f32], sr: u32) -> crate::Result<f32> {
    crate::utils::valid_sample_rate(sr)?;
    let curve = amdf(frame)?;

    let (lo, hi) = curve
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let minima = crate::utils::find_minima(&curve, AMDF_PROMINENCE * (hi - lo));
    log::trace!("amdf minima at lags {minima:?}");

    Ok(sr as f32 / mean_spacing(&minima))
}

/// Estimate F0 of a frame from its autocorrelation.
///
/// The linear autocorrelation is smoothed with a 10-tap centred moving
/// average (truncated at the edges) and the first strict local maximum at a
/// lag of at least 5 samples gives the period.
///
/// # Returns
/// Estimated F0 in Hz, or 0.0 if the smoothed autocorrelation has no peak
///
/// # Errors
/// Returns `Error::EmptyAudio` for an empty frame or
/// `Error::InvalidParameter` if `sr` is zero.
pub fn f0_autocorrelation(frame: &[f32], sr: u32) -> crate::Result<f32> {
    crate::utils::valid_sample_rate(sr)?;
    if frame.is_empty() {
        return Err(crate::Error::EmptyAudio);
    }
    let acf = moving_average(&linear_autocorrelation(frame)?, ACF_SMOOTHING);

    for lag in ACF_MIN_LAG..acf.len().saturating_sub(1) {
        if acf[lag - 1] < acf[lag] && acf[lag] > acf[lag + 1] {
            return Ok(sr as f32 / lag as f32);
        }
    }
    Ok(0.0)
}

/// Centred moving average of `taps` samples.
///
/// For an even number of taps the window reaches one sample further back
/// than forward: `out[i]` averages `x[i - taps/2 ..= i + taps/2 - 1]`. Near
/// the ends the window is truncated and only the samples inside it are
/// averaged, so the edges are not pulled towards zero.
fn moving_average(x: &[f64], taps: usize) -> Vec<f64> {
    let back = taps / 2;
    let forward = taps - back - 1;
    (0..x.len())
        .map(|i| {
            let lo = i.saturating_sub(back);
            let hi = (i + forward).min(x.len() - 1);
            x[lo..=hi].iter().sum::<f64>() / (hi - lo + 1) as f64
        })
        .collect()
}
