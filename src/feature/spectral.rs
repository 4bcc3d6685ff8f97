//! Spectral descriptors of magnitude spectra.
//!
//! Single-frame functions take one magnitude spectrum (and, where needed, its
//! frequency axis). The `*_frames` variants take a `(n_freq, n_frames)`
//! magnitude matrix as produced by [`crate::spectrum::spectrum`] and return
//! one value per frame.
//!
//! Degenerate inputs (silent frames, empty bands) produce `0.0` instead of an
//! error so that a caller iterating over many frames never has to special
//! case them.

use crate::spectrum::Band;
use ndarray::Array2;
use std::ops::Range;

/// Floor applied inside the logarithm of the geometric mean.
const AMIN: f64 = 1e-10;

fn check_axis(mag: &[f32], freqs: &[f32]) -> crate::Result<()> {
    if mag.len() != freqs.len() {
        return Err(crate::Error::ShapeMismatch {
            expected: format!("freqs.len() == {}", mag.len()),
            got: format!("{}", freqs.len()),
        });
    }
    Ok(())
}

fn power_sum(mag: &[f32]) -> f64 {
    mag.iter().map(|&m| (m as f64) * (m as f64)).sum()
}

/// Mean power of a spectrum, `mean(|X|²)`.
///
/// # Example
/// ```
/// use timbre::feature::spectral::volume;
///
/// assert_eq!(volume(&[1.0, 3.0]), 5.0);
/// ```
pub fn volume(mag: &[f32]) -> f32 {
    if mag.is_empty() {
        return 0.0;
    }
    (power_sum(mag) / mag.len() as f64) as f32
}

/// Magnitude-weighted mean frequency, `Σ f·|X| / Σ |X|`.
///
/// # Returns
/// Centroid in Hz, or 0.0 when the spectrum carries no magnitude
///
/// # Errors
/// Returns `Error::ShapeMismatch` if `mag` and `freqs` differ in length.
pub fn spectral_centroid(mag: &[f32], freqs: &[f32]) -> crate::Result<f32> {
    check_axis(mag, freqs)?;
    let mut weighted_sum = 0.0f64;
    let mut total = 0.0f64;
    for (&m, &f) in mag.iter().zip(freqs) {
        weighted_sum += f as f64 * m as f64;
        total += m as f64;
    }
    Ok(if total > 0.0 {
        (weighted_sum / total) as f32
    } else {
        0.0
    })
}

/// Effective bandwidth: magnitude-weighted standard deviation of frequency
/// around the centroid, `sqrt(Σ (f - c)² |X| / Σ |X|)`.
///
/// # Returns
/// Bandwidth in Hz, or 0.0 when the spectrum carries no magnitude
///
/// # Errors
/// Returns `Error::ShapeMismatch` if `mag` and `freqs` differ in length.
pub fn effective_bandwidth(mag: &[f32], freqs: &[f32]) -> crate::Result<f32> {
    let centroid = spectral_centroid(mag, freqs)? as f64;
    let mut weighted_variance = 0.0f64;
    let mut total = 0.0f64;
    for (&m, &f) in mag.iter().zip(freqs) {
        let diff = f as f64 - centroid;
        weighted_variance += diff * diff * m as f64;
        total += m as f64;
    }
    Ok(if total > 0.0 {
        (weighted_variance / total).sqrt() as f32
    } else {
        0.0
    })
}

/// Fraction of a frame's energy that falls inside a bin range.
///
/// The band's mean power is taken over the whole frame, so the ratio to the
/// frame volume reduces to `Σ_band |X|² / Σ_all |X|²`. The range is clamped
/// to the spectrum.
///
/// # Returns
/// Ratio in `[0, 1]`, or 0.0 when the frame volume is zero
///
/// # Example
/// ```
/// use timbre::feature::spectral::band_energy_ratio;
///
/// let mag = vec![1.0, 1.0, 0.0, 0.0];
/// assert_eq!(band_energy_ratio(&mag, 0..1), 0.5);
/// ```
pub fn band_energy_ratio(mag: &[f32], bins: Range<usize>) -> f32 {
    let total = power_sum(mag);
    if total <= 0.0 {
        return 0.0;
    }
    let band = clamp_range(bins, mag.len());
    (power_sum(&mag[band]) / total) as f32
}

/// Spectral flatness measure: geometric over arithmetic mean of `|X|²`.
///
/// Close to 1 for noise-like spectra and close to 0 for tonal ones.
///
/// # Returns
/// Flatness in `[0, 1]`, or 0.0 for an empty or silent band
pub fn spectral_flatness(band_mag: &[f32]) -> f32 {
    if band_mag.is_empty() {
        return 0.0;
    }
    let n = band_mag.len() as f64;
    let mut log_sum = 0.0f64;
    let mut arith_sum = 0.0f64;
    for &m in band_mag {
        let power = (m as f64) * (m as f64);
        log_sum += (power + AMIN).ln();
        arith_sum += power;
    }
    let arith_mean = arith_sum / n;
    if arith_mean <= AMIN {
        return 0.0;
    }
    let geom_mean = (log_sum / n).exp();
    (geom_mean / arith_mean).min(1.0) as f32
}

/// Spectral crest factor: peak over arithmetic mean of `|X|²`.
///
/// 1 for a perfectly flat band, large when a single component dominates.
///
/// # Returns
/// Crest factor `>= 1`, or 0.0 for an empty or silent band
pub fn spectral_crest(band_mag: &[f32]) -> f32 {
    if band_mag.is_empty() {
        return 0.0;
    }
    let mut peak = 0.0f64;
    let mut sum = 0.0f64;
    for &m in band_mag {
        let power = (m as f64) * (m as f64);
        peak = peak.max(power);
        sum += power;
    }
    if sum <= 0.0 {
        return 0.0;
    }
    (peak * band_mag.len() as f64 / sum) as f32
}

fn clamp_range(bins: Range<usize>, len: usize) -> Range<usize> {
    let end = bins.end.min(len);
    bins.start.min(end)..end
}

/// Apply a per-frame function to every column of a magnitude matrix.
fn per_frame<T>(spec: &Array2<f32>, f: impl Fn(&[f32]) -> T) -> Vec<T> {
    spec.columns()
        .into_iter()
        .map(|column| f(&column.to_vec()))
        .collect()
}

fn check_matrix_axis(spec: &Array2<f32>, freqs: &[f32]) -> crate::Result<()> {
    if spec.nrows() != freqs.len() {
        return Err(crate::Error::ShapeMismatch {
            expected: format!("freqs.len() == {}", spec.nrows()),
            got: format!("{}", freqs.len()),
        });
    }
    Ok(())
}

/// Volume of each frame of a `(n_freq, n_frames)` magnitude matrix.
pub fn volume_frames(spec: &Array2<f32>) -> Vec<f32> {
    per_frame(spec, volume)
}

/// Spectral centroid of each frame.
pub fn spectral_centroid_frames(spec: &Array2<f32>, freqs: &[f32]) -> crate::Result<Vec<f32>> {
    check_matrix_axis(spec, freqs)?;
    per_frame(spec, |m| spectral_centroid(m, freqs)).into_iter().collect()
}

/// Effective bandwidth of each frame.
pub fn effective_bandwidth_frames(
    spec: &Array2<f32>,
    freqs: &[f32],
) -> crate::Result<Vec<f32>> {
    check_matrix_axis(spec, freqs)?;
    per_frame(spec, |m| effective_bandwidth(m, freqs))
        .into_iter()
        .collect()
}

/// Band energy ratio of each frame for one frequency band.
pub fn band_energy_ratio_frames(spec: &Array2<f32>, band: Band, sr: u32) -> Vec<f32> {
    let bins = band.bins(sr, spec.nrows());
    per_frame(spec, |m| band_energy_ratio(m, bins.clone()))
}

/// Spectral flatness of each frame, restricted to one frequency band.
pub fn spectral_flatness_frames(spec: &Array2<f32>, band: Band, sr: u32) -> Vec<f32> {
    let bins = band.bins(sr, spec.nrows());
    per_frame(spec, |m| spectral_flatness(&m[clamp_range(bins.clone(), m.len())]))
}

/// Spectral crest factor of each frame, restricted to one frequency band.
pub fn spectral_crest_frames(spec: &Array2<f32>, band: Band, sr: u32) -> Vec<f32> {
    let bins = band.bins(sr, spec.nrows());
    per_frame(spec, |m| spectral_crest(&m[clamp_range(bins.clone(), m.len())]))
}

/// Per-frame band energy ratio, flatness and crest factor of one band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandFeatures {
    pub band: Band,
    pub energy_ratio: Vec<f32>,
    pub flatness: Vec<f32>,
    pub crest: Vec<f32>,
}

impl BandFeatures {
    /// Compute all three band descriptors for every frame of a
    /// `(n_freq, n_frames)` magnitude matrix.
    pub fn compute(spec: &Array2<f32>, band: Band, sr: u32) -> Self {
        Self {
            band,
            energy_ratio: band_energy_ratio_frames(spec, band, sr),
            flatness: spectral_flatness_frames(spec, band, sr),
            crest: spectral_crest_frames(spec, band, sr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tonal(n: usize, peak: usize) -> Vec<f32> {
        let mut mag = vec![1e-6f32; n];
        mag[peak] = 1.0;
        mag
    }

    #[test]
    fn test_volume() {
        assert_eq!(volume(&[]), 0.0);
        assert_relative_eq!(volume(&[2.0, 2.0, 2.0]), 4.0);
    }

    #[test]
    fn test_centroid_single_peak() {
        let freqs = vec![0.0, 100.0, 200.0, 300.0];
        let mag = vec![0.0, 0.0, 1.0, 0.0];
        assert_relative_eq!(spectral_centroid(&mag, &freqs).unwrap(), 200.0);
        assert_relative_eq!(effective_bandwidth(&mag, &freqs).unwrap(), 0.0);
    }

    #[test]
    fn test_centroid_and_bandwidth_two_peaks() {
        let freqs = vec![0.0, 100.0, 200.0, 300.0];
        let mag = vec![0.0, 1.0, 0.0, 1.0];
        assert_relative_eq!(spectral_centroid(&mag, &freqs).unwrap(), 200.0);
        assert_relative_eq!(effective_bandwidth(&mag, &freqs).unwrap(), 100.0);
    }

    #[test]
    fn test_silent_frame_is_zero() {
        let freqs = vec![0.0, 100.0, 200.0];
        let mag = vec![0.0; 3];
        assert_eq!(spectral_centroid(&mag, &freqs).unwrap(), 0.0);
        assert_eq!(effective_bandwidth(&mag, &freqs).unwrap(), 0.0);
        assert_eq!(band_energy_ratio(&mag, 0..2), 0.0);
        assert_eq!(spectral_flatness(&mag), 0.0);
        assert_eq!(spectral_crest(&mag), 0.0);
    }

    #[test]
    fn test_axis_mismatch() {
        assert!(spectral_centroid(&[1.0, 2.0], &[0.0]).is_err());
        assert!(effective_bandwidth(&[1.0], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_band_energy_ratio_partitions_energy() {
        let mag: Vec<f32> = (1..=8).map(|v| v as f32).collect();
        let total: f32 = [0..3, 3..6, 6..8]
            .into_iter()
            .map(|r| band_energy_ratio(&mag, r))
            .sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-6);
        // Out-of-range bands are clamped to the spectrum
        assert_eq!(band_energy_ratio(&mag, 10..20), 0.0);
    }

    #[test]
    fn test_flatness_flat_vs_tonal() {
        assert_relative_eq!(spectral_flatness(&[0.5; 64]), 1.0, epsilon = 1e-6);
        assert!(spectral_flatness(&tonal(64, 10)) < 0.01);
    }

    #[test]
    fn test_crest_flat_vs_tonal() {
        assert_relative_eq!(spectral_crest(&[0.5; 64]), 1.0, epsilon = 1e-6);
        assert!(spectral_crest(&tonal(64, 10)) > 60.0);
    }

    #[test]
    fn test_empty_band() {
        assert_eq!(spectral_flatness(&[]), 0.0);
        assert_eq!(spectral_crest(&[]), 0.0);
    }

    #[test]
    fn test_frame_variants() {
        let spec =
            Array2::from_shape_vec((3, 2), vec![0.0, 1.0, 1.0, 1.0, 0.0, 1.0]).unwrap();
        let freqs = vec![0.0, 100.0, 200.0];
        assert_eq!(volume_frames(&spec), vec![1.0 / 3.0, 1.0]);
        let centroids = spectral_centroid_frames(&spec, &freqs).unwrap();
        assert_relative_eq!(centroids[0], 100.0);
        assert_relative_eq!(centroids[1], 100.0);
        assert!(spectral_centroid_frames(&spec, &freqs[..2]).is_err());

        let band = Band::new(0.0, 1000.0).unwrap();
        // 4 kHz sampling: Nyquist 2 kHz, 1 kHz maps to bin 1
        let ratio = band_energy_ratio_frames(&spec, band, 4000);
        assert_relative_eq!(ratio[0], 0.0);
        assert_relative_eq!(ratio[1], 1.0 / 3.0, epsilon = 1e-6);
        assert_eq!(spectral_crest_frames(&spec, band, 4000), vec![0.0, 1.0]);
        assert_eq!(spectral_flatness_frames(&spec, band, 4000)[0], 0.0);

        let features = BandFeatures::compute(&spec, band, 4000);
        assert_eq!(features.energy_ratio, ratio);
        assert_eq!(features.crest.len(), 2);
    }
}
