use crate::frame;

/// Compute the zero-crossing rate of a frame.
///
/// A crossing is counted between consecutive samples whose product is
/// negative, so samples that are exactly zero never start or end a
/// crossing. The count is divided by twice the frame length.
///
/// # Arguments
/// * `y` - Input frame
///
/// # Returns
/// Zero-crossing rate in `[0, 0.5)`; 0.0 for frames shorter than two samples
///
/// # Example
/// ```
/// use timbre::feature::basic::zero_crossing_rate;
///
/// let signal = vec![1.0, -1.0, 1.0, -1.0]; // Alternates every sample
/// let zcr = zero_crossing_rate(&signal);
/// assert_eq!(zcr, 3.0 / 8.0); // 3 crossings / (2 * 4)
/// ```
pub fn zero_crossing_rate(y: &[f32]) -> f32 {
    if y.len() < 2 {
        return 0.0;
    }
    let count = y.windows(2).filter(|w| w[0] * w[1] < 0.0).count();
    count as f32 / (2 * y.len()) as f32
}

/// Compute the zero-crossing rate of each frame of a signal.
///
/// # Arguments
/// * `y` - Input audio signal
/// * `frame_length` - Length of each frame
/// * `overlap` - Fraction of each frame shared with the next, in `[0, 1)`
///
/// # Returns
/// Vector of ZCR values, one per frame
pub fn zero_crossing_rate_frames(
    y: &[f32],
    frame_length: usize,
    overlap: f32,
) -> crate::Result<Vec<f32>> {
    let frames = frame::frame_signal(y, frame_length, overlap)?;
    Ok(frames.iter().map(|f| zero_crossing_rate(f)).collect())
}

/// Compute the root mean square (RMS) amplitude of a frame.
///
/// This is the "volume" used by voice-activity segmentation.
///
/// # Example
/// ```
/// use timbre::feature::basic::rms;
///
/// let signal = vec![1.0, -1.0, 1.0, -1.0];
/// assert_eq!(rms(&signal), 1.0);
/// ```
pub fn rms(y: &[f32]) -> f32 {
    short_time_energy(y).sqrt()
}

/// Compute the RMS amplitude of each frame of a signal.
pub fn rms_frames(y: &[f32], frame_length: usize, overlap: f32) -> crate::Result<Vec<f32>> {
    let frames = frame::frame_signal(y, frame_length, overlap)?;
    Ok(frames.iter().map(|f| rms(f)).collect())
}

/// Short-time energy of a frame, `mean(x²)`.
///
/// # Returns
/// Mean squared amplitude; 0.0 for an empty frame
pub fn short_time_energy(y: &[f32]) -> f32 {
    if y.is_empty() {
        return 0.0;
    }
    let sum: f64 = y.iter().map(|&v| (v as f64) * (v as f64)).sum();
    (sum / y.len() as f64) as f32
}

/// Short-time energy of each frame of a signal.
pub fn short_time_energy_frames(
    y: &[f32],
    frame_length: usize,
    overlap: f32,
) -> crate::Result<Vec<f32>> {
    let frames = frame::frame_signal(y, frame_length, overlap)?;
    Ok(frames.iter().map(|f| short_time_energy(f)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zcr_alternating() {
        let y: Vec<f32> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        assert_relative_eq!(zero_crossing_rate(&y), 99.0 / 200.0);
    }

    #[test]
    fn test_zcr_constant_and_short() {
        assert_eq!(zero_crossing_rate(&[1.0; 64]), 0.0);
        assert_eq!(zero_crossing_rate(&[1.0]), 0.0);
        assert_eq!(zero_crossing_rate(&[]), 0.0);
    }

    #[test]
    fn test_zcr_zero_samples_do_not_cross() {
        assert_eq!(zero_crossing_rate(&[1.0, 0.0, -1.0, 0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_zcr_frames() {
        let y: Vec<f32> = (0..16).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let zcr = zero_crossing_rate_frames(&y, 8, 0.0).unwrap();
        assert_eq!(zcr.len(), 2);
        assert_relative_eq!(zcr[0], 7.0 / 16.0);
    }

    #[test]
    fn test_rms_and_energy() {
        assert_eq!(rms(&[]), 0.0);
        assert_relative_eq!(rms(&[3.0, 4.0]), (12.5f32).sqrt());
        assert_relative_eq!(short_time_energy(&[3.0, 4.0]), 12.5);
        let frames = rms_frames(&[0.5; 8], 4, 0.5).unwrap();
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|&v| (v - 0.5).abs() < 1e-6));
        let energy = short_time_energy_frames(&[2.0; 4], 4, 0.0).unwrap();
        assert_eq!(energy, vec![4.0]);
    }
}
