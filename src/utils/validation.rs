/// Compute the mean squared error between two equal-length signals.
///
/// Extra samples in the longer input are ignored.
pub fn mse(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let mut sum = 0.0f32;
    for i in 0..n {
        let d = a[i] - b[i];
        sum += d * d;
    }
    sum / n as f32
}

/// Validate a mono audio buffer.
///
/// # Returns
/// `Ok(())` if the buffer is non-empty and every sample is finite.
///
/// # Example
/// ```
/// use timbre::utils::valid_audio;
///
/// let y = vec![0.0, 0.5, -0.5, 0.0];
/// assert!(valid_audio(&y).is_ok());
///
/// let empty: Vec<f32> = vec![];
/// assert!(valid_audio(&empty).is_err());
/// ```
pub fn valid_audio(y: &[f32]) -> crate::Result<()> {
    if y.is_empty() {
        return Err(crate::Error::EmptyAudio);
    }

    if !y.iter().all(|&v| v.is_finite()) {
        return Err(crate::Error::NonFiniteAudio);
    }

    Ok(())
}

/// Validate a sample rate.
pub fn valid_sample_rate(sr: u32) -> crate::Result<()> {
    if sr == 0 {
        return Err(crate::Error::invalid_parameter(
            "sample_rate",
            sr,
            "must be > 0",
        ));
    }
    Ok(())
}

/// Validate that a transform length is a non-zero power of two.
pub fn valid_power_of_two(name: &'static str, n: usize) -> crate::Result<()> {
    if n == 0 {
        return Err(crate::Error::InvalidSize {
            name,
            value: n,
            reason: "must be > 0",
        });
    }
    if !n.is_power_of_two() {
        return Err(crate::Error::InvalidSize {
            name,
            value: n,
            reason: "must be a power of two",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_audio_rejects_non_finite() {
        assert!(matches!(
            valid_audio(&[0.0, f32::NAN]),
            Err(crate::Error::NonFiniteAudio)
        ));
        assert!(matches!(
            valid_audio(&[f32::INFINITY]),
            Err(crate::Error::NonFiniteAudio)
        ));
    }

    #[test]
    fn test_valid_power_of_two() {
        assert!(valid_power_of_two("n", 1).is_ok());
        assert!(valid_power_of_two("n", 1024).is_ok());
        assert!(valid_power_of_two("n", 0).is_err());
        assert!(valid_power_of_two("n", 12).is_err());
    }

    #[test]
    fn test_valid_sample_rate() {
        assert!(valid_sample_rate(16000).is_ok());
        assert!(matches!(
            valid_sample_rate(0),
            Err(crate::Error::InvalidParameter { name: "sample_rate", .. })
        ));
    }

    #[test]
    fn test_mse_identical_is_zero() {
        let a = vec![0.1, -0.2, 0.3];
        assert_eq!(mse(&a, &a), 0.0);
        assert_eq!(mse(&[], &a), 0.0);
    }
}
