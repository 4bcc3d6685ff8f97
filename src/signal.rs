use std::time::Duration;

/// A mono audio signal: samples in `[-1, 1]` and their sample rate.
///
/// A `Signal` is immutable once built. Analysis functions borrow
/// [`Signal::samples`] together with [`Signal::sample_rate`].
///
/// # Example
/// ```
/// use timbre::Signal;
///
/// let signal = Signal::new(vec![0.0, 0.5, -0.5, 0.0], 8000).unwrap();
/// assert_eq!(signal.len(), 4);
/// assert_eq!(signal.duration().as_micros(), 500);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Signal {
    /// Wrap samples recorded at `sample_rate` Hz.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if `sample_rate` is zero and
    /// `Error::NonFiniteAudio` if any sample is NaN or infinite. An empty
    /// signal is allowed.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> crate::Result<Self> {
        crate::utils::valid_sample_rate(sample_rate)?;
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(crate::Error::NonFiniteAudio);
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// The samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the signal in time.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    /// Take ownership of the samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

impl AsRef<[f32]> for Signal {
    fn as_ref(&self) -> &[f32] {
        &self.samples
    }
}
