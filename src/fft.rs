//! Fourier transforms.
//!
//! Two transforms live here:
//!
//! - a self-contained radix-2 complex FFT/IFFT ([`fft`], [`ifft`]) in double
//!   precision, used by the pitch estimators, and
//! - a planned real-input FFT ([`RealFftPlan`], [`rfft`]) backed by
//!   `realfft`, used for batch magnitude spectra.
//!
//! The radix-2 transform uses the twiddle `w = e^{+2πi/n}` for the forward
//! direction and `e^{-2πi/n}` for the inverse, and the inverse is scaled by
//! `1/n`, so `ifft(fft(x)) == x` up to rounding. For real input the
//! magnitudes agree with the conventional DFT.

use num_complex::{Complex32, Complex64};
use realfft::{RealFftPlanner, RealToComplex};
use std::f64::consts::PI;
use std::sync::Arc;

/// Forward radix-2 FFT.
///
/// # Errors
/// Returns `Error::InvalidSize` if the input length is zero or not a power
/// of two.
///
/// # Example
/// ```
/// use timbre::fft::fft;
/// use num_complex::Complex64;
///
/// let impulse = vec![
///     Complex64::new(1.0, 0.0),
///     Complex64::new(0.0, 0.0),
///     Complex64::new(0.0, 0.0),
///     Complex64::new(0.0, 0.0),
/// ];
/// let spectrum = fft(&impulse).unwrap();
/// assert!(spectrum.iter().all(|c| (c.norm() - 1.0).abs() < 1e-12));
/// ```
pub fn fft(input: &[Complex64]) -> crate::Result<Vec<Complex64>> {
    let mut buffer = input.to_vec();
    fft_in_place(&mut buffer)?;
    Ok(buffer)
}

/// Inverse radix-2 FFT, scaled by `1/n`.
///
/// # Errors
/// Returns `Error::InvalidSize` if the input length is zero or not a power
/// of two.
pub fn ifft(input: &[Complex64]) -> crate::Result<Vec<Complex64>> {
    let mut buffer = input.to_vec();
    ifft_in_place(&mut buffer)?;
    Ok(buffer)
}

/// Forward radix-2 FFT of a real signal.
pub fn fft_real(input: &[f32]) -> crate::Result<Vec<Complex64>> {
    let mut buffer: Vec<Complex64> = input
        .iter()
        .map(|&x| Complex64::new(x as f64, 0.0))
        .collect();
    fft_in_place(&mut buffer)?;
    Ok(buffer)
}

/// Forward radix-2 FFT, overwriting `buffer` with its spectrum.
pub fn fft_in_place(buffer: &mut [Complex64]) -> crate::Result<()> {
    radix2(buffer, 1.0)
}

/// Inverse radix-2 FFT, overwriting `buffer` with the scaled result.
pub fn ifft_in_place(buffer: &mut [Complex64]) -> crate::Result<()> {
    radix2(buffer, -1.0)?;
    let scale = 1.0 / buffer.len() as f64;
    for v in buffer.iter_mut() {
        *v *= scale;
    }
    Ok(())
}

/// Iterative decimation-in-time butterfly network.
///
/// After the bit-reversal permutation, each stage of size `len` merges pairs
/// of half-size transforms with `out[i] = even[i] + w^i odd[i]` and
/// `out[i + len/2] = even[i] - w^i odd[i]`.
fn radix2(buffer: &mut [Complex64], sign: f64) -> crate::Result<()> {
    let n = buffer.len();
    crate::utils::valid_power_of_two("fft_length", n)?;
    if n == 1 {
        return Ok(());
    }

    bit_reverse_permute(buffer);

    // Twiddles of the final stage; smaller stages stride through them.
    let half = n / 2;
    let twiddles: Vec<Complex64> = (0..half)
        .map(|k| Complex64::from_polar(1.0, sign * 2.0 * PI * k as f64 / n as f64))
        .collect();

    let mut len = 2;
    while len <= n {
        let half_len = len / 2;
        let stride = n / len;
        for start in (0..n).step_by(len) {
            for i in 0..half_len {
                let even = buffer[start + i];
                let odd = buffer[start + i + half_len] * twiddles[i * stride];
                buffer[start + i] = even + odd;
                buffer[start + i + half_len] = even - odd;
            }
        }
        len *= 2;
    }
    Ok(())
}

fn bit_reverse_permute(buffer: &mut [Complex64]) {
    let n = buffer.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if i < j {
            buffer.swap(i, j);
        }
    }
}

/// Planned real-to-complex FFT of a fixed length.
///
/// The plan is created once and can be shared across threads; every call to
/// [`RealFftPlan::process`] allocates its own buffers.
///
/// # Example
/// ```
/// use timbre::fft::RealFftPlan;
///
/// let plan = RealFftPlan::new(512);
/// let spectrum = plan.process(&vec![1.0f32; 512]).unwrap();
/// assert_eq!(spectrum.len(), 257);
/// ```
pub struct RealFftPlan {
    forward: Arc<dyn RealToComplex<f32>>,
    len: usize,
}

impl RealFftPlan {
    /// Create a plan for real inputs of `len` samples.
    pub fn new(len: usize) -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(len);
        Self { forward, len }
    }

    /// Input length this plan was created for.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the plan is for empty input.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of output bins, `len / 2 + 1`.
    pub fn output_len(&self) -> usize {
        self.len / 2 + 1
    }

    /// Transform one real frame into its non-redundant half spectrum.
    ///
    /// # Errors
    /// Returns `Error::ShapeMismatch` if `input` does not have the planned length.
    pub fn process(&self, input: &[f32]) -> crate::Result<Vec<Complex32>> {
        if input.len() != self.len {
            return Err(crate::Error::ShapeMismatch {
                expected: format!("frame of {} samples", self.len),
                got: format!("{}", input.len()),
            });
        }
        let mut in_buf = input.to_vec();
        let mut out_buf = self.forward.make_output_vec();
        self.forward
            .process(&mut in_buf, &mut out_buf)
            .map_err(|e| crate::Error::ShapeMismatch {
                expected: format!("real FFT buffers of length {}", self.len),
                got: e.to_string(),
            })?;
        Ok(out_buf)
    }
}

#[cfg(feature = "parallel")]
const _: () = {
    fn _assert_send_sync<T: Send + Sync>() {}
    fn _check() {
        _assert_send_sync::<RealFftPlan>();
    }
};

/// Compute the real-to-complex FFT (rfft) of a real-valued input.
///
/// # Returns
/// Complex FFT output of length `input.len() / 2 + 1`; empty for empty input
///
/// # Example
/// ```
/// use timbre::fft::rfft;
///
/// let signal = vec![1.0f32; 1024];
/// let spectrum = rfft(&signal).unwrap();
/// assert_eq!(spectrum.len(), 513); // 1024/2 + 1
/// ```
pub fn rfft(input: &[f32]) -> crate::Result<Vec<Complex32>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    RealFftPlan::new(input.len()).process(input)
}
