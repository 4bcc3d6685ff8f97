use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Compute a symmetric Bartlett (triangular) window.
///
/// The window rises linearly from zero at the first sample to one at the
/// centre and falls back to zero at the last sample.
///
/// # Arguments
/// * `n` - Window length
///
/// # Returns
/// Triangular window of length `n`
pub fn triangular(n: usize) -> Vec<f32> {
    symmetric(n, |x| 1.0 - (2.0 * x - 1.0).abs())
}

/// Compute a symmetric Hamming window.
///
/// # Arguments
/// * `n` - Window length
///
/// # Returns
/// Hamming window of length `n`
pub fn hamming(n: usize) -> Vec<f32> {
    symmetric(n, |x| 0.54 - 0.46 * (2.0 * PI * x).cos())
}

/// Compute a symmetric Hann (raised cosine) window.
///
/// Both end points are exactly zero, which makes it the window of choice for
/// cepstral analysis where leakage from the frame edges would smear the
/// log spectrum.
///
/// # Arguments
/// * `n` - Window length
///
/// # Returns
/// Hann window of length `n`
pub fn hanning(n: usize) -> Vec<f32> {
    symmetric(n, |x| 0.5 - 0.5 * (2.0 * PI * x).cos())
}

/// Compute a symmetric Blackman window.
///
/// # Arguments
/// * `n` - Window length
///
/// # Returns
/// Blackman window of length `n`
pub fn blackman(n: usize) -> Vec<f32> {
    symmetric(n, |x| {
        let a = 2.0 * PI * x;
        0.42 - 0.5 * a.cos() + 0.08 * (2.0 * a).cos()
    })
}

/// Evaluate `f` at `i / (n - 1)` for every sample index.
fn symmetric(n: usize, f: impl Fn(f32) -> f32) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![1.0];
    }
    let m = (n - 1) as f32;
    (0..n).map(|i| f(i as f32 / m)).collect()
}

/// Window kinds supported by the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowType {
    /// No tapering; applying it leaves the frame untouched.
    #[default]
    Rectangular,
    Triangular,
    Hamming,
    Hanning,
    Blackman,
}

impl WindowType {
    /// Every supported window kind, in declaration order.
    pub const ALL: [WindowType; 5] = [
        WindowType::Rectangular,
        WindowType::Triangular,
        WindowType::Hamming,
        WindowType::Hanning,
        WindowType::Blackman,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            WindowType::Rectangular => "rectangular",
            WindowType::Triangular => "triangular",
            WindowType::Hamming => "hamming",
            WindowType::Hanning => "hanning",
            WindowType::Blackman => "blackman",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = crate::Error;

    /// Parse a window name (case-insensitive).
    fn from_str(name: &str) -> crate::Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "rectangular" | "boxcar" => Ok(WindowType::Rectangular),
            "triangular" | "triangle" | "bartlett" => Ok(WindowType::Triangular),
            "hamming" => Ok(WindowType::Hamming),
            "hanning" | "hann" => Ok(WindowType::Hanning),
            "blackman" => Ok(WindowType::Blackman),
            _ => Err(crate::Error::invalid_parameter(
                "window",
                name,
                "unknown window type",
            )),
        }
    }
}

/// Get the coefficients of a window of the specified type and length.
///
/// # Example
/// ```
/// use timbre::window::{get_window, WindowType};
///
/// let w = get_window(WindowType::Hamming, 512);
/// assert_eq!(w.len(), 512);
/// assert!((w[0] - 0.08).abs() < 1e-6);
/// ```
pub fn get_window(window: WindowType, n: usize) -> Vec<f32> {
    match window {
        WindowType::Rectangular => vec![1.0; n],
        WindowType::Triangular => triangular(n),
        WindowType::Hamming => hamming(n),
        WindowType::Hanning => hanning(n),
        WindowType::Blackman => blackman(n),
    }
}

/// Multiply a frame by a window of matching length.
///
/// # Example
/// ```
/// use timbre::window::{apply_window, WindowType};
///
/// let frame = vec![0.5f32, -0.25, 1.0];
/// assert_eq!(apply_window(&frame, WindowType::Rectangular), frame);
/// ```
pub fn apply_window(frame: &[f32], window: WindowType) -> Vec<f32> {
    if window == WindowType::Rectangular {
        return frame.to_vec();
    }
    get_window(window, frame.len())
        .iter()
        .zip(frame)
        .map(|(w, x)| w * x)
        .collect()
}

/// Window every frame of a batch.
pub fn apply_window_frames(frames: &[Vec<f32>], window: WindowType) -> Vec<Vec<f32>> {
    let Some(first) = frames.first() else {
        return Vec::new();
    };
    if window == WindowType::Rectangular {
        return frames.to_vec();
    }
    // Frames from `frame_signal` share one length, so the coefficients are reused.
    let coeffs = get_window(window, first.len());
    frames
        .iter()
        .map(|frame| {
            if frame.len() == coeffs.len() {
                coeffs.iter().zip(frame).map(|(w, x)| w * x).collect()
            } else {
                apply_window(frame, window)
            }
        })
        .collect()
}
