/// Choose the analysis frame length for a sample rate.
///
/// Starting from one sample, the length doubles until the frame lasts at
/// least `min_frame_duration` seconds, so the result is always a power of
/// two and can be fed straight into [`crate::fft::fft`].
///
/// # Arguments
/// * `sr` - Sample rate in Hz
/// * `min_frame_duration` - Minimum frame duration in seconds
///
/// # Errors
/// Returns `Error::InvalidParameter` if `sr` is zero or the duration is not
/// a positive finite number.
///
/// # Example
/// ```
/// use timbre::frame::frame_length;
///
/// assert_eq!(frame_length(16000, 0.02).unwrap(), 512);
/// ```
pub fn frame_length(sr: u32, min_frame_duration: f32) -> crate::Result<usize> {
    crate::utils::valid_sample_rate(sr)?;
    if !min_frame_duration.is_finite() || min_frame_duration <= 0.0 {
        return Err(crate::Error::invalid_parameter(
            "min_frame_duration",
            min_frame_duration,
            "must be a positive number of seconds",
        ));
    }

    // Compare in the caller's precision so that a duration landing exactly
    // on a power of two selects that length
    let mut length = 1usize;
    while (length as f32) / (sr as f32) < min_frame_duration {
        length *= 2;
    }
    Ok(length)
}

/// Compute the hop (stride) between consecutive frames.
///
/// `hop = floor(frame_length * (1 - overlap))`
///
/// # Errors
/// Returns `Error::InvalidParameter` if `overlap` is outside `[0, 1)` or the
/// resulting hop would be zero.
pub fn hop_length(frame_length: usize, overlap: f32) -> crate::Result<usize> {
    if frame_length == 0 {
        return Err(crate::Error::InvalidSize {
            name: "frame_length",
            value: 0,
            reason: "must be > 0",
        });
    }
    if !(0.0..1.0).contains(&overlap) {
        return Err(crate::Error::invalid_parameter(
            "overlap",
            overlap,
            "must be in [0, 1)",
        ));
    }
    let hop = (frame_length as f64 * (1.0 - overlap as f64)).floor() as usize;
    if hop == 0 {
        return Err(crate::Error::invalid_parameter(
            "overlap",
            overlap,
            format!("leaves no hop for frame_length {frame_length}"),
        ));
    }
    Ok(hop)
}

/// Number of frames `frame_signal` produces for a signal of `len` samples.
pub fn frame_count(len: usize, frame_length: usize, hop_length: usize) -> usize {
    if len == 0 || frame_length == 0 || hop_length == 0 {
        return 0;
    }
    if len <= frame_length {
        return 1;
    }
    (len - frame_length).div_ceil(hop_length) + 1
}

/// Frame a signal into fixed-length, possibly overlapping windows.
///
/// The end of the signal is zero-padded so that the last frame is full
/// length: after padding, `(padded_len - frame_length)` is a multiple of the
/// hop. A signal shorter than one frame becomes a single padded frame; an
/// empty signal yields no frames.
///
/// # Arguments
/// * `y` - Input audio signal
/// * `frame_length` - Length of each frame
/// * `overlap` - Fraction of each frame shared with the next, in `[0, 1)`
///
/// # Returns
/// Vector of frames, each of exactly `frame_length` samples
///
/// # Example
/// ```
/// use timbre::frame::frame_signal;
///
/// let signal = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let frames = frame_signal(&signal, 4, 0.5).unwrap();
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[1], vec![3.0, 4.0, 5.0, 6.0]);
/// ```
pub fn frame_signal(
    y: &[f32],
    frame_length: usize,
    overlap: f32,
) -> crate::Result<Vec<Vec<f32>>> {
    let hop = hop_length(frame_length, overlap)?;
    let n_frames = frame_count(y.len(), frame_length, hop);
    if n_frames == 0 {
        return Ok(Vec::new());
    }

    let padded_len = (n_frames - 1) * hop + frame_length;
    let mut padded = vec![0.0f32; padded_len];
    padded[..y.len()].copy_from_slice(y);

    Ok(padded
        .windows(frame_length)
        .step_by(hop)
        .map(|w| w.to_vec())
        .collect())
}

/// Start time in seconds of each frame.
///
/// Frame `i` corresponds to `i * hop_length / sr`.
pub fn frame_times(n_frames: usize, hop_length: usize, sr: u32) -> Vec<f32> {
    if sr == 0 {
        return vec![0.0; n_frames];
    }
    (0..n_frames)
        .map(|i| (i * hop_length) as f32 / sr as f32)
        .collect()
}

/// Split `len` samples into `n` contiguous, nearly equal parts.
///
/// The first `len % n` parts receive one extra sample. Parts may be empty
/// when `n > len`.
///
/// # Returns
/// `(start, end)` index pairs with exclusive `end`, covering `0..len`
///
/// # Example
/// ```
/// use timbre::frame::split_equal;
///
/// assert_eq!(split_equal(10, 3).unwrap(), vec![(0, 4), (4, 7), (7, 10)]);
/// ```
pub fn split_equal(len: usize, n: usize) -> crate::Result<Vec<(usize, usize)>> {
    if n == 0 {
        return Err(crate::Error::InvalidSize {
            name: "n_parts",
            value: 0,
            reason: "must be > 0",
        });
    }
    let base = len / n;
    let extra = len % n;
    let mut bounds = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let size = base + usize::from(i < extra);
        bounds.push((start, start + size));
        start += size;
    }
    Ok(bounds)
}
