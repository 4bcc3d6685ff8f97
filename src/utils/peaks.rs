/// Find local maxima of a 1D signal.
///
/// A sample is a local maximum if it is strictly greater than its left
/// neighbour and the run of equal values it starts is followed by a strictly
/// smaller sample. Flat peaks are reported at the midpoint of the plateau
/// (rounded down). The first and last samples are never peaks.
///
/// # Example
/// ```
/// use timbre::utils::local_maxima;
///
/// let x = vec![0.0, 1.0, 0.0, 2.0, 2.0, 2.0, 0.0];
/// assert_eq!(local_maxima(&x), vec![1, 4]);
/// ```
pub fn local_maxima(x: &[f32]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }

    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

/// Compute the topographic prominence of each peak.
///
/// From each peak the search extends left and right until a strictly
/// higher sample or the signal border is reached. The lowest value on each
/// side is that side's base, and the prominence is the peak height above
/// the higher of the two bases.
pub fn peak_prominences(x: &[f32], peaks: &[usize]) -> Vec<f32> {
    peaks
        .iter()
        .map(|&peak| {
            let height = x[peak];

            let mut left_min = height;
            let mut i = peak;
            loop {
                if x[i] > height {
                    break;
                }
                left_min = left_min.min(x[i]);
                if i == 0 {
                    break;
                }
                i -= 1;
            }

            let mut right_min = height;
            for &v in &x[peak..] {
                if v > height {
                    break;
                }
                right_min = right_min.min(v);
            }

            height - left_min.max(right_min)
        })
        .collect()
}

/// Find peaks whose prominence is at least `min_prominence`.
pub fn find_peaks(x: &[f32], min_prominence: f32) -> Vec<usize> {
    let candidates = local_maxima(x);
    let prominences = peak_prominences(x, &candidates);
    candidates
        .into_iter()
        .zip(prominences)
        .filter(|&(_, p)| p >= min_prominence)
        .map(|(idx, _)| idx)
        .collect()
}

/// Find valleys (local minima) whose depth-prominence is at least
/// `min_prominence`, by peak-picking the negated signal.
///
/// # Example
/// ```
/// use timbre::utils::find_minima;
///
/// let x = vec![3.0, 0.0, 3.0, 2.5, 3.0, 0.0, 3.0];
/// assert_eq!(find_minima(&x, 2.0), vec![1, 5]);
/// ```
pub fn find_minima(x: &[f32], min_prominence: f32) -> Vec<usize> {
    let negated: Vec<f32> = x.iter().map(|&v| -v).collect();
    find_peaks(&negated, min_prominence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_local_maxima_short_input() {
        assert!(local_maxima(&[]).is_empty());
        assert!(local_maxima(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn test_local_maxima_edges_excluded() {
        let x = vec![5.0, 1.0, 2.0, 1.0, 5.0];
        assert_eq!(local_maxima(&x), vec![2]);
    }

    #[test]
    fn test_local_maxima_plateau_at_end_is_not_a_peak() {
        let x = vec![0.0, 1.0, 1.0, 1.0];
        assert!(local_maxima(&x).is_empty());
    }

    #[test]
    fn test_prominence_single_peak() {
        let x = vec![0.0, 1.0, 3.0, 1.0, 2.0, 0.5];
        let peaks = local_maxima(&x);
        assert_eq!(peaks, vec![2, 4]);
        let prom = peak_prominences(&x, &peaks);
        assert_relative_eq!(prom[0], 2.5);
        // Right side reaches the border, the left side is bounded by the higher peak
        assert_relative_eq!(prom[1], 1.0);
    }

    #[test]
    fn test_prominence_equal_neighbours_do_not_stop_search() {
        let x = vec![0.0, 2.0, 1.0, 2.0, 0.0];
        let peaks = local_maxima(&x);
        let prom = peak_prominences(&x, &peaks);
        assert_eq!(prom, vec![2.0, 2.0]);
    }

    #[test]
    fn test_find_minima_filters_shallow_dips() {
        let x = vec![3.0, 0.0, 3.0, 2.5, 3.0, 0.0, 3.0];
        assert_eq!(find_minima(&x, 0.1), vec![1, 3, 5]);
        assert_eq!(find_minima(&x, 2.0), vec![1, 5]);
    }
}
