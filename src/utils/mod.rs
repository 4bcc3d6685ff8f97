mod peaks;
mod validation;

// Peak picking: local extrema and topographic prominence
pub use peaks::{find_minima, find_peaks, local_maxima, peak_prominences};

// Validation operations
pub use validation::{mse, valid_audio, valid_power_of_two, valid_sample_rate};
