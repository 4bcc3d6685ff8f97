//! Frame-level acoustic features.
//!
//! - [`basic`]: time-domain descriptors (zero-crossing rate, RMS, short-time energy)
//! - [`spectral`]: descriptors of magnitude spectra (volume, centroid,
//!   effective bandwidth, band energy ratio, flatness, crest)

pub mod basic;
pub mod spectral;
