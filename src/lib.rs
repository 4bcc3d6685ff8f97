//! Acoustic feature extraction for mono speech and music signals.
//!
//! Timbre turns a normalized mono signal into frame-level descriptors:
//! fundamental frequency by cepstral, AMDF and autocorrelation analysis,
//! spectral shape descriptors and silence / voiced / unvoiced segmentation.
//!
//! # Features
//!
//! - **Framing & windows**: power-of-two frame lengths from a minimum
//!   duration, end-padded overlapping frames, rectangular / triangular /
//!   Hamming / Hann / Blackman windows
//! - **Transforms**: radix-2 complex FFT/IFFT and planned real FFTs for
//!   batch magnitude spectra
//! - **Pitch**: real cepstrum, average magnitude difference function,
//!   smoothed autocorrelation
//! - **Spectral features**: volume, centroid, effective bandwidth, band
//!   energy ratio, flatness and crest factor over telephony bands
//! - **Time-domain features**: zero-crossing rate, RMS, short-time energy,
//!   voice activity segmentation
//!
//! # Quick Start
//!
//! ```rust
//! use timbre::{analysis, io, segment};
//!
//! // A 250 Hz pulse train, one second at 16 kHz
//! let y = io::pulse_train(64, 16000);
//!
//! let config = analysis::AnalysisConfig::pitch();
//! let f0 = analysis::f0_track(&y, 16000, &config, analysis::PitchMethod::Cepstral).unwrap();
//! assert!((f0.values[1] - 250.0).abs() < 12.5);
//!
//! let activity = segment::segment_voice_activity(&y, &Default::default()).unwrap();
//! assert_eq!(activity.segments.len(), 256);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`frame`] | Frame length selection, framing, frame times |
//! | [`window`] | Window functions and the closed [`window::WindowType`] enum |
//! | [`fft`] | Radix-2 FFT/IFFT and real-input FFT plans |
//! | [`spectrum`] | Batch magnitude spectra, decibels, frequency bands |
//! | [`pitch`] | Cepstral, AMDF and autocorrelation F0 estimators |
//! | [`feature`] | Spectral and time-domain frame descriptors |
//! | [`segment`] | Silence / voiced / unvoiced classification |
//! | [`analysis`] | Whole-signal feature tracks from one configuration |
//! | [`io`] | WAV loading and synthetic test signals |
//! | [`utils`] | Peak picking and input validation |
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Invalid parameters fail immediately;
//! numerically degenerate frames (silence, empty bands) yield defined
//! fallback values instead of errors.
//!
//! # Feature Flags
//!
//! | Flag | Description |
//! |------|-------------|
//! | `parallel` | Per-frame spectra and pitch tracks computed with rayon |

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Result};

pub mod analysis;
pub mod feature;
pub mod fft;
pub mod frame;
pub mod io;
pub mod pitch;
pub mod segment;
pub mod signal;
pub mod spectrum;
pub mod utils;
pub mod window;

pub use signal::Signal;
