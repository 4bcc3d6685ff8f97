//! Voice Activity Example
//!
//! Builds a signal of a voiced-like low tone, a pause and a hiss-like high
//! tone, then labels each part as silent, voiced or unvoiced.

use log::info;
use timbre::io;
use timbre::segment::{segment_voice_activity, SegmentationConfig};

fn main() {
    env_logger::init();
    info!("Voice Activity Example");

    let sr = 16000u32;
    let mut y = io::tone(140.0, sr, 0.8);
    y.extend(vec![0.0; (0.5 * sr as f32) as usize]);
    y.extend(io::tone(5000.0, sr, 0.4).iter().map(|v| 0.3 * v));
    info!("Signal: {} samples ({:.2} s)", y.len(), y.len() as f32 / sr as f32);

    let config = SegmentationConfig::default().with_n_frames(34);
    let activity = segment_voice_activity(&y, &config).unwrap();

    info!("Silence ratio: {:.2}", activity.silence_ratio);
    info!(
        "Parts: {} voiced, {} unvoiced, {} silent",
        activity.voiced.len(),
        activity.unvoiced.len(),
        activity.silent.len()
    );
    for segment in &activity.segments {
        info!(
            "  {:6.3}s - {:6.3}s  {}",
            segment.start as f32 / sr as f32,
            segment.end as f32 / sr as f32,
            segment.label
        );
    }
}
