//! Sample reader
//!
//! Frame 0 is decoded on every read: later frames inherit their constant
//! fields from it, and nothing decoded here is cached across calls.

use super::decode::{decode_float, decode_frame};
use super::record::CompressedChannel;
use crate::joint::JointParams;

/// Decode frame `sample_index` of a joint channel.
///
/// # Panics
/// Panics if `sample_index >= channel.sample_count()`.
pub fn read_sample(channel: &CompressedChannel, sample_index: u16) -> JointParams {
    let layout = channel.layout();
    let first = decode_frame(layout, channel.frame_bytes(0), None);

    if sample_index == 0 || channel.frame_size() == 0 {
        debug_assert!(sample_index < channel.sample_count());
        return first;
    }

    decode_frame(layout, channel.frame_bytes(sample_index), Some(&first))
}

/// Decode frame `sample_index` of a float channel.
///
/// Frame 0 is decoded up front even when another frame is requested, the
/// same as the joint path.
///
/// # Panics
/// Panics if `sample_index >= channel.sample_count()`.
pub fn read_float_sample(channel: &CompressedChannel, sample_index: u16) -> f32 {
    let layout = channel.layout();
    let first = decode_float(layout, channel.frame_bytes(0));

    if sample_index == 0 || channel.frame_size() == 0 {
        debug_assert!(sample_index < channel.sample_count());
        return first;
    }

    decode_float(layout, channel.frame_bytes(sample_index))
}
