//! Compressed channel record format
//!
//! One record holds one channel of one clip: either a joint transform per
//! frame or a scalar per frame. POD format with minimal header - no magic bytes.
//!
//! # Layout
//! ```text
//! Header (4 bytes):
//! 0x00: sample_count u16 LE  - Number of frames (min 1)
//! 0x02: flags u16 LE         - Encoding flags (FLAG_*)
//!
//! Data:
//! frame 0        - full width: rotation, translation, scale
//! frames 1..N-1  - reduced width: fields marked constant are omitted
//! ```
//!
//! Each field is binary16, or binary32 with `FLAG_32BIT_FLOATS`. Rotation is
//! four components (x, y, z, w) or, with `FLAG_UPRIGHT_ROTATION`, one heading
//! angle around +Y. Float channels store one binary16 per frame.
//!
//! Data size is always
//! `frame_size(flags, true) + frame_size(flags, false) * (sample_count - 1)`.

mod decode;
mod encode;
mod flags;
mod header;
mod layout;
mod record;
mod sample;
mod serialization;

#[cfg(test)]
mod tests;

// Re-export public API
pub use decode::{
    decode_float, decode_frame, decode_joint_params, quat_from_look_at, upright_rotation,
};
pub use encode::{
    encode_channel, encode_float_channel, encode_joint_params, infer_constant_flags,
    upright_angle,
};
pub use flags::{
    AxisTrack, ChannelLayout, FLAG_32BIT_FLOATS, FLAG_ALL, FLAG_CONSTANT_ROTATION,
    FLAG_CONSTANT_SCALE, FLAG_CONSTANT_SCALE_X, FLAG_CONSTANT_SCALE_Y, FLAG_CONSTANT_SCALE_Z,
    FLAG_CONSTANT_TRANSLATION, FLAG_CONSTANT_Y_TRANSLATION, FLAG_FLOAT_CHANNEL,
    FLAG_UPRIGHT_ROTATION, JointLayout, Precision, RotationForm, RotationTrack, ScaleTrack,
    TranslationTrack,
};
pub use header::ChannelHeader;
pub use layout::{FLOAT_FRAME_SIZE, data_size, frame_size};
pub use record::CompressedChannel;
pub use sample::{read_float_sample, read_sample};
pub use serialization::BinarySerializable;
