//! Frame record encoder
//!
//! Writes exactly the layout [`decode_joint_params`](super::decode_joint_params)
//! reads. Constant fields are taken from frame 0 by the decoder, so whatever
//! later frames hold for them is never written.

use glam::{Quat, Vec3};

use super::flags::{
    AxisTrack, ChannelLayout, FLAG_CONSTANT_ROTATION, FLAG_CONSTANT_SCALE, FLAG_CONSTANT_SCALE_X,
    FLAG_CONSTANT_SCALE_Y, FLAG_CONSTANT_SCALE_Z, FLAG_CONSTANT_TRANSLATION,
    FLAG_CONSTANT_Y_TRANSLATION, FLAG_FLOAT_CHANNEL, JointLayout, RotationForm, RotationTrack,
    ScaleTrack, TranslationTrack,
};
use super::record::CompressedChannel;
use crate::error::ChannelFormatError;
use crate::half_float::FieldWriter;
use crate::joint::JointParams;

/// Heading angle of a rotation around +Y.
///
/// Inverse of [`upright_rotation`](super::decode::upright_rotation) for
/// rotations that only turn around the up axis.
pub fn upright_angle(rotation: Quat) -> f32 {
    let forward = rotation * Vec3::Z;
    forward.z.atan2(forward.x)
}

/// Append one joint frame record to `out`.
pub fn encode_joint_params(
    layout: &JointLayout,
    params: &JointParams,
    first_frame: bool,
    out: &mut Vec<u8>,
) {
    let mut writer = FieldWriter::new(out, layout.precision);

    if first_frame || matches!(layout.rotation, RotationTrack::Animated(_)) {
        match layout.rotation.form() {
            RotationForm::Upright => writer.write(upright_angle(params.rotation)),
            RotationForm::Quaternion => {
                let q = params.rotation;
                writer.write(q.x);
                writer.write(q.y);
                writer.write(q.z);
                writer.write(q.w);
            }
        }
    }

    let t = params.translation;
    match (layout.translation, first_frame) {
        (_, true) | (TranslationTrack::Animated, false) => {
            writer.write(t.x);
            writer.write(t.y);
            writer.write(t.z);
        }
        (TranslationTrack::ConstantY, false) => {
            writer.write(t.x);
            writer.write(t.z);
        }
        (TranslationTrack::Constant, false) => {}
    }

    let s = params.scale;
    match (layout.scale, first_frame) {
        (_, true) => {
            writer.write(s.x);
            writer.write(s.y);
            writer.write(s.z);
        }
        (ScaleTrack::Constant, false) => {}
        (ScaleTrack::Animated(axes), false) => {
            for (axis, track) in axes.iter().enumerate() {
                if let AxisTrack::Animated = track {
                    writer.write(s[axis]);
                }
            }
        }
    }
}

/// Encode a joint channel from one transform per frame.
///
/// `flags` must describe a joint layout; the float bit is rejected as
/// [`ChannelFormatError::UnknownFlags`].
pub fn encode_channel(
    flags: u16,
    frames: &[JointParams],
) -> Result<CompressedChannel, ChannelFormatError> {
    let layout = match ChannelLayout::from_flags(flags) {
        ChannelLayout::Joint(layout) => layout,
        ChannelLayout::Float => return Err(ChannelFormatError::UnknownFlags(flags)),
    };
    let sample_count = sample_count(frames.len())?;

    let mut data = Vec::with_capacity(ChannelLayout::Joint(layout).data_size(sample_count));
    for (index, frame) in frames.iter().enumerate() {
        encode_joint_params(&layout, frame, index == 0, &mut data);
    }

    CompressedChannel::new(sample_count, flags, data)
}

/// Encode a float channel from one value per frame.
pub fn encode_float_channel(values: &[f32]) -> Result<CompressedChannel, ChannelFormatError> {
    let sample_count = sample_count(values.len())?;

    let mut data = Vec::with_capacity(values.len() * 2);
    let mut writer = FieldWriter::new(&mut data, super::Precision::Half);
    for &value in values {
        writer.write_f16(value);
    }

    CompressedChannel::new(sample_count, FLAG_FLOAT_CHANNEL, data)
}

fn sample_count(len: usize) -> Result<u16, ChannelFormatError> {
    match u16::try_from(len) {
        Ok(0) => Err(ChannelFormatError::NoSamples),
        Ok(count) => Ok(count),
        Err(_) => Err(ChannelFormatError::SizeMismatch {
            expected: u16::MAX as usize,
            actual: len,
        }),
    }
}

/// Constant-field flags that hold for every frame within `tolerance`.
///
/// Compares each frame against frame 0. Rotations are compared by
/// `1 - |dot|` so `q` and `-q` count as equal.
pub fn infer_constant_flags(frames: &[JointParams], tolerance: f32) -> u16 {
    let Some((first, rest)) = frames.split_first() else {
        return 0;
    };

    let mut rotation = true;
    let mut translation = true;
    let mut translation_y = true;
    let mut scale_axes = [true; 3];

    for frame in rest {
        rotation &= 1.0 - first.rotation.dot(frame.rotation).abs() <= tolerance;
        let dt = (frame.translation - first.translation).abs();
        translation &= dt.max_element() <= tolerance;
        translation_y &= dt.y <= tolerance;
        let ds = (frame.scale - first.scale).abs();
        for (axis, constant) in scale_axes.iter_mut().enumerate() {
            *constant &= ds[axis] <= tolerance;
        }
    }

    let mut flags = 0;
    if rotation {
        flags |= FLAG_CONSTANT_ROTATION;
    }
    if translation {
        flags |= FLAG_CONSTANT_TRANSLATION;
    } else if translation_y {
        flags |= FLAG_CONSTANT_Y_TRANSLATION;
    }
    if scale_axes.iter().all(|&c| c) {
        flags |= FLAG_CONSTANT_SCALE;
    } else {
        for (constant, bit) in scale_axes.into_iter().zip([
            FLAG_CONSTANT_SCALE_X,
            FLAG_CONSTANT_SCALE_Y,
            FLAG_CONSTANT_SCALE_Z,
        ]) {
            if constant {
                flags |= bit;
            }
        }
    }
    flags
}
