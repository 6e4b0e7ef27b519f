//! Frame record decoder
//!
//! Fields are always read in the order rotation, translation, scale. A field
//! comes from the baseline (frame 0) when the layout marks it constant and a
//! baseline is supplied; frame 0 itself is decoded without one.

use glam::{Mat3, Quat, Vec3};

use super::flags::{
    AxisTrack, ChannelLayout, JointLayout, RotationForm, RotationTrack, ScaleTrack,
    TranslationTrack,
};
use crate::half_float::FieldReader;
use crate::joint::JointParams;

/// Rotation whose +Z axis points along `forward` with +Y as the up hint.
///
/// `forward` must not be parallel to `up`.
pub fn quat_from_look_at(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize();
    let x = up.cross(z).normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Rotation for an upright heading angle: +Z turned to (cos a, 0, sin a).
#[inline]
pub fn upright_rotation(angle: f32) -> Quat {
    let (sin, cos) = angle.sin_cos();
    quat_from_look_at(Vec3::new(cos, 0.0, sin), Vec3::Y)
}

/// Decode one joint frame record.
///
/// `data` is exactly the frame's bytes. Pass `baseline: None` for frame 0 and
/// the decoded frame 0 for every later frame.
pub fn decode_joint_params(
    layout: &JointLayout,
    data: &[u8],
    baseline: Option<&JointParams>,
) -> JointParams {
    let mut reader = FieldReader::new(data, layout.precision);

    // Baseline rotations were normalized when frame 0 was decoded
    let rotation = match (layout.rotation, baseline) {
        (RotationTrack::Constant(_), Some(base)) => base.rotation,
        (track, _) => {
            let packed = match track.form() {
                RotationForm::Upright => upright_rotation(reader.read()),
                RotationForm::Quaternion => {
                    let x = reader.read();
                    let y = reader.read();
                    let z = reader.read();
                    let w = reader.read();
                    Quat::from_xyzw(x, y, z, w)
                }
            };
            packed.normalize()
        }
    };

    let translation = match (layout.translation, baseline) {
        (TranslationTrack::Constant, Some(base)) => base.translation,
        (TranslationTrack::ConstantY, Some(base)) => {
            let x = reader.read();
            let z = reader.read();
            Vec3::new(x, base.translation.y, z)
        }
        _ => {
            let x = reader.read();
            let y = reader.read();
            let z = reader.read();
            Vec3::new(x, y, z)
        }
    };

    let scale = match (layout.scale, baseline) {
        (ScaleTrack::Constant, Some(base)) => base.scale,
        (ScaleTrack::Animated(axes), Some(base)) => {
            let mut scale = base.scale;
            for (axis, track) in axes.iter().enumerate() {
                if let AxisTrack::Animated = track {
                    scale[axis] = reader.read();
                }
            }
            scale
        }
        (_, None) => {
            let x = reader.read();
            let y = reader.read();
            let z = reader.read();
            Vec3::new(x, y, z)
        }
    };

    debug_assert!(
        reader.offset() <= reader.len(),
        "decoded {} bytes from a {} byte frame",
        reader.offset(),
        reader.len()
    );

    JointParams {
        rotation,
        translation,
        scale,
    }
}

/// Decode a frame of any channel as a joint transform.
///
/// Float channels hold no transform; asserts in debug builds and returns
/// identity otherwise.
pub fn decode_frame(
    layout: &ChannelLayout,
    data: &[u8],
    baseline: Option<&JointParams>,
) -> JointParams {
    match layout {
        ChannelLayout::Joint(joint) => decode_joint_params(joint, data, baseline),
        ChannelLayout::Float => {
            debug_assert!(false, "trying to decode joint params from a float channel");
            JointParams::IDENTITY
        }
    }
}

/// Decode one scalar frame record.
///
/// Joint channels hold no scalar; asserts in debug builds and returns 0.0
/// otherwise.
pub fn decode_float(layout: &ChannelLayout, data: &[u8]) -> f32 {
    match layout {
        ChannelLayout::Float => FieldReader::new(data, super::Precision::Half).read_f16(),
        ChannelLayout::Joint(_) => {
            debug_assert!(false, "trying to decode float data from a joint channel");
            0.0
        }
    }
}
