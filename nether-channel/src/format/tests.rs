//! Tests for the channel record format

use glam::{Quat, Vec3};

use super::*;
use crate::error::ChannelFormatError;
use crate::joint::JointParams;

// ========================================================================
// Helpers
// ========================================================================

fn assert_joint_close(actual: &JointParams, expected: &JointParams, what: &str) {
    let dot = actual.rotation.dot(expected.rotation).abs();
    let trans_error = actual.translation.distance(expected.translation);
    let scale_error = actual.scale.distance(expected.scale);
    assert!(dot >= 0.999, "{}: quat dot = {}", what, dot);
    assert!(trans_error < 1e-3, "{}: translation error = {}", what, trans_error);
    assert!(scale_error < 1e-3, "{}: scale error = {}", what, scale_error);
}

/// Frames that honour every constant bit in `flags` and stay within
/// binary16's comfortable range.
fn frames_for_flags(flags: u16, count: usize) -> Vec<JointParams> {
    let has = |bit: u16| flags & bit != 0;
    (0..count)
        .map(|i| {
            let f = i as f32;
            let rot_t = if has(FLAG_CONSTANT_ROTATION) { 0.0 } else { f };
            let rotation = if has(FLAG_UPRIGHT_ROTATION) {
                Quat::from_rotation_y(0.4 + 0.3 * rot_t)
            } else {
                Quat::from_euler(glam::EulerRot::YXZ, 0.2 * rot_t, 0.1 + 0.05 * rot_t, -0.3)
            };

            let trans_t = if has(FLAG_CONSTANT_TRANSLATION) { 0.0 } else { f };
            let y_t = if has(FLAG_CONSTANT_Y_TRANSLATION) { 0.0 } else { trans_t };
            let translation =
                Vec3::new(0.1 * trans_t - 0.5, 0.25 + 0.05 * y_t, 0.7 - 0.1 * trans_t);

            let all_scale = has(FLAG_CONSTANT_SCALE);
            let axis_t = |bit: u16| if all_scale || has(bit) { 0.0 } else { f };
            let scale = Vec3::new(
                0.5 + 0.05 * axis_t(FLAG_CONSTANT_SCALE_X),
                0.6 + 0.04 * axis_t(FLAG_CONSTANT_SCALE_Y),
                0.9 - 0.03 * axis_t(FLAG_CONSTANT_SCALE_Z),
            );

            JointParams::new(rotation, translation, scale)
        })
        .collect()
}

/// Every joint flag combination (float bit clear)
fn joint_flag_combinations() -> impl Iterator<Item = u16> {
    (0..=FLAG_ALL).filter(|flags| flags & FLAG_FLOAT_CHANNEL == 0)
}

// ========================================================================
// Header Tests
// ========================================================================

#[test]
fn test_channel_header_roundtrip() {
    let header = ChannelHeader::new(90, FLAG_UPRIGHT_ROTATION | FLAG_CONSTANT_SCALE);
    let bytes = header.to_bytes();
    assert_eq!(bytes.len(), ChannelHeader::SIZE);

    let parsed = ChannelHeader::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, header);
}

#[test]
fn test_channel_header_validation() {
    assert_eq!(ChannelHeader::new(10, 0).validate(), Ok(()));
    assert_eq!(
        ChannelHeader::new(0, 0).validate(),
        Err(ChannelFormatError::NoSamples)
    );
    assert_eq!(
        ChannelHeader::new(10, 0x8000).validate(),
        Err(ChannelFormatError::UnknownFlags(0x8000))
    );
}

#[test]
fn test_channel_header_record_size() {
    // Half quaternion channel: 20 bytes per frame
    let header = ChannelHeader::new(60, 0);
    assert_eq!(header.data_size(), 60 * 20);
    assert_eq!(header.record_size(), 4 + 60 * 20);
}

// ========================================================================
// Size Calculator Tests
// ========================================================================

#[test]
fn test_frame_sizes_half() {
    assert_eq!(frame_size(0, true), 8 + 6 + 6);
    assert_eq!(frame_size(0, false), 8 + 6 + 6);
    assert_eq!(frame_size(FLAG_UPRIGHT_ROTATION, false), 2 + 6 + 6);
    assert_eq!(frame_size(FLAG_CONSTANT_ROTATION, true), 8 + 6 + 6);
    assert_eq!(frame_size(FLAG_CONSTANT_ROTATION, false), 6 + 6);
    assert_eq!(frame_size(FLAG_CONSTANT_Y_TRANSLATION, false), 8 + 4 + 6);
    assert_eq!(
        frame_size(FLAG_CONSTANT_TRANSLATION | FLAG_CONSTANT_Y_TRANSLATION, false),
        8 + 6
    );
    assert_eq!(frame_size(FLAG_CONSTANT_SCALE_X, false), 8 + 6 + 4);
    assert_eq!(frame_size(FLAG_CONSTANT_SCALE_X, true), 8 + 6 + 6);
    assert_eq!(
        frame_size(FLAG_CONSTANT_SCALE | FLAG_CONSTANT_SCALE_Y, false),
        8 + 6
    );
}

#[test]
fn test_frame_sizes_full() {
    let full = FLAG_32BIT_FLOATS;
    assert_eq!(frame_size(full, true), 16 + 12 + 12);
    assert_eq!(frame_size(full | FLAG_UPRIGHT_ROTATION, true), 4 + 12 + 12);
    assert_eq!(frame_size(full | FLAG_CONSTANT_Y_TRANSLATION, false), 16 + 8 + 12);
    assert_eq!(
        frame_size(
            full | FLAG_CONSTANT_SCALE_X | FLAG_CONSTANT_SCALE_Z,
            false
        ),
        16 + 12 + 4
    );
}

#[test]
fn test_fully_constant_channel_has_empty_later_frames() {
    let flags = FLAG_CONSTANT_ROTATION | FLAG_CONSTANT_TRANSLATION | FLAG_CONSTANT_SCALE;
    assert_eq!(frame_size(flags, false), 0);
    assert_eq!(data_size(flags, 500), frame_size(flags, true));
}

#[test]
fn test_float_frame_size_ignores_other_flags() {
    for flags in [
        FLAG_FLOAT_CHANNEL,
        FLAG_FLOAT_CHANNEL | FLAG_32BIT_FLOATS,
        FLAG_FLOAT_CHANNEL | FLAG_CONSTANT_ROTATION | FLAG_UPRIGHT_ROTATION,
    ] {
        assert_eq!(frame_size(flags, true), FLOAT_FRAME_SIZE);
        assert_eq!(frame_size(flags, false), FLOAT_FRAME_SIZE);
    }
}

#[test]
fn test_size_additivity() {
    for flags in 0..=FLAG_ALL {
        for sample_count in [1u16, 2, 3, 17, 240] {
            let expected = frame_size(flags, true)
                + frame_size(flags, false) * (sample_count as usize - 1);
            assert_eq!(
                data_size(flags, sample_count),
                expected,
                "flags {:#06x}, {} samples",
                flags,
                sample_count
            );
        }
    }
}

#[test]
fn test_layout_flags_canonical() {
    for flags in joint_flag_combinations() {
        let layout = ChannelLayout::from_flags(flags);
        assert_eq!(ChannelLayout::from_flags(layout.to_flags()), layout);
    }
    assert_eq!(ChannelLayout::from_flags(FLAG_FLOAT_CHANNEL | 0x3FE), ChannelLayout::Float);
}

// ========================================================================
// Record Tests
// ========================================================================

#[test]
fn test_record_rejects_bad_input() {
    assert_eq!(
        CompressedChannel::new(0, 0, Vec::new()),
        Err(ChannelFormatError::NoSamples)
    );
    assert_eq!(
        CompressedChannel::new(1, 0x4000, vec![0u8; 20]),
        Err(ChannelFormatError::UnknownFlags(0x4000))
    );
    assert_eq!(
        CompressedChannel::new(2, 0, vec![0u8; 39]),
        Err(ChannelFormatError::SizeMismatch {
            expected: 40,
            actual: 39
        })
    );
}

#[test]
fn test_record_bytes_roundtrip() {
    let flags = FLAG_CONSTANT_Y_TRANSLATION | FLAG_CONSTANT_SCALE_Z;
    let channel = encode_channel(flags, &frames_for_flags(flags, 5)).unwrap();

    let mut bytes = channel.to_bytes();
    assert_eq!(bytes.len(), channel.header().record_size());
    bytes.extend_from_slice(&[0xAA, 0xBB]);

    let (parsed, consumed) = CompressedChannel::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, channel);
    assert_eq!(consumed, bytes.len() - 2);
}

#[test]
fn test_record_from_bytes_checks_header_first() {
    // No data follows, but a bad header is reported as such
    let unknown = ChannelHeader::new(3, 0x4000).to_bytes();
    assert_eq!(
        CompressedChannel::from_bytes(&unknown),
        Err(ChannelFormatError::UnknownFlags(0x4000))
    );

    let empty = ChannelHeader::new(0, 0).to_bytes();
    assert_eq!(
        CompressedChannel::from_bytes(&empty),
        Err(ChannelFormatError::NoSamples)
    );
}

#[test]
fn test_record_from_truncated_bytes() {
    let channel = encode_float_channel(&[1.0, 2.0, 3.0]).unwrap();
    let bytes = channel.to_bytes();

    assert_eq!(
        CompressedChannel::from_bytes(&bytes[..2]),
        Err(ChannelFormatError::Truncated {
            expected: 4,
            actual: 2
        })
    );
    assert_eq!(
        CompressedChannel::from_bytes(&bytes[..bytes.len() - 1]),
        Err(ChannelFormatError::Truncated {
            expected: bytes.len(),
            actual: bytes.len() - 1
        })
    );
}

#[test]
fn test_encode_rejects_float_flags_and_empty() {
    let frames = frames_for_flags(0, 2);
    assert!(encode_channel(FLAG_FLOAT_CHANNEL, &frames).is_err());
    assert_eq!(encode_channel(0, &[]), Err(ChannelFormatError::NoSamples));
    assert_eq!(encode_float_channel(&[]), Err(ChannelFormatError::NoSamples));
}

// ========================================================================
// Decode Tests
// ========================================================================

#[test]
fn test_roundtrip_every_joint_layout() {
    for flags in joint_flag_combinations() {
        let frames = frames_for_flags(flags, 4);
        let channel = encode_channel(flags, &frames).unwrap();
        for (index, expected) in frames.iter().enumerate() {
            let decoded = read_sample(&channel, index as u16);
            assert_joint_close(
                &decoded,
                expected,
                &format!("flags {:#06x} sample {}", flags, index),
            );
        }
    }
}

#[test]
fn test_decoded_rotation_is_normalized() {
    for flags in joint_flag_combinations() {
        let channel = encode_channel(flags, &frames_for_flags(flags, 3)).unwrap();
        for index in 0..3 {
            let length = read_sample(&channel, index).rotation.length();
            assert!(
                (length - 1.0).abs() < 1e-5,
                "flags {:#06x} sample {}: |q| = {}",
                flags,
                index,
                length
            );
        }
    }
}

#[test]
fn test_unnormalized_input_is_renormalized() {
    let frame = JointParams::new(Quat::from_xyzw(0.0, 0.0, 0.0, 2.0), Vec3::ZERO, Vec3::ONE);
    let channel = encode_channel(FLAG_32BIT_FLOATS, &[frame]).unwrap();
    let decoded = read_sample(&channel, 0);
    assert_eq!(decoded.rotation, Quat::IDENTITY);
}

#[test]
fn test_constant_rotation_inherits_baseline() {
    let flags = FLAG_CONSTANT_ROTATION;
    let mut frames = frames_for_flags(0, 6);
    // Later rotations differ but are never stored
    frames[3].rotation = Quat::from_rotation_z(1.0);

    let channel = encode_channel(flags, &frames).unwrap();
    let first = read_sample(&channel, 0).rotation;
    for index in 0..6 {
        assert_eq!(read_sample(&channel, index).rotation, first);
    }
}

#[test]
fn test_constant_y_translation_inherits_baseline_y() {
    let mut frames = frames_for_flags(0, 3);
    frames[2].translation.y = 0.9;

    let channel = encode_channel(FLAG_CONSTANT_Y_TRANSLATION, &frames).unwrap();
    let first = read_sample(&channel, 0);
    let last = read_sample(&channel, 2);
    assert_eq!(last.translation.y, first.translation.y);
    assert!((last.translation.x - frames[2].translation.x).abs() < 1e-3);
    assert!((last.translation.z - frames[2].translation.z).abs() < 1e-3);
}

#[test]
fn test_constant_scale_axis_inherits_baseline_axis() {
    let frames = vec![
        JointParams::new(Quat::IDENTITY, Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)),
        JointParams::new(Quat::IDENTITY, Vec3::ZERO, Vec3::new(0.5, 0.25, 0.75)),
    ];
    let channel = encode_channel(FLAG_CONSTANT_SCALE_Y, &frames).unwrap();
    assert_eq!(channel.frame_size(), 8 + 6 + 4);

    let decoded = read_sample(&channel, 1);
    assert_eq!(decoded.scale, Vec3::new(0.5, 2.0, 0.75));
}

#[test]
fn test_fully_constant_channel_returns_baseline() {
    let flags = FLAG_CONSTANT_ROTATION | FLAG_CONSTANT_TRANSLATION | FLAG_CONSTANT_SCALE;
    let frames = frames_for_flags(flags, 10);
    let channel = encode_channel(flags, &frames).unwrap();

    assert_eq!(channel.data().len(), channel.first_frame_size());
    let first = read_sample(&channel, 0);
    assert_eq!(read_sample(&channel, 9), first);
}

#[test]
fn test_upright_rotation_heading() {
    // Heading 0 turns +Z onto +X
    let q = upright_rotation(0.0);
    assert!((q * Vec3::Z).distance(Vec3::X) < 1e-5);
    assert!((q * Vec3::Y).distance(Vec3::Y) < 1e-5);

    for angle in [-3.0f32, -1.0, 0.0, 0.5, 2.5] {
        let back = upright_angle(upright_rotation(angle));
        assert!((back - angle).abs() < 1e-4, "{} -> {}", angle, back);
    }
}

#[test]
fn test_two_sample_half_scenario() {
    let a = JointParams::new(
        Quat::from_rotation_x(0.5),
        Vec3::new(0.25, 0.5, -0.75),
        Vec3::new(1.0, 1.0, 1.0),
    );
    let b = JointParams::new(
        Quat::from_rotation_y(-0.8),
        Vec3::new(-0.5, 0.125, 0.375),
        Vec3::new(0.5, 0.75, 0.875),
    );
    let channel = encode_channel(0, &[a, b]).unwrap();
    assert_eq!(channel.sample_count(), 2);
    assert_eq!(channel.data().len(), 40);

    assert_joint_close(&read_sample(&channel, 0), &a, "sample 0");
    assert_joint_close(&read_sample(&channel, 1), &b, "sample 1");
}

#[test]
#[should_panic]
fn test_read_past_last_sample_panics() {
    let channel = encode_channel(0, &frames_for_flags(0, 2)).unwrap();
    read_sample(&channel, 2);
}

// ========================================================================
// Float Channel Tests
// ========================================================================

#[test]
fn test_float_channel_roundtrip() {
    let values = [0.0f32, 0.5, -1.25, 3.0, 100.0];
    let channel = encode_float_channel(&values).unwrap();
    assert!(channel.is_float());
    assert_eq!(channel.data().len(), values.len() * FLOAT_FRAME_SIZE);

    for (index, &value) in values.iter().enumerate() {
        assert_eq!(read_float_sample(&channel, index as u16), value);
    }
}

#[test]
fn test_float_channel_reads_half_even_with_32bit_flag() {
    let channel = CompressedChannel::new(
        2,
        FLAG_FLOAT_CHANNEL | FLAG_32BIT_FLOATS,
        vec![0x00, 0x3C, 0x00, 0xC0],
    )
    .unwrap();
    assert_eq!(read_float_sample(&channel, 0), 1.0);
    assert_eq!(read_float_sample(&channel, 1), -2.0);
}

// ========================================================================
// Constant Inference Tests
// ========================================================================

#[test]
fn test_infer_constant_flags() {
    let flags = FLAG_CONSTANT_ROTATION | FLAG_CONSTANT_Y_TRANSLATION | FLAG_CONSTANT_SCALE_X;
    let frames = frames_for_flags(flags, 5);
    assert_eq!(infer_constant_flags(&frames, 1e-6), flags);

    let still = frames_for_flags(
        FLAG_CONSTANT_ROTATION | FLAG_CONSTANT_TRANSLATION | FLAG_CONSTANT_SCALE,
        3,
    );
    assert_eq!(
        infer_constant_flags(&still, 1e-6),
        FLAG_CONSTANT_ROTATION | FLAG_CONSTANT_TRANSLATION | FLAG_CONSTANT_SCALE
    );

    assert_eq!(infer_constant_flags(&[], 1e-6), 0);
}

#[test]
fn test_infer_constant_flags_treats_negated_quat_as_equal() {
    let a = JointParams::new(Quat::from_rotation_y(0.3), Vec3::ZERO, Vec3::ONE);
    let b = JointParams::new(-a.rotation, Vec3::X, Vec3::ONE);
    let flags = infer_constant_flags(&[a, b], 1e-6);
    assert_ne!(flags & FLAG_CONSTANT_ROTATION, 0);
    assert_eq!(flags & FLAG_CONSTANT_TRANSLATION, 0);
    assert_ne!(flags & FLAG_CONSTANT_Y_TRANSLATION, 0);
}
