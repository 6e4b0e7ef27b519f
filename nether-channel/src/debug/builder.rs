//! Debug channel construction
//!
//! Samples a per-frame transform for every frame of a clip, packs the result
//! as a full-precision channel and verifies it decodes back to what was built.

use rayon::prelude::*;

use crate::error::ChannelFormatError;
use crate::format::{CompressedChannel, FLAG_32BIT_FLOATS, encode_channel, read_sample};
use crate::joint::JointParams;
use crate::table::AnimClip;

/// Number of parallel batches a clip's frames are split into
const BUILD_JOB_COUNT: usize = 6;

/// Maximum translation or scale drift tolerated after packing
const MAX_FIELD_ERROR: f32 = 0.001;
/// Minimum quaternion agreement tolerated after packing
const MIN_ROTATION_DOT: f32 = 0.999;

/// Produces one frame of a debug channel.
///
/// Called concurrently from worker threads, once per frame, with `sample` set
/// to the frame index.
pub trait ChannelSampleBuilder: Sync {
    fn build_frame(&self, anim: &AnimClip, sample: f32) -> JointParams;
}

impl<F> ChannelSampleBuilder for F
where
    F: Fn(&AnimClip, f32) -> JointParams + Sync,
{
    fn build_frame(&self, anim: &AnimClip, sample: f32) -> JointParams {
        self(anim, sample)
    }
}

/// Plots a series of raw values on translation X, one value per frame.
#[derive(Debug, Clone)]
pub struct RawDataChannelBuild {
    data: Vec<f32>,
}

impl RawDataChannelBuild {
    pub fn new(data: impl Into<Vec<f32>>) -> Self {
        Self { data: data.into() }
    }
}

impl ChannelSampleBuilder for RawDataChannelBuild {
    fn build_frame(&self, _anim: &AnimClip, sample: f32) -> JointParams {
        let index = sample.round() as usize;
        debug_assert!(index < self.data.len(), "raw data index {} out of range", index);
        let value = self.data.get(index).copied().unwrap_or_default();

        JointParams {
            translation: glam::Vec3::new(value, 0.0, 0.0),
            ..JointParams::IDENTITY
        }
    }
}

/// Errors building a debug channel
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("anim '{0}' has no frames to sample")]
    NoFrames(String),

    #[error("failed to pack debug channel: {0}")]
    Format(#[from] ChannelFormatError),

    #[error("debug channel frame {frame} failed self-check: {reason}")]
    SelfCheckFailed { frame: usize, reason: &'static str },
}

/// Build a channel covering every frame of `anim`.
///
/// The channel is stored with 32-bit fields and no constant fields, so every
/// frame must survive packing within 0.001 units and a quaternion dot of
/// 0.999.
pub fn build_debug_channel(
    anim: &AnimClip,
    builder: &dyn ChannelSampleBuilder,
) -> Result<CompressedChannel, BuildError> {
    let frame_count = anim.frame_count as usize;
    if frame_count == 0 {
        return Err(BuildError::NoFrames(anim.name.clone()));
    }

    let frames_per_job = frame_count.div_ceil(BUILD_JOB_COUNT);
    let mut frames = vec![JointParams::IDENTITY; frame_count];
    frames
        .par_chunks_mut(frames_per_job)
        .enumerate()
        .for_each(|(job, chunk)| {
            let start = job * frames_per_job;
            for (offset, frame) in chunk.iter_mut().enumerate() {
                *frame = builder.build_frame(anim, (start + offset) as f32);
            }
        });

    let channel = encode_channel(FLAG_32BIT_FLOATS, &frames)?;
    verify_channel(&channel, &frames)?;
    Ok(channel)
}

fn verify_channel(channel: &CompressedChannel, frames: &[JointParams]) -> Result<(), BuildError> {
    for (index, expected) in frames.iter().enumerate() {
        let decoded = read_sample(channel, index as u16);
        let fail = |reason: &'static str| {
            tracing::warn!(
                "Debug channel frame {} failed self-check ({}): {:?} != {:?}",
                index,
                reason,
                decoded,
                expected
            );
            Err(BuildError::SelfCheckFailed {
                frame: index,
                reason,
            })
        };

        if !decoded.is_finite() {
            return fail("non-finite value");
        }
        if !decoded.rotation.is_normalized() {
            return fail("rotation not normalized");
        }
        if decoded.translation.distance(expected.translation) >= MAX_FIELD_ERROR {
            return fail("translation error");
        }
        if decoded.scale.distance(expected.scale) >= MAX_FIELD_ERROR {
            return fail("scale error");
        }
        if decoded.rotation.dot(expected.rotation) < MIN_ROTATION_DOT {
            return fail("rotation error");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{AnimId, SkeletonId};
    use glam::{Quat, Vec3};

    fn clip(frame_count: u32) -> AnimClip {
        AnimClip::new(AnimId(3), "debug-clip", SkeletonId(0)).with_frame_count(frame_count)
    }

    #[test]
    fn test_raw_data_channel() {
        let values = [0.0, 1.5, -2.25, 8.0, 3.0, 0.5, 7.0];
        let anim = clip(values.len() as u32);

        let channel = build_debug_channel(&anim, &RawDataChannelBuild::new(values)).unwrap();
        assert_eq!(channel.sample_count(), values.len() as u16);
        assert_eq!(channel.flags(), FLAG_32BIT_FLOATS);

        for (index, value) in values.iter().enumerate() {
            let sample = read_sample(&channel, index as u16);
            assert_eq!(sample.translation, Vec3::new(*value, 0.0, 0.0));
            assert_eq!(sample.rotation, Quat::IDENTITY);
            assert_eq!(sample.scale, Vec3::ONE);
        }
    }

    #[test]
    fn test_closure_builder_sees_every_frame_once() {
        // More frames than jobs, not a multiple of the job count
        let anim = clip(23);
        let builder = |_: &AnimClip, sample: f32| JointParams {
            rotation: Quat::from_rotation_y(sample * 0.1),
            translation: Vec3::new(sample, sample * 2.0, 0.0),
            scale: Vec3::ONE,
        };

        let channel = build_debug_channel(&anim, &builder).unwrap();
        for frame in 0..23u16 {
            let sample = read_sample(&channel, frame);
            assert_eq!(sample.translation.x, f32::from(frame));
            assert!(sample.rotation.dot(Quat::from_rotation_y(f32::from(frame) * 0.1)) > 0.9999);
        }
    }

    #[test]
    fn test_no_frames() {
        let result = build_debug_channel(&clip(0), &RawDataChannelBuild::new(Vec::<f32>::new()));
        assert_eq!(result, Err(BuildError::NoFrames("debug-clip".into())));
    }

    #[test]
    fn test_self_check_rejects_non_finite() {
        let builder = |_: &AnimClip, _: f32| JointParams {
            translation: Vec3::new(f32::NAN, 0.0, 0.0),
            ..JointParams::IDENTITY
        };
        let result = build_debug_channel(&clip(4), &builder);
        assert!(matches!(
            result,
            Err(BuildError::SelfCheckFailed { frame: 0, .. })
        ));
    }

    #[test]
    fn test_self_check_rejects_unnormalized_input() {
        // Decoding normalizes, so a non-unit input no longer matches
        let builder = |_: &AnimClip, _: f32| JointParams {
            rotation: Quat::from_xyzw(0.0, 0.0, 0.0, 0.5),
            ..JointParams::IDENTITY
        };
        let result = build_debug_channel(&clip(2), &builder);
        assert!(matches!(result, Err(BuildError::SelfCheckFailed { .. })));
    }
}
