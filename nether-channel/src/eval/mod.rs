//! Channel evaluation
//!
//! Samples a channel of a clip at a normalized phase. Joint channels are timed
//! by the clip's align channel and interpolated in align space; float
//! channels are timed by their own sample count.
//!
//! ```text
//! phase -> keyframes (align sample count)
//!       -> camera cut check (may snap blend to 1.0)
//!       -> decode align + requested channel at both keyframes
//!       -> blend in align space, untransform
//!       -> mirror -> retarget
//! ```

mod camera_cut;
mod hooks;
mod retarget;
mod window;


#[cfg(feature = "debug-channels")]
use std::sync::Arc;

pub use camera_cut::{CameraCutInfo, camera_reference_channel, should_camera_cut};
pub use retarget::{RetargetEntry, RetargetTable};
pub use window::SampleWindow;

use hooks::DebugHooks;

use crate::config::ChannelOptions;
#[cfg(feature = "debug-channels")]
use crate::debug::{ChannelObserver, DebugChannelTable};
use crate::error::{ChannelKind, EvalError};
use crate::format::{CompressedChannel, read_float_sample, read_sample};
use crate::joint::JointParams;
use crate::mirror::{mirrored_channel_name, rotate_swapped_channel_pair};
use crate::sid::{ALIGN_CHANNEL, StringId};
use crate::table::{self, AnimClip, ChannelRef, SkeletonId};

/// Inputs for one channel evaluation
#[derive(Debug, Clone, Copy)]
pub struct EvaluateChannelParams<'a> {
    pub anim: &'a AnimClip,
    pub channel: StringId,
    /// Normalized position in the clip, [0, 1]
    pub phase: f32,
    /// Mirror the result across the YZ plane
    pub mirror: bool,
    /// Keep the channel's own scale instead of composing it with align's
    pub want_raw_scale: bool,
    pub disable_retargeting: bool,
    /// Skeleton the result is for; `SkeletonId::INVALID` skips retargeting
    pub target_skeleton: SkeletonId,
}

impl<'a> EvaluateChannelParams<'a> {
    pub fn new(anim: &'a AnimClip, channel: StringId, phase: f32) -> Self {
        Self {
            anim,
            channel,
            phase,
            mirror: false,
            want_raw_scale: false,
            disable_retargeting: false,
            target_skeleton: SkeletonId::INVALID,
        }
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_raw_scale(mut self, want_raw_scale: bool) -> Self {
        self.want_raw_scale = want_raw_scale;
        self
    }

    pub fn with_target_skeleton(mut self, skeleton: SkeletonId) -> Self {
        self.target_skeleton = skeleton;
        self
    }

    pub fn without_retargeting(mut self) -> Self {
        self.disable_retargeting = true;
        self
    }
}

/// Evaluates channels of loaded clips.
///
/// Holds no per-call state; one evaluator can be shared by every worker.
#[derive(Debug, Clone, Default)]
pub struct ChannelEvaluator {
    options: ChannelOptions,
    retargets: RetargetTable,
    hooks: DebugHooks,
}

impl ChannelEvaluator {
    pub fn new(options: ChannelOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn with_retargets(mut self, retargets: RetargetTable) -> Self {
        self.retargets = retargets;
        self
    }

    /// Fall back to `table` when a clip's own channel table misses.
    #[cfg(feature = "debug-channels")]
    pub fn with_debug_channels(mut self, table: Arc<DebugChannelTable>) -> Self {
        self.hooks.channels = Some(table);
        self
    }

    /// Report the keyframes behind every evaluation to `observer`.
    #[cfg(feature = "debug-channels")]
    pub fn with_observer(mut self, observer: Arc<dyn ChannelObserver>) -> Self {
        self.hooks.observer = Some(observer);
        self
    }

    pub fn options(&self) -> &ChannelOptions {
        &self.options
    }

    pub fn retargets(&self) -> &RetargetTable {
        &self.retargets
    }

    /// Look `channel` up in the clip, then in the debug channel table.
    pub fn find_channel<'a>(
        &self,
        anim: &'a AnimClip,
        channel: StringId,
    ) -> Option<ChannelRef<'a>> {
        table::find_channel(anim, channel)
            .or_else(|| self.hooks.find_channel(anim, channel).map(ChannelRef::Shared))
    }

    /// Evaluate a joint channel.
    ///
    /// A clip without an align channel logs an error and yields identity.
    /// `cut_info.did_camera_cut` is reset on entry and set if the evaluation
    /// snapped to a camera cut.
    pub fn evaluate_channel(
        &self,
        params: &EvaluateChannelParams<'_>,
        mut cut_info: Option<&mut CameraCutInfo>,
    ) -> Result<JointParams, EvalError> {
        if let Some(info) = cut_info.as_deref_mut() {
            info.did_camera_cut = false;
        }

        let anim = params.anim;
        let channel = self.find_channel(anim, params.channel).ok_or_else(|| {
            EvalError::ChannelNotFound {
                anim: anim.name.clone(),
                channel: params.channel,
            }
        })?;
        if channel.is_float() {
            return Err(EvalError::KindMismatch {
                anim: anim.name.clone(),
                channel: params.channel,
                expected: ChannelKind::Joint,
                actual: ChannelKind::Float,
            });
        }

        let result = self.evaluate_compressed_channel(params, &channel, cut_info)?;
        Ok(self.retarget(params, result))
    }

    /// [`Self::evaluate_channel`], with any failure mapped to `(IDENTITY, false)`.
    pub fn evaluate_channel_or_identity(
        &self,
        params: &EvaluateChannelParams<'_>,
        cut_info: Option<&mut CameraCutInfo>,
    ) -> (JointParams, bool) {
        match self.evaluate_channel(params, cut_info) {
            Ok(result) => (result, true),
            Err(e) => {
                tracing::trace!("{}", e);
                (JointParams::IDENTITY, false)
            }
        }
    }

    /// Evaluate the other side's channel when `swap` is set.
    ///
    /// Channels with a left/right counterpart are read from the counterpart
    /// and have their rotation turned about local X; unpaired channels are
    /// evaluated as-is.
    pub fn evaluate_swapped_pair(
        &self,
        params: &EvaluateChannelParams<'_>,
        swap: bool,
        cut_info: Option<&mut CameraCutInfo>,
    ) -> Result<JointParams, EvalError> {
        let channel = if swap {
            mirrored_channel_name(params.channel)
        } else {
            params.channel
        };

        let swapped = EvaluateChannelParams { channel, ..*params };
        let mut result = self.evaluate_channel(&swapped, cut_info)?;
        if channel != params.channel {
            result.rotation = rotate_swapped_channel_pair(result.rotation);
        }
        Ok(result)
    }

    /// Evaluate a float channel, timed by its own sample count.
    ///
    /// Camera cuts are not applied; `cut_info.did_camera_cut` is only reset.
    pub fn evaluate_float_channel(
        &self,
        params: &EvaluateChannelParams<'_>,
        cut_info: Option<&mut CameraCutInfo>,
    ) -> Result<f32, EvalError> {
        if let Some(info) = cut_info {
            info.did_camera_cut = false;
        }

        let anim = params.anim;
        let channel = self.find_channel(anim, params.channel).ok_or_else(|| {
            EvalError::ChannelNotFound {
                anim: anim.name.clone(),
                channel: params.channel,
            }
        })?;
        if !channel.is_float() {
            return Err(EvalError::KindMismatch {
                anim: anim.name.clone(),
                channel: params.channel,
                expected: ChannelKind::Float,
                actual: ChannelKind::Joint,
            });
        }

        let window = SampleWindow::from_phase(params.phase, channel.sample_count())?;
        let values = [
            read_float_sample(&channel, window.lower),
            read_float_sample(&channel, window.upper),
        ];
        self.hooks
            .float_samples(params.channel, anim, &window, &values);

        Ok(values[0] + (values[1] - values[0]) * window.blend)
    }

    /// [`Self::evaluate_float_channel`], with any failure mapped to `(0.0, false)`.
    pub fn evaluate_float_channel_or_zero(
        &self,
        params: &EvaluateChannelParams<'_>,
        cut_info: Option<&mut CameraCutInfo>,
    ) -> (f32, bool) {
        match self.evaluate_float_channel(params, cut_info) {
            Ok(value) => (value, true),
            Err(e) => {
                tracing::trace!("{}", e);
                (0.0, false)
            }
        }
    }

    fn evaluate_compressed_channel(
        &self,
        params: &EvaluateChannelParams<'_>,
        channel: &CompressedChannel,
        cut_info: Option<&mut CameraCutInfo>,
    ) -> Result<JointParams, EvalError> {
        let anim = params.anim;

        let align = match self.find_channel(anim, ALIGN_CHANNEL) {
            Some(align) if !align.is_float() => align,
            _ => {
                tracing::error!("No align channel in anim '{}'", anim.name);
                return Ok(JointParams::IDENTITY);
            }
        };

        // Timing follows align regardless of which channel is requested
        let mut window = SampleWindow::from_phase(params.phase, align.sample_count())?;
        // A failed evaluation must not report a camera cut
        if params.channel != ALIGN_CHANNEL && channel.sample_count() < window.required_samples() {
            return Err(EvalError::SampleOutOfRange {
                channel: params.channel,
                available: channel.sample_count(),
                requested: window.upper,
            });
        }
        if !self.options.disable_camera_cuts {
            self.apply_camera_cut(params, &mut window, cut_info);
        }

        let align_samples = [
            read_sample(&align, window.lower),
            read_sample(&align, window.upper),
        ];
        self.hooks
            .joint_samples(ALIGN_CHANNEL, anim, &window, &align_samples);
        debug_assert!(
            align_samples.iter().all(|s| s.rotation.is_normalized()),
            "'{}' @ {}",
            anim.name,
            window.t
        );

        let mut result = if params.channel == ALIGN_CHANNEL {
            align_samples[0].blend(&align_samples[1], window.blend)
        } else {
            let other_samples = [
                read_sample(channel, window.lower),
                read_sample(channel, window.upper),
            ];
            self.hooks
                .joint_samples(params.channel, anim, &window, &other_samples);

            // The other channel alone does not blend correctly; blend it in align space
            let raw_scale = params.want_raw_scale;
            let combined = [
                align_samples[0].transform(&other_samples[0], raw_scale),
                align_samples[1].transform(&other_samples[1], raw_scale),
            ];
            let combined_blend = combined[0].blend(&combined[1], window.blend);

            // Slerp rounding is enough to make large translations wobble
            let mut align_blend = align_samples[0].blend(&align_samples[1], window.blend);
            align_blend.rotation = align_blend.rotation.normalize();

            align_blend.untransform(&combined_blend, raw_scale)
        };

        debug_assert!(result.rotation.is_normalized());
        debug_assert!(result.is_finite(), "'{}' @ {}", anim.name, window.t);
        debug_assert!(result.translation.length() < 100_000.0);

        if params.mirror {
            result = result.mirror_x();
        }
        Ok(result)
    }

    /// Snap `window` to its upper keyframe if it falls inside a camera cut ramp.
    fn apply_camera_cut(
        &self,
        params: &EvaluateChannelParams<'_>,
        window: &mut SampleWindow,
        cut_info: Option<&mut CameraCutInfo>,
    ) {
        let anim = params.anim;
        let camera_id = camera_reference_channel(cut_info.as_deref());
        let Some(camera) = self.find_channel(anim, camera_id) else {
            return;
        };
        if camera.is_float() || camera.sample_count() < window.required_samples() {
            tracing::warn!(
                "Camera channel {} in anim '{}' cannot be sampled at frames {} -> {}",
                camera_id,
                anim.name,
                window.lower,
                window.upper
            );
            return;
        }

        let prev = read_sample(&camera, window.lower).scale.z;
        let next = read_sample(&camera, window.upper).scale.z;
        let interp = prev + (next - prev) * window.blend;

        let thresholds = &self.options.camera_cut;
        if !should_camera_cut(interp, prev, next, thresholds) {
            return;
        }

        if !self.options.only_cut_camera1 || params.channel == camera_id {
            window.snap_to_upper();
            if let Some(info) = cut_info {
                info.did_camera_cut = true;
            }

            if self.options.debug_camera_cuts_verbose {
                tracing::debug!(
                    "Camera cut in anim '{}' channel {}: t = {:.1} phase = {:.4} frames = [{}, {}]",
                    anim.name,
                    params.channel,
                    window.t,
                    params.phase,
                    window.lower,
                    window.upper
                );
            } else {
                tracing::trace!("Camera cut in anim '{}' at t = {:.1}", anim.name, window.t);
            }
        }

        // Snapping to the upper keyframe should always settle the ramp
        if should_camera_cut(next, next, next, thresholds) {
            tracing::warn!(
                "Camera cut done incorrectly in anim '{}' @ frame {} -> {}",
                anim.name,
                window.lower,
                window.upper
            );
        }
    }

    fn retarget(&self, params: &EvaluateChannelParams<'_>, result: JointParams) -> JointParams {
        let source = params.anim.skeleton;
        let dest = params.target_skeleton;
        if source == dest || !dest.is_valid() || params.disable_retargeting {
            return result;
        }

        match self.retargets.active_scale(source, dest) {
            Some(scale) => result.scale_translation(scale),
            None => result,
        }
    }
}
