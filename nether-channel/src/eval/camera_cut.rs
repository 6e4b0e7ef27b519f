//! Camera cut detection
//!
//! Cuts are authored as a step key on the scale Z of a camera reference
//! channel: the value jumps between 0.0 and 1.0 on the frame the cut happens.
//! Linear interpolation turns the step into a one-frame ramp, and nothing may
//! be sampled inside that ramp. A phase landing in it is pushed forward to the
//! upper keyframe, where the value has settled.

use crate::config::CameraCutThresholds;
use crate::sid::{CAMERA_REFERENCE_PREFIX, StringId};

/// Per-call camera cut input and output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraCutInfo {
    /// Zero-based camera index; reference channels are named one-based
    pub camera_index: u32,
    /// Set when the evaluation snapped to the upper keyframe
    pub did_camera_cut: bool,
}

impl CameraCutInfo {
    pub fn new(camera_index: u32) -> Self {
        Self {
            camera_index,
            did_camera_cut: false,
        }
    }
}

/// `apReference-camera{index + 1}`, or `apReference-camera1` without cut info.
pub fn camera_reference_channel(info: Option<&CameraCutInfo>) -> StringId {
    let camera_number = info.map_or(0, |info| info.camera_index).saturating_add(1);
    StringId::concat_integer(CAMERA_REFERENCE_PREFIX, camera_number)
}

/// True when `interp` is mid-ramp and the keyframes differ by a real step.
pub fn should_camera_cut(
    interp: f32,
    prev: f32,
    next: f32,
    thresholds: &CameraCutThresholds,
) -> bool {
    let mid_ramp = interp > thresholds.epsilon && interp < 1.0 - thresholds.epsilon;
    let stepped = (prev - next).abs() > thresholds.delta;
    mid_ramp && stepped
}
