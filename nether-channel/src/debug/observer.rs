//! Evaluation observer for live tooling

use crate::eval::SampleWindow;
use crate::joint::JointParams;
use crate::sid::StringId;
use crate::table::AnimClip;

/// Receives the raw keyframes behind every evaluation.
///
/// For joint channels the align channel is reported first, then the requested
/// channel when it is not the align channel. Both methods default to no-ops.
pub trait ChannelObserver: Send + Sync {
    fn on_joint_samples(
        &self,
        _channel: StringId,
        _anim: &AnimClip,
        _window: &SampleWindow,
        _samples: &[JointParams; 2],
    ) {
    }

    fn on_float_samples(
        &self,
        _channel: StringId,
        _anim: &AnimClip,
        _window: &SampleWindow,
        _samples: &[f32; 2],
    ) {
    }
}
