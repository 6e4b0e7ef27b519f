//! Phase to keyframe mapping

use crate::error::EvalError;

/// Pair of keyframes bracketing a phase, and the blend between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleWindow {
    /// Fractional sample position, `phase * (sample_count - 1)`
    pub t: f32,
    /// `floor(t)`
    pub lower: u16,
    /// `ceil(t)`
    pub upper: u16,
    /// `t - lower`, or 1.0 after a camera cut snap
    pub blend: f32,
}

impl SampleWindow {
    /// Map `phase` onto a channel of `sample_count` samples.
    ///
    /// No clamping or wrapping is applied: `phase` must lie in [0, 1].
    pub fn from_phase(phase: f32, sample_count: u16) -> Result<Self, EvalError> {
        if !(0.0..=1.0).contains(&phase) {
            return Err(EvalError::InvalidPhase(phase));
        }
        debug_assert!(sample_count > 0, "channel without samples");

        let last_sample = sample_count.saturating_sub(1);
        let t = phase * f32::from(last_sample);
        let lower = t.floor();
        let upper = t.ceil();

        Ok(Self {
            t,
            lower: lower as u16,
            upper: (upper as u16).min(last_sample),
            blend: t - lower,
        })
    }

    /// Samples a channel needs for both keyframes to be readable.
    pub fn required_samples(&self) -> u16 {
        self.upper + 1
    }

    /// Sample fully at the upper keyframe.
    pub fn snap_to_upper(&mut self) {
        self.blend = 1.0;
    }
}
