//! Frame record sizes
//!
//! Frame 0 always carries the full encoding; later frames drop every field the
//! layout marks constant. All offsets inside a record follow from these sizes.

use super::flags::{
    AxisTrack, ChannelLayout, JointLayout, RotationForm, RotationTrack, ScaleTrack,
    TranslationTrack,
};

/// Bytes per frame of a float channel
pub const FLOAT_FRAME_SIZE: usize = 2;

impl JointLayout {
    /// Bytes used by the rotation field of one frame
    pub const fn rotation_size(&self, first_frame: bool) -> usize {
        let width = self.precision.width();
        match (self.rotation, first_frame) {
            (RotationTrack::Constant(_), false) => 0,
            (RotationTrack::Animated(RotationForm::Upright), _)
            | (RotationTrack::Constant(RotationForm::Upright), true) => width,
            (RotationTrack::Animated(RotationForm::Quaternion), _)
            | (RotationTrack::Constant(RotationForm::Quaternion), true) => 4 * width,
        }
    }

    /// Bytes used by the translation field of one frame
    pub const fn translation_size(&self, first_frame: bool) -> usize {
        let width = self.precision.width();
        match (self.translation, first_frame) {
            (_, true) | (TranslationTrack::Animated, false) => 3 * width,
            (TranslationTrack::ConstantY, false) => 2 * width,
            (TranslationTrack::Constant, false) => 0,
        }
    }

    /// Bytes used by the scale field of one frame
    pub const fn scale_size(&self, first_frame: bool) -> usize {
        let width = self.precision.width();
        match (self.scale, first_frame) {
            (_, true) => 3 * width,
            (ScaleTrack::Constant, false) => 0,
            (ScaleTrack::Animated(axes), false) => {
                let mut size = 0;
                let mut i = 0;
                while i < 3 {
                    if let AxisTrack::Animated = axes[i] {
                        size += width;
                    }
                    i += 1;
                }
                size
            }
        }
    }

    /// Bytes of one frame record
    pub const fn frame_size(&self, first_frame: bool) -> usize {
        self.rotation_size(first_frame)
            + self.translation_size(first_frame)
            + self.scale_size(first_frame)
    }
}

impl ChannelLayout {
    /// Bytes of one frame record
    pub const fn frame_size(&self, first_frame: bool) -> usize {
        match self {
            ChannelLayout::Float => FLOAT_FRAME_SIZE,
            ChannelLayout::Joint(layout) => layout.frame_size(first_frame),
        }
    }

    /// Bytes of the whole data buffer for `sample_count` frames.
    ///
    /// Returns 0 for `sample_count == 0`, which is never a valid record.
    pub const fn data_size(&self, sample_count: u16) -> usize {
        if sample_count == 0 {
            return 0;
        }
        self.frame_size(true) + self.frame_size(false) * (sample_count as usize - 1)
    }

    /// Byte offset of frame `sample_index` inside the data buffer
    pub const fn frame_offset(&self, sample_index: u16) -> usize {
        if sample_index == 0 {
            return 0;
        }
        self.frame_size(true) + self.frame_size(false) * (sample_index as usize - 1)
    }
}

/// Bytes of one frame record for a raw flags word
pub const fn frame_size(flags: u16, first_frame: bool) -> usize {
    ChannelLayout::from_flags(flags).frame_size(first_frame)
}

/// Bytes of the data buffer of a record with `sample_count` frames
pub const fn data_size(flags: u16, sample_count: u16) -> usize {
    ChannelLayout::from_flags(flags).data_size(sample_count)
}
