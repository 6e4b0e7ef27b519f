//! Channel flags word and its typed layout

// ============================================================================
// Flag Bits
// ============================================================================

/// Record holds one scalar per frame instead of a joint transform
pub const FLAG_FLOAT_CHANNEL: u16 = 0x0001;
/// Rotation stored as a single heading angle around +Y
pub const FLAG_UPRIGHT_ROTATION: u16 = 0x0002;
/// Fields are binary32 instead of binary16
pub const FLAG_32BIT_FLOATS: u16 = 0x0004;
/// Rotation identical to frame 0 for all later frames
pub const FLAG_CONSTANT_ROTATION: u16 = 0x0008;
/// Translation identical to frame 0 for all later frames
pub const FLAG_CONSTANT_TRANSLATION: u16 = 0x0010;
/// Translation Y identical to frame 0; X and Z still animated
pub const FLAG_CONSTANT_Y_TRANSLATION: u16 = 0x0020;
/// Scale identical to frame 0 for all later frames
pub const FLAG_CONSTANT_SCALE: u16 = 0x0040;
/// Scale X identical to frame 0
pub const FLAG_CONSTANT_SCALE_X: u16 = 0x0080;
/// Scale Y identical to frame 0
pub const FLAG_CONSTANT_SCALE_Y: u16 = 0x0100;
/// Scale Z identical to frame 0
pub const FLAG_CONSTANT_SCALE_Z: u16 = 0x0200;

/// Every bit the decoder understands
pub const FLAG_ALL: u16 = 0x03FF;

// ============================================================================
// Typed Layout
// ============================================================================

/// Width of every packed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// binary16
    Half,
    /// binary32
    Full,
}

impl Precision {
    /// Bytes per scalar
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            Precision::Half => 2,
            Precision::Full => 4,
        }
    }
}

/// How frame 0 stores the rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationForm {
    /// x, y, z, w
    Quaternion,
    /// One heading angle around +Y
    Upright,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationTrack {
    Animated(RotationForm),
    /// Stored in frame 0 only
    Constant(RotationForm),
}

impl RotationTrack {
    pub const fn form(self) -> RotationForm {
        match self {
            RotationTrack::Animated(form) | RotationTrack::Constant(form) => form,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationTrack {
    /// x, y, z every frame
    Animated,
    /// Later frames store x, z; y comes from frame 0
    ConstantY,
    /// Stored in frame 0 only
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisTrack {
    Animated,
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleTrack {
    /// Per-axis; constant axes are omitted from later frames
    Animated([AxisTrack; 3]),
    /// Stored in frame 0 only
    Constant,
}

/// Encoding of a joint transform channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointLayout {
    pub precision: Precision,
    pub rotation: RotationTrack,
    pub translation: TranslationTrack,
    pub scale: ScaleTrack,
}

/// Encoding of a channel, parsed once from its flags word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// One binary16 scalar per frame
    Float,
    Joint(JointLayout),
}

#[inline]
const fn has(flags: u16, bit: u16) -> bool {
    flags & bit != 0
}

impl ChannelLayout {
    /// Parse a raw flags word.
    ///
    /// Unknown bits are ignored. For float channels every other bit is ignored.
    pub const fn from_flags(flags: u16) -> Self {
        if has(flags, FLAG_FLOAT_CHANNEL) {
            return ChannelLayout::Float;
        }

        let precision = if has(flags, FLAG_32BIT_FLOATS) {
            Precision::Full
        } else {
            Precision::Half
        };

        let form = if has(flags, FLAG_UPRIGHT_ROTATION) {
            RotationForm::Upright
        } else {
            RotationForm::Quaternion
        };
        let rotation = if has(flags, FLAG_CONSTANT_ROTATION) {
            RotationTrack::Constant(form)
        } else {
            RotationTrack::Animated(form)
        };

        let translation = if has(flags, FLAG_CONSTANT_TRANSLATION) {
            TranslationTrack::Constant
        } else if has(flags, FLAG_CONSTANT_Y_TRANSLATION) {
            TranslationTrack::ConstantY
        } else {
            TranslationTrack::Animated
        };

        let scale = if has(flags, FLAG_CONSTANT_SCALE) {
            ScaleTrack::Constant
        } else {
            ScaleTrack::Animated([
                axis_track(flags, FLAG_CONSTANT_SCALE_X),
                axis_track(flags, FLAG_CONSTANT_SCALE_Y),
                axis_track(flags, FLAG_CONSTANT_SCALE_Z),
            ])
        };

        ChannelLayout::Joint(JointLayout {
            precision,
            rotation,
            translation,
            scale,
        })
    }

    /// Canonical flags word for this layout
    pub const fn to_flags(&self) -> u16 {
        let layout = match self {
            ChannelLayout::Float => return FLAG_FLOAT_CHANNEL,
            ChannelLayout::Joint(layout) => layout,
        };

        let mut flags = 0;
        if let Precision::Full = layout.precision {
            flags |= FLAG_32BIT_FLOATS;
        }
        if let RotationForm::Upright = layout.rotation.form() {
            flags |= FLAG_UPRIGHT_ROTATION;
        }
        if let RotationTrack::Constant(_) = layout.rotation {
            flags |= FLAG_CONSTANT_ROTATION;
        }
        match layout.translation {
            TranslationTrack::Animated => {}
            TranslationTrack::ConstantY => flags |= FLAG_CONSTANT_Y_TRANSLATION,
            TranslationTrack::Constant => flags |= FLAG_CONSTANT_TRANSLATION,
        }
        match layout.scale {
            ScaleTrack::Constant => flags |= FLAG_CONSTANT_SCALE,
            ScaleTrack::Animated([x, y, z]) => {
                if let AxisTrack::Constant = x {
                    flags |= FLAG_CONSTANT_SCALE_X;
                }
                if let AxisTrack::Constant = y {
                    flags |= FLAG_CONSTANT_SCALE_Y;
                }
                if let AxisTrack::Constant = z {
                    flags |= FLAG_CONSTANT_SCALE_Z;
                }
            }
        }
        flags
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, ChannelLayout::Float)
    }
}

#[inline]
const fn axis_track(flags: u16, bit: u16) -> AxisTrack {
    if has(flags, bit) {
        AxisTrack::Constant
    } else {
        AxisTrack::Animated
    }
}
