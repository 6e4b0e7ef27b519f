//! Left/right channel pairs
//!
//! When a mirrored animation swaps sides, a left channel is evaluated from its
//! right counterpart and vice versa. The swapped rotation is then turned 180
//! degrees about its local X axis with [`rotate_swapped_channel_pair`].

use glam::Quat;

use crate::sid::StringId;

/// (left, right) channel name pairs
pub const MIRRORED_CHANNEL_NAMES: [(&str, &str); 7] = [
    ("lAnkle", "rAnkle"),
    ("lWrist", "rWrist"),
    ("apReference-hand-l", "apReference-hand-r"),
    ("apReference-hand-l-prop", "apReference-hand-r-prop"),
    ("apReference-foot-l", "apReference-foot-r"),
    ("apReference-ik-contact-HL", "apReference-ik-contact-HR"),
    ("apReference-ik-contact-FL", "apReference-ik-contact-FR"),
];

const MIRRORED_CHANNEL_IDS: [(StringId, StringId); 7] = {
    let mut ids = [(StringId::INVALID, StringId::INVALID); 7];
    let mut i = 0;
    while i < MIRRORED_CHANNEL_NAMES.len() {
        let (left, right) = MIRRORED_CHANNEL_NAMES[i];
        ids[i] = (StringId::new(left), StringId::new(right));
        i += 1;
    }
    ids
};

/// Counterpart on the other side, or `channel` itself if it has none.
pub fn mirrored_channel_name(channel: StringId) -> StringId {
    for (left, right) in MIRRORED_CHANNEL_IDS {
        if channel == left {
            return right;
        }
        if channel == right {
            return left;
        }
    }
    channel
}

/// Rotate 180 degrees about the local X axis: `q * (1, 0, 0, 0)`.
#[inline]
pub fn rotate_swapped_channel_pair(rotation: Quat) -> Quat {
    Quat::from_xyzw(rotation.w, rotation.z, -rotation.y, -rotation.x)
}
