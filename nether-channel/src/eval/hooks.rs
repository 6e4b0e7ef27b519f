//! Optional tooling hooks held by the evaluator
//!
//! Without the `debug-channels` feature this is an empty struct and every
//! call is a no-op.

#[cfg(feature = "debug-channels")]
use std::sync::Arc;

#[cfg(feature = "debug-channels")]
use crate::debug::{ChannelObserver, DebugChannelTable};
use crate::format::CompressedChannel;
use crate::joint::JointParams;
use crate::sid::StringId;
use crate::table::AnimClip;

use super::SampleWindow;

#[derive(Clone, Default)]
pub(crate) struct DebugHooks {
    #[cfg(feature = "debug-channels")]
    pub(crate) channels: Option<Arc<DebugChannelTable>>,
    #[cfg(feature = "debug-channels")]
    pub(crate) observer: Option<Arc<dyn ChannelObserver>>,
}

impl core::fmt::Debug for DebugHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("DebugHooks");
        #[cfg(feature = "debug-channels")]
        s.field("channels", &self.channels.as_ref().map(|table| table.len()))
            .field("observer", &self.observer.is_some());
        s.finish()
    }
}

impl DebugHooks {
    /// Channel attached to `anim` at runtime, if any.
    #[cfg(feature = "debug-channels")]
    pub(crate) fn find_channel(
        &self,
        anim: &AnimClip,
        channel: StringId,
    ) -> Option<Arc<CompressedChannel>> {
        self.channels.as_ref()?.get_channel(anim.id, channel)
    }

    #[cfg(not(feature = "debug-channels"))]
    #[inline(always)]
    pub(crate) fn find_channel(
        &self,
        _anim: &AnimClip,
        _channel: StringId,
    ) -> Option<std::sync::Arc<CompressedChannel>> {
        None
    }

    #[inline]
    pub(crate) fn joint_samples(
        &self,
        channel: StringId,
        anim: &AnimClip,
        window: &SampleWindow,
        samples: &[JointParams; 2],
    ) {
        #[cfg(feature = "debug-channels")]
        if let Some(observer) = &self.observer {
            observer.on_joint_samples(channel, anim, window, samples);
        }
        #[cfg(not(feature = "debug-channels"))]
        let _ = (channel, anim, window, samples);
    }

    #[inline]
    pub(crate) fn float_samples(
        &self,
        channel: StringId,
        anim: &AnimClip,
        window: &SampleWindow,
        samples: &[f32; 2],
    ) {
        #[cfg(feature = "debug-channels")]
        if let Some(observer) = &self.observer {
            observer.on_float_samples(channel, anim, window, samples);
        }
        #[cfg(not(feature = "debug-channels"))]
        let _ = (channel, anim, window, samples);
    }
}
