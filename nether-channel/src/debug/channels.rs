//! Lock-guarded table of channels authored at runtime

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;

use crate::format::CompressedChannel;
use crate::sid::StringId;
use crate::table::AnimId;

type ChannelMap = HashMap<(AnimId, StringId), Arc<CompressedChannel>>;

/// Errors mutating a [`DebugChannelTable`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DebugChannelError {
    #[error("channel {channel} already exists for anim {anim:?}")]
    AlreadyExists { anim: AnimId, channel: StringId },
}

/// Channels attached to loaded clips by tooling, keyed by (clip, channel).
///
/// Shared between the evaluator and whatever tool builds channels; readers
/// only take the read lock.
#[derive(Debug, Default)]
pub struct DebugChannelTable {
    channels: RwLock<ChannelMap>,
}

impl DebugChannelTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, ChannelMap> {
        self.channels.read().unwrap_or_else(|e| {
            tracing::warn!("Debug channel table lock poisoned; continuing");
            e.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, ChannelMap> {
        self.channels.write().unwrap_or_else(|e| {
            tracing::warn!("Debug channel table lock poisoned; continuing");
            e.into_inner()
        })
    }

    pub fn get_channel(&self, anim: AnimId, channel: StringId) -> Option<Arc<CompressedChannel>> {
        self.read().get(&(anim, channel)).cloned()
    }

    /// Attach `data` to `anim` as `channel`. Existing channels are never replaced.
    pub fn add_channel(
        &self,
        anim: AnimId,
        channel: StringId,
        data: CompressedChannel,
    ) -> Result<Arc<CompressedChannel>, DebugChannelError> {
        let mut channels = self.write();
        if channels.contains_key(&(anim, channel)) {
            return Err(DebugChannelError::AlreadyExists { anim, channel });
        }

        let data = Arc::new(data);
        channels.insert((anim, channel), Arc::clone(&data));
        tracing::trace!("Added debug channel {} to anim {:?}", channel, anim);
        Ok(data)
    }

    /// Drop every channel attached to `anim`, returning how many were removed.
    pub fn remove_channels_for_anim(&self, anim: AnimId) -> usize {
        let mut channels = self.write();
        let before = channels.len();
        channels.retain(|(owner, _), _| *owner != anim);
        let removed = before - channels.len();
        if removed > 0 {
            tracing::trace!("Removed {} debug channels from anim {:?}", removed, anim);
        }
        removed
    }

    /// Channel ids attached to `anim`, sorted.
    pub fn channels_for_anim(&self, anim: AnimId) -> Vec<StringId> {
        let mut ids: Vec<StringId> = self
            .read()
            .keys()
            .filter(|(owner, _)| *owner == anim)
            .map(|(_, channel)| *channel)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Called before a clip is unloaded so no channel outlives it.
    pub fn pre_animation_logout(&self, anim: AnimId) {
        self.remove_channels_for_anim(anim);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
