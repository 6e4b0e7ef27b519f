//! Per-clip channel tables

use core::ops::Deref;
use std::sync::Arc;

use crate::error::ChannelFormatError;
use crate::format::CompressedChannel;
use crate::sid::StringId;

/// Handle identifying a loaded animation clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimId(pub u64);

/// Skeleton an animation was authored for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkeletonId(pub u32);

impl SkeletonId {
    pub const INVALID: Self = Self(u32::MAX);

    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Channel records of one clip, looked up by linear scan.
///
/// Lookup returns the first entry with a matching id. [`ChannelTable::insert`]
/// refuses duplicates; [`ChannelTable::push`] does not check.
#[derive(Debug, Clone, Default)]
pub struct ChannelTable {
    entries: Vec<(StringId, CompressedChannel)>,
}

impl ChannelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel, failing if `id` is already present.
    pub fn insert(
        &mut self,
        id: StringId,
        channel: CompressedChannel,
    ) -> Result<(), ChannelFormatError> {
        if self.get(id).is_some() {
            return Err(ChannelFormatError::DuplicateChannel(id));
        }
        self.entries.push((id, channel));
        Ok(())
    }

    /// Add a channel without checking for duplicates.
    pub fn push(&mut self, id: StringId, channel: CompressedChannel) {
        self.entries.push((id, channel));
    }

    /// First channel named `id`
    pub fn get(&self, id: StringId) -> Option<&CompressedChannel> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, channel)| channel)
    }

    pub fn ids(&self) -> impl Iterator<Item = StringId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StringId, &CompressedChannel)> {
        self.entries.iter().map(|(id, channel)| (*id, channel))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(StringId, CompressedChannel)> for ChannelTable {
    fn from_iter<I: IntoIterator<Item = (StringId, CompressedChannel)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A loaded animation clip as seen by the channel layer
#[derive(Debug, Clone)]
pub struct AnimClip {
    pub id: AnimId,
    pub name: String,
    /// Skeleton the clip was authored for
    pub skeleton: SkeletonId,
    /// Total sampled frames of the clip's joint data
    pub frame_count: u32,
    pub channels: ChannelTable,
}

impl AnimClip {
    pub fn new(id: AnimId, name: impl Into<String>, skeleton: SkeletonId) -> Self {
        Self {
            id,
            name: name.into(),
            skeleton,
            frame_count: 0,
            channels: ChannelTable::new(),
        }
    }

    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = frame_count;
        self
    }

    pub fn with_channels(mut self, channels: ChannelTable) -> Self {
        self.channels = channels;
        self
    }
}

/// A channel found either in a clip's own table or in a shared debug table.
#[derive(Debug, Clone)]
pub enum ChannelRef<'a> {
    Clip(&'a CompressedChannel),
    Shared(Arc<CompressedChannel>),
}

impl Deref for ChannelRef<'_> {
    type Target = CompressedChannel;

    fn deref(&self) -> &CompressedChannel {
        match self {
            ChannelRef::Clip(channel) => channel,
            ChannelRef::Shared(channel) => channel,
        }
    }
}

/// Look `id` up in the clip's own channel table.
pub fn find_channel(anim: &AnimClip, id: StringId) -> Option<ChannelRef<'_>> {
    anim.channels.get(id).map(ChannelRef::Clip)
}
