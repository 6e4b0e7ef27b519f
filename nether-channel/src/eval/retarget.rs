//! Skeleton retargeting scales

use hashbrown::HashMap;

use crate::table::SkeletonId;

/// Translation scale applied when playing a clip on another skeleton
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetargetEntry {
    pub scale: f32,
    /// Disabled entries are looked up but never applied
    pub disabled: bool,
}

impl RetargetEntry {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            disabled: false,
        }
    }

    pub fn disabled(scale: f32) -> Self {
        Self {
            scale,
            disabled: true,
        }
    }
}

/// Retarget entries keyed by (source skeleton, destination skeleton)
#[derive(Debug, Clone, Default)]
pub struct RetargetTable {
    entries: HashMap<(SkeletonId, SkeletonId), RetargetEntry>,
}

impl RetargetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the entry for `source -> dest`.
    pub fn insert(&mut self, source: SkeletonId, dest: SkeletonId, entry: RetargetEntry) {
        self.entries.insert((source, dest), entry);
    }

    pub fn lookup(&self, source: SkeletonId, dest: SkeletonId) -> Option<&RetargetEntry> {
        self.entries.get(&(source, dest))
    }

    /// Scale to apply for `source -> dest`, if an enabled entry exists.
    pub fn active_scale(&self, source: SkeletonId, dest: SkeletonId) -> Option<f32> {
        self.lookup(source, dest)
            .filter(|entry| !entry.disabled)
            .map(|entry| entry.scale)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
