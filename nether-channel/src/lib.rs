//! Nether-Channel: compressed animation channels for Nethercore
//!
//! A channel is one named track of an animation clip, sampled once per frame.
//! Joint channels store a transform (rotation, translation, scale) per frame;
//! float channels store a scalar. Channels are used for root motion (the
//! `align` channel), camera reference points, interaction anchors and
//! arbitrary authored curves.
//!
//! The crate covers the whole path from bytes to an evaluated transform:
//!
//! | Layer | Module |
//! |-------|--------|
//! | Record format, size calculator, frame codec | [`format`] |
//! | Per-clip channel tables and lookup | [`table`] |
//! | Phase evaluation, camera cuts, retargeting | [`eval`] |
//! | Left/right channel pairing | [`mirror`] |
//! | Runtime-authored channels (`debug-channels` feature) | [`debug`] |
//!
//! Records are immutable once built, so evaluation needs no locking and one
//! [`ChannelEvaluator`] can be shared across threads.
//!
//! # Usage
//!
//! ```
//! use glam::Vec3;
//! use nether_channel::format::{FLAG_32BIT_FLOATS, encode_channel};
//! use nether_channel::{
//!     ALIGN_CHANNEL, AnimClip, AnimId, ChannelEvaluator, ChannelOptions, ChannelTable,
//!     EvaluateChannelParams, JointParams, SkeletonId,
//! };
//!
//! let frames: Vec<JointParams> = [0.0, 1.0, 2.0]
//!     .iter()
//!     .map(|&x| JointParams {
//!         translation: Vec3::new(x, 0.0, 0.0),
//!         ..JointParams::IDENTITY
//!     })
//!     .collect();
//!
//! let mut channels = ChannelTable::new();
//! channels
//!     .insert(ALIGN_CHANNEL, encode_channel(FLAG_32BIT_FLOATS, &frames).unwrap())
//!     .unwrap();
//! let anim = AnimClip::new(AnimId(1), "walk", SkeletonId(0)).with_channels(channels);
//!
//! let evaluator = ChannelEvaluator::new(ChannelOptions::default());
//! let params = EvaluateChannelParams::new(&anim, ALIGN_CHANNEL, 0.25);
//! let root = evaluator.evaluate_channel(&params, None).unwrap();
//! assert_eq!(root.translation, Vec3::new(0.5, 0.0, 0.0));
//! ```

pub mod config;
#[cfg(feature = "debug-channels")]
pub mod debug;
pub mod error;
pub mod eval;
pub mod format;
pub mod half_float;
pub mod joint;
pub mod mirror;
pub mod sid;
pub mod table;

pub use config::{CameraCutThresholds, ChannelOptions, ConfigError};
pub use error::{ChannelFormatError, ChannelKind, EvalError};
pub use eval::{
    CameraCutInfo, ChannelEvaluator, EvaluateChannelParams, RetargetEntry, RetargetTable,
    SampleWindow,
};
pub use format::{ChannelHeader, CompressedChannel, read_float_sample, read_sample};
pub use joint::JointParams;
pub use mirror::{mirrored_channel_name, rotate_swapped_channel_pair};
pub use sid::{ALIGN_CHANNEL, CAMERA_REFERENCE_PREFIX, StringId};
pub use table::{AnimClip, AnimId, ChannelRef, ChannelTable, SkeletonId, find_channel};
