//! Development-only channel tooling
//!
//! Compiled with the `debug-channels` feature. Provides the runtime channel
//! table the evaluator falls back to, the parallel builder that fills it, and
//! the observer hook for live inspection of evaluations.

mod builder;
mod channels;
mod observer;

pub use builder::{BuildError, ChannelSampleBuilder, RawDataChannelBuild, build_debug_channel};
pub use channels::{DebugChannelError, DebugChannelTable};
pub use observer::ChannelObserver;
