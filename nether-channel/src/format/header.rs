//! Channel record header

use super::flags::{ChannelLayout, FLAG_ALL};
use crate::error::ChannelFormatError;

/// Compressed channel header (4 bytes)
///
/// Note: Not packed - we use explicit byte serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ChannelHeader {
    /// Number of frames in the channel
    pub sample_count: u16,
    /// Encoding flags (see `FLAG_*`)
    pub flags: u16,
}

impl ChannelHeader {
    pub const SIZE: usize = 4;

    pub fn new(sample_count: u16, flags: u16) -> Self {
        Self {
            sample_count,
            flags,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&self.sample_count.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.flags.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            sample_count: u16::from_le_bytes([bytes[0], bytes[1]]),
            flags: u16::from_le_bytes([bytes[2], bytes[3]]),
        })
    }

    /// Reject empty channels and unknown flag bits
    pub fn validate(&self) -> Result<(), ChannelFormatError> {
        if self.sample_count == 0 {
            return Err(ChannelFormatError::NoSamples);
        }
        if self.flags & !FLAG_ALL != 0 {
            return Err(ChannelFormatError::UnknownFlags(self.flags));
        }
        Ok(())
    }

    pub fn layout(&self) -> ChannelLayout {
        ChannelLayout::from_flags(self.flags)
    }

    /// Calculate expected data size (excluding header)
    pub fn data_size(&self) -> usize {
        self.layout().data_size(self.sample_count)
    }

    /// Calculate total record size (header + data)
    pub fn record_size(&self) -> usize {
        Self::SIZE + self.data_size()
    }
}
