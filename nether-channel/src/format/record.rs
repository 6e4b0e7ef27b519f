//! Compressed channel record

use super::flags::ChannelLayout;
use super::header::ChannelHeader;
use crate::error::{ChannelFormatError, ChannelKind};

/// One animated property of one joint (or one scalar) across a clip.
///
/// Immutable after construction, so records can be read from any number of
/// threads without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedChannel {
    sample_count: u16,
    flags: u16,
    layout: ChannelLayout,
    data: Box<[u8]>,
}

impl CompressedChannel {
    /// Wrap packed frame data.
    ///
    /// Fails when `sample_count` is zero, when `flags` has unknown bits, or
    /// when `data` is not exactly the size the layout implies.
    pub fn new(
        sample_count: u16,
        flags: u16,
        data: impl Into<Box<[u8]>>,
    ) -> Result<Self, ChannelFormatError> {
        ChannelHeader::new(sample_count, flags).validate()?;

        let data = data.into();
        let layout = ChannelLayout::from_flags(flags);
        let expected = layout.data_size(sample_count);
        if data.len() != expected {
            return Err(ChannelFormatError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            sample_count,
            flags,
            layout,
            data,
        })
    }

    /// Parse a header followed by its data.
    ///
    /// Returns the record and the number of bytes consumed; trailing bytes
    /// are left for the caller.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), ChannelFormatError> {
        let header =
            ChannelHeader::from_bytes(bytes).ok_or(ChannelFormatError::Truncated {
                expected: ChannelHeader::SIZE,
                actual: bytes.len(),
            })?;
        header.validate()?;

        let total = header.record_size();
        if bytes.len() < total {
            return Err(ChannelFormatError::Truncated {
                expected: total,
                actual: bytes.len(),
            });
        }

        let channel = Self::new(
            header.sample_count,
            header.flags,
            &bytes[ChannelHeader::SIZE..total],
        )?;
        Ok((channel, total))
    }

    /// Header followed by data
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(ChannelHeader::SIZE + self.data.len());
        bytes.extend_from_slice(&self.header().to_bytes());
        bytes.extend_from_slice(&self.data);
        bytes
    }

    pub fn header(&self) -> ChannelHeader {
        ChannelHeader::new(self.sample_count, self.flags)
    }

    pub fn sample_count(&self) -> u16 {
        self.sample_count
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn layout(&self) -> &ChannelLayout {
        &self.layout
    }

    pub fn kind(&self) -> ChannelKind {
        if self.layout.is_float() {
            ChannelKind::Float
        } else {
            ChannelKind::Joint
        }
    }

    pub fn is_float(&self) -> bool {
        self.layout.is_float()
    }

    /// Packed frame records
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of frame 0
    pub fn first_frame_size(&self) -> usize {
        self.layout.frame_size(true)
    }

    /// Bytes of every frame after frame 0
    pub fn frame_size(&self) -> usize {
        self.layout.frame_size(false)
    }

    /// Bytes of frame `sample_index`.
    ///
    /// # Panics
    /// Panics if `sample_index >= sample_count`.
    pub fn frame_bytes(&self, sample_index: u16) -> &[u8] {
        assert!(
            sample_index < self.sample_count,
            "sample {} out of range for channel with {} samples",
            sample_index,
            self.sample_count
        );
        let start = self.layout.frame_offset(sample_index);
        let len = self.layout.frame_size(sample_index == 0);
        &self.data[start..start + len]
    }
}
