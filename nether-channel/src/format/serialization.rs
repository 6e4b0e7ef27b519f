//! Byte-level header serialization.

/// Headers that pack to a fixed number of bytes.
///
/// ```
/// use nether_channel::format::{BinarySerializable, ChannelHeader};
///
/// let header = ChannelHeader::new(30, 0);
/// let parsed = ChannelHeader::deserialize(&header.serialize()).unwrap();
/// assert_eq!(parsed, header);
/// ```
pub trait BinarySerializable: Sized {
    const SIZE: usize;

    fn serialize(&self) -> Vec<u8>;

    /// `None` if `bytes` is shorter than `SIZE`
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

impl BinarySerializable for super::ChannelHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}
