//! Half-float (f16) conversion and packed field access
//!
//! Channel records store every field either as IEEE-754 binary16 or binary32,
//! little-endian, with no padding between fields. [`FieldReader`] and
//! [`FieldWriter`] walk those fields in order at a fixed [`Precision`].

use half::f16;

use crate::format::Precision;

// ============================================================================
// Half-Float (f16) Conversion
// ============================================================================

/// Convert f32 to f16 bits
#[inline]
pub fn f32_to_f16(value: f32) -> u16 {
    f16::from_f32(value).to_bits()
}

/// Convert f16 bits to f32
#[inline]
pub fn f16_to_f32(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

/// Round a value through the given precision.
///
/// Useful for predicting what a decoder will return for an encoded value.
#[inline]
pub fn quantize(value: f32, precision: Precision) -> f32 {
    match precision {
        Precision::Half => f16_to_f32(f32_to_f16(value)),
        Precision::Full => value,
    }
}

// ============================================================================
// Field Cursor
// ============================================================================

/// Sequential reader over one packed frame record.
///
/// Indexes the underlying slice directly: reading past the end of a frame is
/// a corrupt-record bug and panics rather than returning made-up data.
pub struct FieldReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    precision: Precision,
}

impl<'a> FieldReader<'a> {
    pub fn new(bytes: &'a [u8], precision: Precision) -> Self {
        Self {
            bytes,
            offset: 0,
            precision,
        }
    }

    /// Read one scalar at the reader's precision.
    #[inline]
    pub fn read(&mut self) -> f32 {
        match self.precision {
            Precision::Half => self.read_f16(),
            Precision::Full => {
                let b = &self.bytes[self.offset..self.offset + 4];
                self.offset += 4;
                f32::from_le_bytes([b[0], b[1], b[2], b[3]])
            }
        }
    }

    /// Read one binary16 scalar regardless of the reader's precision.
    #[inline]
    pub fn read_f16(&mut self) -> f32 {
        let b = &self.bytes[self.offset..self.offset + 2];
        self.offset += 2;
        f16_to_f32(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Bytes consumed so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Size of the frame record being read
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Sequential writer producing packed frame records.
pub struct FieldWriter<'a> {
    out: &'a mut Vec<u8>,
    precision: Precision,
}

impl<'a> FieldWriter<'a> {
    pub fn new(out: &'a mut Vec<u8>, precision: Precision) -> Self {
        Self { out, precision }
    }

    /// Write one scalar at the writer's precision.
    #[inline]
    pub fn write(&mut self, value: f32) {
        match self.precision {
            Precision::Half => self.write_f16(value),
            Precision::Full => self.out.extend_from_slice(&value.to_le_bytes()),
        }
    }

    /// Write one binary16 scalar regardless of the writer's precision.
    #[inline]
    pub fn write_f16(&mut self, value: f32) {
        self.out.extend_from_slice(&f32_to_f16(value).to_le_bytes());
    }
}
