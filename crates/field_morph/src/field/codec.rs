//! Binary persistence for [`Field`].
//!
//! The persisted layout is an optional 8-byte signature, the grid dimensions
//! as native-endian `u32`s, and the samples as native-endian `f32`s in
//! row-major order. Decoding without the signature starts directly at the
//! width field, which lets the encoding sit inside a larger container whose
//! framing the caller owns.
use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::field::Field;

/// Signature prefixing a persisted field when magic emission is requested.
pub const FIELD_MAGIC: [u8; 8] = *b"SHAPE \n\0";

impl Field {
    /// Decodes a field from `reader`.
    ///
    /// With `expect_magic`, the stream must begin with [`FIELD_MAGIC`];
    /// a mismatch fails with [`Error::Format`]. Any short read fails with
    /// [`Error::Io`]. On error no field is constructed.
    pub fn read_from<R: Read>(reader: &mut R, expect_magic: bool) -> Result<Self> {
        if expect_magic {
            let mut magic = [0u8; 8];
            reader.read_exact(&mut magic)?;
            if magic != FIELD_MAGIC {
                return Err(Error::Format(format!(
                    "magic bytes {magic:02x?} do not match"
                )));
            }
        }

        let width = read_u32(reader)?;
        let height = read_u32(reader)?;

        let len = width as usize * height as usize;
        let mut raw = vec![0u8; len * 4];
        reader.read_exact(&mut raw)?;

        let samples = raw
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Encodes the field to `writer`, prefixing [`FIELD_MAGIC`] when
    /// `write_magic` is set. Fails with [`Error::Io`] if the sink reports a
    /// write failure.
    pub fn write_to<W: Write>(&self, writer: &mut W, write_magic: bool) -> Result<()> {
        if write_magic {
            writer.write_all(&FIELD_MAGIC)?;
        }

        writer.write_all(&self.width.to_ne_bytes())?;
        writer.write_all(&self.height.to_ne_bytes())?;

        let mut raw = Vec::with_capacity(self.samples.len() * 4);
        for sample in &self.samples {
            raw.extend_from_slice(&sample.to_ne_bytes());
        }
        writer.write_all(&raw)?;

        Ok(())
    }
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_ne_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;

    fn stamped_field() -> Field {
        let mut field = Field::new(4, 4);
        field.stamp_disc(Vec2::ZERO, 10.0);
        field
    }

    fn random_field(width: u32, height: u32, seed: u64) -> Field {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut field = Field::new(width, height);
        for sample in field.samples_mut() {
            *sample = rng.random_range(-4.0f32..4.0);
        }
        field
    }

    #[test]
    fn round_trip_with_magic() {
        let field = stamped_field();
        let mut bytes = Vec::new();
        field.write_to(&mut bytes, true).unwrap();

        let decoded = Field::read_from(&mut Cursor::new(bytes), true).unwrap();
        assert_eq!(decoded, field);
    }

    #[test]
    fn round_trip_without_magic() {
        let field = random_field(7, 3, 42);
        let mut bytes = Vec::new();
        field.write_to(&mut bytes, false).unwrap();

        assert_eq!(bytes.len(), 8 + 7 * 3 * 4);
        let decoded = Field::read_from(&mut Cursor::new(bytes), false).unwrap();
        assert_eq!(decoded, field);
    }

    #[test]
    fn round_trip_preserves_arbitrary_samples() {
        for seed in 0..4 {
            let field = random_field(16, 9, seed);
            let mut bytes = Vec::new();
            field.write_to(&mut bytes, true).unwrap();
            let decoded = Field::read_from(&mut Cursor::new(bytes), true).unwrap();
            assert_eq!(decoded, field);
        }
    }

    #[test]
    fn round_trip_preserves_negative_infinity() {
        let field = Field::new(3, 3);
        let mut bytes = Vec::new();
        field.write_to(&mut bytes, true).unwrap();

        let decoded = Field::read_from(&mut Cursor::new(bytes), true).unwrap();
        assert!(decoded.samples().iter().all(|s| *s == f32::NEG_INFINITY));
    }

    #[test]
    fn magic_mismatch_is_a_format_error() {
        let field = stamped_field();
        let mut bytes = Vec::new();
        field.write_to(&mut bytes, true).unwrap();
        bytes[0] = b'X';

        let err = Field::read_from(&mut Cursor::new(bytes), true).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn truncation_is_an_io_error() {
        let field = stamped_field();
        let mut bytes = Vec::new();
        field.write_to(&mut bytes, true).unwrap();

        // Mid-magic, mid-header, mid-samples, one byte short.
        for cut in [4, 12, 8 + 8 + 5, bytes.len() - 1] {
            let err = Field::read_from(&mut Cursor::new(&bytes[..cut]), true).unwrap_err();
            assert!(matches!(err, Error::Io(_)), "cut at {cut}");
        }
    }

    #[test]
    fn write_failure_is_an_io_error() {
        struct FailingSink;

        impl Write for FailingSink {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("sink failed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = stamped_field().write_to(&mut FailingSink, true).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
