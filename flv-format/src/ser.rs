use std::io::Write;

use byteorder::{BigEndian, ByteOrder};

use crate::counting::CountingWriter;
use crate::{CodecConfig, Error, Result};

/// Encode a value, returning the number of bytes written.
pub(crate) trait Serialize {
    fn write<W: Write + ?Sized>(&self, writer: &mut W, config: &CodecConfig) -> Result<usize>;
}

/// Largest value representable in a 24-bit field.
pub const U24_MAX: u32 = 0xff_ffff;

/// Store the low 24 bits of `value` big-endian. Higher bits are dropped, so
/// callers range-check first.
#[inline]
pub(crate) fn put_u24(b: &mut [u8], value: u32) {
    b[0] = (value >> 16) as u8;
    b[1] = (value >> 8) as u8;
    b[2] = value as u8;
}

#[inline]
pub(crate) fn put_u32(b: &mut [u8], value: u32) {
    BigEndian::write_u32(b, value)
}

/// Write each part in order. A transport error carries the number of bytes
/// the writer accepted before failing.
pub(crate) fn write_parts<W: Write + ?Sized>(writer: &mut W, parts: &[&[u8]]) -> Result<usize> {
    let mut writer = CountingWriter::new(writer);
    for part in parts {
        if let Err(source) = writer.write_all(part) {
            return Err(Error::Io {
                offset: writer.bytes_written() as usize,
                source,
            });
        }
    }
    Ok(writer.bytes_written() as usize)
}
