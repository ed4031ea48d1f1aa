use std::io::{ErrorKind, Read};

use byteorder::{BigEndian, ByteOrder};

use crate::{CodecConfig, Error, Result};

/// Decode a value in place, reusing whatever buffers `self` already owns.
///
/// `Ok(None)` means the stream had no bytes left at the unit boundary.
/// `Ok(Some(n))` is the number of bytes consumed.
pub(crate) trait Deserialize {
    fn read_into<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        config: &CodecConfig,
    ) -> Result<Option<usize>>;
}

/// Read until `buf` is full or the reader reports end of stream.
///
/// Returns how many bytes landed in `buf`. Transport errors other than
/// `Interrupted` are surfaced with the count reached so far.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(Error::Io { offset: filled, source }),
        }
    }
    Ok(filled)
}

/// Fill `buf` completely. `consumed` is the number of bytes of the enclosing
/// unit already taken from the stream and `expected` the unit's full length,
/// both of which end up in the error on a short read.
pub(crate) fn read_exact_at<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    consumed: usize,
    expected: usize,
) -> Result<()> {
    let n = read_full(reader, buf).map_err(|e| match e {
        Error::Io { offset, source } => Error::Io {
            offset: consumed + offset,
            source,
        },
        e => e,
    })?;
    if n < buf.len() {
        return Err(Error::Truncated {
            read: consumed + n,
            expected,
        });
    }
    Ok(())
}

#[inline]
pub(crate) fn get_u24(b: &[u8]) -> u32 {
    (b[0] as u32) << 16 | (b[1] as u32) << 8 | b[2] as u32
}

#[inline]
pub(crate) fn get_u32(b: &[u8]) -> u32 {
    BigEndian::read_u32(b)
}
