use std::io::{Read, Write};

use crate::de::{get_u32, read_exact_at, read_full, Deserialize};
use crate::ser::{put_u32, write_parts, Serialize};
use crate::{CodecConfig, Error, Result};

pub const SIGNATURE: &[u8; 3] = b"FLV";
pub const VERSION: u8 = 1;

/// Size of the fixed header, which is also the data offset of a header without
/// extension bytes.
pub const HEADER_SIZE: usize = 9;

/// Which elementary streams a file declares.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum HeaderFlags {
    Video = 0x01,
    Audio = 0x04,
    AudioVideo = 0x05,
}

impl HeaderFlags {
    pub fn has_audio(self) -> bool {
        (self as u8) & (HeaderFlags::Audio as u8) != 0
    }

    pub fn has_video(self) -> bool {
        (self as u8) & (HeaderFlags::Video as u8) != 0
    }
}

impl TryFrom<u8> for HeaderFlags {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, u8> {
        match value {
            0x01 => Ok(HeaderFlags::Video),
            0x04 => Ok(HeaderFlags::Audio),
            0x05 => Ok(HeaderFlags::AudioVideo),
            other => Err(other),
        }
    }
}

impl From<HeaderFlags> for u8 {
    fn from(flags: HeaderFlags) -> u8 {
        flags as u8
    }
}

/// The file header preceding every tag.
///
/// Decoding overwrites every field, so one instance can be reused across files.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FileHeader {
    pub version: u8,
    pub flags: HeaderFlags,
    /// Offset from the start of the stream to the first byte after the header
    /// and its extension bytes.
    pub data_offset: u32,
}

impl FileHeader {
    pub const fn new(flags: HeaderFlags) -> FileHeader {
        FileHeader {
            version: VERSION,
            flags,
            data_offset: HEADER_SIZE as u32,
        }
    }

    /// Bytes between the fixed header and the first tag.
    pub fn extension_len(&self) -> Option<usize> {
        (self.data_offset as usize).checked_sub(HEADER_SIZE)
    }

    /// Decode the fixed 9-byte header into `self`.
    ///
    /// Returns `Ok(None)` when the stream is already exhausted. The data offset is
    /// stored as read and not interpreted.
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<Option<usize>> {
        self.read_into(reader, &CodecConfig::default())
    }

    /// Encode the fixed 9-byte header. Flags are typed, so no validation happens here.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize> {
        self.write(writer, &CodecConfig::default())
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        FileHeader::new(HeaderFlags::AudioVideo)
    }
}

impl Deserialize for FileHeader {
    fn read_into<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        _config: &CodecConfig,
    ) -> Result<Option<usize>> {
        let mut buf = [0u8; HEADER_SIZE];
        let n = read_full(reader, &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        read_exact_at(reader, &mut buf[n..], n, HEADER_SIZE)?;

        let mut signature = [0u8; 3];
        signature.copy_from_slice(&buf[0..3]);
        let flags = match HeaderFlags::try_from(buf[4]) {
            Ok(flags) if &signature == SIGNATURE => flags,
            _ => {
                return Err(Error::InvalidHeaderFormat {
                    signature,
                    flags: buf[4],
                })
            }
        };

        self.version = buf[3];
        self.flags = flags;
        self.data_offset = get_u32(&buf[5..9]);

        tracing::debug!(
            bytes = HEADER_SIZE,
            version = self.version,
            flags = buf[4],
            data_offset = self.data_offset,
            "decoded FileHeader"
        );

        Ok(Some(HEADER_SIZE))
    }
}

impl Serialize for FileHeader {
    fn write<W: Write + ?Sized>(&self, writer: &mut W, _config: &CodecConfig) -> Result<usize> {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..3].copy_from_slice(SIGNATURE);
        buf[3] = self.version;
        buf[4] = self.flags.into();
        put_u32(&mut buf[5..9], self.data_offset);

        write_parts(writer, &[&buf[..]])?;

        tracing::debug!(
            bytes = HEADER_SIZE,
            version = self.version,
            flags = buf[4],
            data_offset = self.data_offset,
            "encoded FileHeader"
        );

        Ok(HEADER_SIZE)
    }
}
