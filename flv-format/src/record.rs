use std::fmt;
use std::io::{Read, Write};

use crate::config::TimestampLayout;
use crate::de::{get_u24, get_u32, read_exact_at, read_full, Deserialize};
use crate::ser::{put_u24, put_u32, write_parts, Serialize, U24_MAX};
use crate::{CodecConfig, Error, Result};

/// Flag, data size, timestamp and stream id.
pub const TAG_PREFIX_SIZE: usize = 11;

/// The size field following each payload.
pub const TRAILING_SIZE_LEN: usize = 4;

/// Largest payload the 24-bit data size field can describe.
pub const MAX_DATA_SIZE: usize = U24_MAX as usize;

#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TagKind {
    Audio = 0x08,
    Video = 0x09,
    Script = 0x12,
}

impl TagKind {
    pub fn is_audio(self) -> bool {
        self == TagKind::Audio
    }

    pub fn is_video(self) -> bool {
        self == TagKind::Video
    }

    pub fn is_script(self) -> bool {
        self == TagKind::Script
    }
}

impl TryFrom<u8> for TagKind {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, u8> {
        match value {
            0x08 => Ok(TagKind::Audio),
            0x09 => Ok(TagKind::Video),
            0x12 => Ok(TagKind::Script),
            other => Err(other),
        }
    }
}

impl From<TagKind> for u8 {
    fn from(kind: TagKind) -> u8 {
        kind as u8
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TagKind::Audio => "audio",
            TagKind::Video => "video",
            TagKind::Script => "script",
        };
        write!(f, "{}", s)
    }
}

/// One tag: an 11-byte prefix, the opaque payload and a trailing size field.
///
/// A single instance is meant to be decoded into repeatedly. The payload
/// buffer keeps its allocation between decodes and is cut to the new length
/// each time. After a failed decode the contents are unspecified.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TagRecord {
    /// The trailing size field as found by the last decode. Encoding ignores it
    /// and derives the field from `data` using the configured convention.
    pub previous_tag_size: u32,
    pub kind: TagKind,
    /// Milliseconds, carried verbatim.
    pub timestamp: u32,
    /// 24 bits wide on the wire, zero in practice.
    pub stream_id: u32,
    pub data: Vec<u8>,
}

impl TagRecord {
    pub fn new<D: Into<Vec<u8>>>(kind: TagKind, timestamp: u32, data: D) -> TagRecord {
        TagRecord {
            previous_tag_size: 0,
            kind,
            timestamp,
            stream_id: 0,
            data: data.into(),
        }
    }

    #[inline(always)]
    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    /// Bytes this tag occupies on the wire.
    #[inline(always)]
    pub fn encoded_len(&self) -> usize {
        TAG_PREFIX_SIZE + self.data.len() + TRAILING_SIZE_LEN
    }

    /// Decode the next tag into `self` using the default framing.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly at the tag boundary.
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<Option<usize>> {
        self.read_into(reader, &CodecConfig::default())
    }

    pub fn read_from_with<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        config: &CodecConfig,
    ) -> Result<Option<usize>> {
        self.read_into(reader, config)
    }

    /// Encode this tag using the default framing.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize> {
        self.write(writer, &CodecConfig::default())
    }

    pub fn write_to_with<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        config: &CodecConfig,
    ) -> Result<usize> {
        self.write(writer, config)
    }
}

impl Default for TagRecord {
    fn default() -> Self {
        TagRecord::new(TagKind::Audio, 0, Vec::new())
    }
}

fn get_timestamp(b: &[u8], layout: TimestampLayout) -> u32 {
    match layout {
        TimestampLayout::Contiguous => get_u32(b),
        TimestampLayout::Extended => get_u24(&b[0..3]) | (b[3] as u32) << 24,
    }
}

fn put_timestamp(b: &mut [u8], timestamp: u32, layout: TimestampLayout) {
    match layout {
        TimestampLayout::Contiguous => put_u32(b, timestamp),
        TimestampLayout::Extended => {
            put_u24(&mut b[0..3], timestamp);
            b[3] = (timestamp >> 24) as u8;
        }
    }
}

impl Deserialize for TagRecord {
    fn read_into<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        config: &CodecConfig,
    ) -> Result<Option<usize>> {
        let mut prefix = [0u8; TAG_PREFIX_SIZE];
        let n = read_full(reader, &mut prefix)?;
        if n == 0 {
            return Ok(None);
        }
        read_exact_at(reader, &mut prefix[n..], n, TAG_PREFIX_SIZE)?;

        // The size field is meaningless unless the flag is, so check before
        // touching the payload.
        let kind = TagKind::try_from(prefix[0]).map_err(|flag| Error::InvalidTagFormat { flag })?;
        let data_size = get_u24(&prefix[1..4]) as usize;
        let timestamp = get_timestamp(&prefix[4..8], config.timestamp);
        let stream_id = get_u24(&prefix[8..11]);
        let total = TAG_PREFIX_SIZE + data_size + TRAILING_SIZE_LEN;

        self.data.resize(data_size, 0);
        read_exact_at(reader, &mut self.data, TAG_PREFIX_SIZE, total)?;

        let mut trailing = [0u8; TRAILING_SIZE_LEN];
        read_exact_at(reader, &mut trailing, TAG_PREFIX_SIZE + data_size, total)?;
        let trailing = get_u32(&trailing);

        if config.verify_trailing_size {
            let expected = config.trailing_size.for_data_size(data_size as u32);
            if trailing != expected {
                return Err(Error::TrailingSizeMismatch {
                    expected,
                    found: trailing,
                    read: total,
                });
            }
        }

        self.previous_tag_size = trailing;
        self.kind = kind;
        self.timestamp = timestamp;
        self.stream_id = stream_id;

        tracing::debug!(
            bytes = total,
            %kind,
            data_size,
            timestamp,
            trailing,
            "decoded TagRecord"
        );

        Ok(Some(total))
    }
}

impl Serialize for TagRecord {
    fn write<W: Write + ?Sized>(&self, writer: &mut W, config: &CodecConfig) -> Result<usize> {
        if self.data.len() > MAX_DATA_SIZE {
            return Err(Error::PayloadTooLarge {
                len: self.data.len(),
            });
        }
        if self.stream_id > U24_MAX {
            return Err(Error::StreamIdOutOfRange {
                stream_id: self.stream_id,
            });
        }
        let data_size = self.data.len() as u32;

        let mut prefix = [0u8; TAG_PREFIX_SIZE];
        prefix[0] = self.kind.into();
        put_u24(&mut prefix[1..4], data_size);
        put_timestamp(&mut prefix[4..8], self.timestamp, config.timestamp);
        put_u24(&mut prefix[8..11], self.stream_id);

        let mut trailing = [0u8; TRAILING_SIZE_LEN];
        put_u32(&mut trailing, config.trailing_size.for_data_size(data_size));

        let n = write_parts(writer, &[&prefix[..], &self.data[..], &trailing[..]])?;

        tracing::debug!(
            bytes = n,
            kind = %self.kind,
            data_size,
            timestamp = self.timestamp,
            "encoded TagRecord"
        );

        Ok(n)
    }
}
