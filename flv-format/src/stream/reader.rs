use std::io::{self, Read};

use crate::counting::CountingReader;
use crate::de::{get_u32, read_exact_at, Deserialize};
use crate::header::HEADER_SIZE;
use crate::record::TRAILING_SIZE_LEN;
use crate::{CodecConfig, Error, FileHeader, Result, TagRecord};

/// Sequential reader over a whole stream: the header, then one tag per call.
///
/// Every tag is decoded into the same [`TagRecord`], so the payload buffer is
/// allocated once and grown only when a larger tag shows up.
#[derive(Debug)]
pub struct FlvReader<R> {
    reader: CountingReader<R>,
    config: CodecConfig,
    header: FileHeader,
    tag: TagRecord,
}

impl<R: Read> FlvReader<R> {
    pub fn new(reader: R) -> Result<FlvReader<R>> {
        FlvReader::with_config(reader, CodecConfig::default())
    }

    /// Decode the header and position the stream on the first tag.
    ///
    /// Header extension bytes are skipped. With `header_back_pointer` set the
    /// 4-byte field after the header is consumed as well.
    pub fn with_config(reader: R, config: CodecConfig) -> Result<FlvReader<R>> {
        let mut reader = CountingReader::new(reader);

        let mut header = FileHeader::default();
        if header.read_into(&mut reader, &config)?.is_none() {
            return Err(Error::Truncated {
                read: 0,
                expected: HEADER_SIZE,
            });
        }

        let extension = header
            .extension_len()
            .ok_or(Error::InvalidDataOffset {
                data_offset: header.data_offset,
                read: HEADER_SIZE,
            })?;
        let data_offset = header.data_offset as usize;

        if extension > 0 {
            let mut skip = (&mut reader).take(extension as u64);
            let copied = io::copy(&mut skip, &mut io::sink());
            let skipped = copied.map_err(|source| Error::Io {
                offset: reader.bytes_read() as usize,
                source,
            })?;
            if (skipped as usize) < extension {
                return Err(Error::Truncated {
                    read: HEADER_SIZE + skipped as usize,
                    expected: data_offset,
                });
            }
            tracing::trace!(bytes = extension, "skipped header extension");
        }

        if config.header_back_pointer {
            let mut buf = [0u8; TRAILING_SIZE_LEN];
            read_exact_at(
                &mut reader,
                &mut buf,
                data_offset,
                data_offset + TRAILING_SIZE_LEN,
            )?;
            let found = get_u32(&buf);
            if config.verify_trailing_size && found != 0 {
                return Err(Error::TrailingSizeMismatch {
                    expected: 0,
                    found,
                    read: data_offset + TRAILING_SIZE_LEN,
                });
            }
        }

        tracing::debug!(
            offset = reader.bytes_read(),
            flags = u8::from(header.flags),
            trailing_size = %config.trailing_size,
            "opened FLV stream"
        );

        Ok(FlvReader {
            reader,
            config,
            header,
            tag: TagRecord::default(),
        })
    }

    /// Decode the next tag. `Ok(None)` marks a clean end of stream.
    pub fn next_tag(&mut self) -> Result<Option<&TagRecord>> {
        let offset = self.reader.bytes_read();
        match self.tag.read_into(&mut self.reader, &self.config)? {
            Some(bytes) => {
                tracing::trace!(offset, bytes, kind = %self.tag.kind, "read tag");
                Ok(Some(&self.tag))
            }
            None => Ok(None),
        }
    }
}

impl<R> FlvReader<R> {
    #[inline(always)]
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    #[inline(always)]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Bytes consumed from the underlying reader so far.
    #[inline(always)]
    pub fn position(&self) -> u64 {
        self.reader.bytes_read()
    }

    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}
