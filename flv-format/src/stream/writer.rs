use std::io::{self, Read, Write};

use crate::counting::CountingWriter;
use crate::record::TRAILING_SIZE_LEN;
use crate::ser::Serialize;
use crate::{CodecConfig, Error, FileHeader, Result, TagRecord};

/// Sequential writer: the header on construction, then one tag per call.
#[derive(Debug)]
pub struct FlvWriter<W: Write> {
    writer: CountingWriter<W>,
    config: CodecConfig,
}

impl<W: Write> FlvWriter<W> {
    pub fn new(writer: W, header: &FileHeader) -> Result<FlvWriter<W>> {
        FlvWriter::with_config(writer, header, CodecConfig::default())
    }

    /// Write the header, zero-filled extension bytes up to its data offset, and
    /// the zero back-pointer when `header_back_pointer` is set.
    pub fn with_config(
        writer: W,
        header: &FileHeader,
        config: CodecConfig,
    ) -> Result<FlvWriter<W>> {
        let extension = header
            .extension_len()
            .ok_or(Error::InvalidDataOffset {
                data_offset: header.data_offset,
                read: 0,
            })?;

        let mut writer = CountingWriter::new(writer);
        header.write(&mut writer, &config)?;

        if extension > 0 {
            io::copy(&mut io::repeat(0).take(extension as u64), &mut writer).map_err(
                |source| Error::Io {
                    offset: writer.bytes_written() as usize,
                    source,
                },
            )?;
        }

        if config.header_back_pointer {
            writer
                .write_all(&[0u8; TRAILING_SIZE_LEN])
                .map_err(|source| Error::Io {
                    offset: writer.bytes_written() as usize,
                    source,
                })?;
        }

        tracing::debug!(
            offset = writer.bytes_written(),
            flags = u8::from(header.flags),
            trailing_size = %config.trailing_size,
            "started FLV stream"
        );

        Ok(FlvWriter { writer, config })
    }

    pub fn write_tag(&mut self, tag: &TagRecord) -> Result<usize> {
        let offset = self.writer.bytes_written();
        let bytes = tag.write(&mut self.writer, &self.config)?;
        tracing::trace!(offset, bytes, kind = %tag.kind, "wrote tag");
        Ok(bytes)
    }

    /// Bytes handed to the underlying writer so far.
    #[inline(always)]
    pub fn position(&self) -> u64 {
        self.writer.bytes_written()
    }

    #[inline(always)]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().map_err(|source| Error::Io {
            offset: self.writer.bytes_written() as usize,
            source,
        })?;
        Ok(self.writer.into_inner())
    }
}
