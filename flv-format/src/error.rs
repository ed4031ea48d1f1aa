use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid header format (signature: {signature:02x?}, flags: {flags:#04x}).")]
    InvalidHeaderFormat { signature: [u8; 3], flags: u8 },

    #[error("Invalid tag format (flag: {flag:#04x}).")]
    InvalidTagFormat { flag: u8 },

    #[error("Stream ended after {read} of {expected} bytes.")]
    Truncated { read: usize, expected: usize },

    #[error("I/O error after {offset} bytes.")]
    Io {
        offset: usize,
        #[source]
        source: io::Error,
    },

    #[error("Tag payload of {len} bytes does not fit the 24-bit size field.")]
    PayloadTooLarge { len: usize },

    #[error("Stream id {stream_id:#x} does not fit the 24-bit stream id field.")]
    StreamIdOutOfRange { stream_id: u32 },

    #[error("Trailing size field is {found}, expected {expected}.")]
    TrailingSizeMismatch {
        expected: u32,
        found: u32,
        read: usize,
    },

    #[error("Header data offset {data_offset} points inside the header.")]
    InvalidDataOffset { data_offset: u32, read: usize },
}

impl Error {
    /// Number of bytes of the current unit that were transferred before the failure.
    ///
    /// Validation failures report the bytes consumed to reach the failing check,
    /// encode-side errors report zero since nothing is written.
    pub fn bytes_transferred(&self) -> usize {
        match self {
            Error::Truncated { read, .. }
            | Error::TrailingSizeMismatch { read, .. }
            | Error::InvalidDataOffset { read, .. } => *read,
            Error::Io { offset, .. } => *offset,
            Error::InvalidHeaderFormat { .. } => crate::header::HEADER_SIZE,
            Error::InvalidTagFormat { .. } => crate::record::TAG_PREFIX_SIZE,
            Error::PayloadTooLarge { .. } | Error::StreamIdOutOfRange { .. } => 0,
        }
    }

    /// True when the stream ended partway through a unit.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io { source, .. } => source,
            Error::Truncated { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            Error::PayloadTooLarge { .. } | Error::StreamIdOutOfRange { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
            Error::InvalidHeaderFormat { .. }
            | Error::InvalidTagFormat { .. }
            | Error::TrailingSizeMismatch { .. }
            | Error::InvalidDataOffset { .. } => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
