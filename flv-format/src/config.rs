use std::fmt;

/// What the 4-byte field following each tag payload counts.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum TrailingSize {
    /// The payload length only.
    #[default]
    PayloadOnly,
    /// The 11-byte prefix plus the payload, as Adobe's `PreviousTagSize` does.
    WithPrefix,
}

impl TrailingSize {
    pub fn for_data_size(self, data_size: u32) -> u32 {
        match self {
            TrailingSize::PayloadOnly => data_size,
            TrailingSize::WithPrefix => data_size + crate::record::TAG_PREFIX_SIZE as u32,
        }
    }
}

impl fmt::Display for TrailingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrailingSize::PayloadOnly => "payload-only",
            TrailingSize::WithPrefix => "with-prefix",
        };
        write!(f, "{}", s)
    }
}

/// Byte arrangement of the timestamp inside the tag prefix.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum TimestampLayout {
    /// Big-endian 32-bit value.
    #[default]
    Contiguous,
    /// Low 24 bits big-endian, then the high 8 bits.
    Extended,
}

/// Framing options shared by the tag codec and the stream drivers.
///
/// The default describes the compact layout: a 9-byte header directly followed
/// by tags whose trailing field holds the payload length. [`CodecConfig::canonical`]
/// describes files as produced by Adobe tooling.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CodecConfig {
    pub trailing_size: TrailingSize,
    pub verify_trailing_size: bool,
    pub timestamp: TimestampLayout,
    pub header_back_pointer: bool,
}

impl CodecConfig {
    pub const fn new() -> CodecConfig {
        CodecConfig {
            trailing_size: TrailingSize::PayloadOnly,
            verify_trailing_size: false,
            timestamp: TimestampLayout::Contiguous,
            header_back_pointer: false,
        }
    }

    pub const fn canonical() -> CodecConfig {
        CodecConfig {
            trailing_size: TrailingSize::WithPrefix,
            verify_trailing_size: false,
            timestamp: TimestampLayout::Extended,
            header_back_pointer: true,
        }
    }

    pub const fn with_trailing_size(mut self, trailing_size: TrailingSize) -> CodecConfig {
        self.trailing_size = trailing_size;
        self
    }

    pub const fn with_verify_trailing_size(mut self, verify: bool) -> CodecConfig {
        self.verify_trailing_size = verify;
        self
    }

    pub const fn with_timestamp(mut self, timestamp: TimestampLayout) -> CodecConfig {
        self.timestamp = timestamp;
        self
    }

    pub const fn with_header_back_pointer(mut self, enabled: bool) -> CodecConfig {
        self.header_back_pointer = enabled;
        self
    }
}
