//! Encoder and decoder for the FLV (Flash Video) container layout.
//!
//! A stream is a [`FileHeader`] followed by any number of [`TagRecord`]s. Both
//! types decode in place from any [`std::io::Read`] and encode to any
//! [`std::io::Write`], one unit per call, reporting the bytes transferred.
//! Tag payloads are opaque.
//!
//! ```
//! use flv_format::{FileHeader, HeaderFlags, TagKind, TagRecord};
//!
//! let mut out = Vec::new();
//! FileHeader::new(HeaderFlags::Audio).write_to(&mut out)?;
//! TagRecord::new(TagKind::Audio, 0, vec![0xaf, 0x01]).write_to(&mut out)?;
//!
//! let mut input = out.as_slice();
//! let mut header = FileHeader::default();
//! header.read_from(&mut input)?;
//!
//! let mut tag = TagRecord::default();
//! while tag.read_from(&mut input)?.is_some() {
//!     assert_eq!(tag.data, [0xaf, 0x01]);
//! }
//! # Ok::<(), flv_format::Error>(())
//! ```
//!
//! [`FlvReader`] and [`FlvWriter`] drive a whole stream, including the header
//! extension and back-pointer handling selected through [`CodecConfig`].

mod config;
mod counting;
mod de;
mod error;
mod header;
mod record;
mod ser;
pub mod stream;

pub use config::{CodecConfig, TimestampLayout, TrailingSize};
pub use counting::{CountingReader, CountingWriter};
pub use error::{Error, Result};
pub use header::{FileHeader, HeaderFlags, HEADER_SIZE, SIGNATURE, VERSION};
pub use record::{TagKind, TagRecord, MAX_DATA_SIZE, TAG_PREFIX_SIZE, TRAILING_SIZE_LEN};
pub use ser::U24_MAX;
#[cfg(feature = "reader")]
pub use stream::FlvReader;
#[cfg(feature = "writer")]
pub use stream::FlvWriter;
