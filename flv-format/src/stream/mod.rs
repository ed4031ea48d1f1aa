//! Whole-stream drivers built on the header and tag codecs.

#[cfg(feature = "reader")]
mod reader;
#[cfg(feature = "writer")]
mod writer;

#[cfg(feature = "reader")]
pub use self::reader::FlvReader;
#[cfg(feature = "writer")]
pub use self::writer::FlvWriter;
