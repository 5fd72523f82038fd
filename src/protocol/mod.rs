//! Cohda binary protocol framing.
//!
//! Fixed-layout big-endian headers used to exchange control metadata with
//! external V2X hardware over a bidirectional UDP channel.

mod error;
pub mod header;
pub mod wire;

pub use error::{Result, WireError};
pub use header::{DataIndicationHeader, DataRequestHeader, GnDestination};

/// Data request header size in bytes.
pub const REQUEST_HEADER_SIZE: usize = DataRequestHeader::SIZE;

/// Data indication header size in bytes.
pub const INDICATION_HEADER_SIZE: usize = DataIndicationHeader::SIZE;
