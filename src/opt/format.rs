//! `.opt` container constants.

/// Magic number at the start of every container (stored little-endian).
pub const OPT_MAGIC: u32 = 0xB50F_B50F;

/// Size of the container header in bytes.
pub const HEADER_SIZE: usize = 8;

/// Offset of the format version (u16 LE).
pub const VERSION_OFFSET: usize = 4;

/// Offset of the flags word (u16 LE).
pub const FLAGS_OFFSET: usize = 6;

/// Current container version.
pub const CURRENT_VERSION: u16 = 0;

/// Flag bit: payload is gzip-compressed.
pub const FLAG_COMPRESSED: u16 = 0x0001;
