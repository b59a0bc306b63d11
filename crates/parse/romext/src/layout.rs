//! Manifest layout constants.
//!
//! Fixed field offsets and sizes for the manifest format version in use,
//! plus the per-slot base addresses and region length for this deployment.
//! These are versioned alongside the manifest format; nothing here is read
//! from the image itself.
//!
//! All scalar fields are little-endian. Compound fields are arrays of
//! little-endian 32-bit words.

/// Base address of boot slot A.
pub const SLOT_A_BASE: usize = 0x2000_0000;

/// Base address of boot slot B.
pub const SLOT_B_BASE: usize = 0x2008_0000;

/// Maximum size of an image occupying a slot, in bytes (512 KiB).
///
/// This is the trusted bound for every field access. It is a deployment
/// constant, deliberately independent of the image-length field stored
/// inside the (untrusted) manifest.
pub const REGION_LEN: u32 = 0x8_0000;

/// Offset of the manifest identifier field (4 bytes).
pub const IDENTIFIER_OFFSET: u32 = 0x00;

/// Offset of the image length field (4 bytes).
pub const IMAGE_LEN_OFFSET: u32 = 0x08;

/// Offset of the image version field (4 bytes).
pub const VERSION_OFFSET: u32 = 0x0c;

/// Offset of the image timestamp field (8 bytes).
pub const TIMESTAMP_OFFSET: u32 = 0x10;

/// Offset of the signature algorithm identifier field (4 bytes).
pub const ALGORITHM_ID_OFFSET: u32 = 0x18;

/// Offset of the signature key exponent field (4 bytes).
pub const EXPONENT_OFFSET: u32 = 0x1c;

/// Offset of the usage constraints field (4 bytes).
pub const USAGE_CONSTRAINTS_OFFSET: u32 = 0x20;

/// Offset of the peripheral lockdown info field.
pub const LOCKDOWN_INFO_OFFSET: u32 = 0x24;

/// Size of the peripheral lockdown info field, in 32-bit words.
pub const LOCKDOWN_INFO_SIZE_WORDS: usize = 4;

/// Offset of the image signature field.
pub const SIGNATURE_OFFSET: u32 = 0x40;

/// Size of the image signature field, in 32-bit words.
pub const SIGNATURE_SIZE_WORDS: usize = 128;

/// Offset of the signature public key field.
pub const PUBLIC_KEY_OFFSET: u32 = 0x258;

/// Size of the signature public key field, in 32-bit words.
pub const PUBLIC_KEY_SIZE_WORDS: usize = 32;

/// Offset of the image extension descriptor table.
///
/// The table holds one descriptor per extension identifier, in identifier
/// order.
pub const EXTENSION_TABLE_OFFSET: u32 = 0x2d8;

/// Size of one extension descriptor: a 32-bit target address followed by a
/// 32-bit checksum.
pub const EXTENSION_ENTRY_SIZE: u32 = 8;
