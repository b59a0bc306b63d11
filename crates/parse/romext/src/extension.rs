//! Image extension descriptor table.
//!
//! Extensions are optional auxiliary payloads referenced from the manifest
//! by address and checksum. The resolver only reports descriptors; it
//! never dereferences the target address — reading or executing extension
//! content is a later stage's job, gated on [`Extension::verify`].

use crate::ManifestError;
use crate::layout;
use crate::manifest::Manifest;
use crate::region::RegionRead;

/// Image extension identifier.
///
/// The descriptor table has exactly four entries; this closed enum is the
/// complete set, so an out-of-range identifier is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionId {
    /// Image extension 0.
    Ext0 = 0,
    /// Image extension 1.
    Ext1 = 1,
    /// Image extension 2.
    Ext2 = 2,
    /// Image extension 3.
    Ext3 = 3,
}

impl ExtensionId {
    /// All extension identifiers, in table order.
    pub const ALL: [Self; 4] = [Self::Ext0, Self::Ext1, Self::Ext2, Self::Ext3];

    /// Offset of this identifier's descriptor within the manifest.
    const fn descriptor_offset(self) -> u32 {
        layout::EXTENSION_TABLE_OFFSET + self as u32 * layout::EXTENSION_ENTRY_SIZE
    }
}

/// A resolved image extension descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extension {
    /// Absolute address of the extension content.
    ///
    /// An opaque integer at this layer; the parser never reads through it.
    pub address: u32,
    /// Declared CRC-32 of the extension content.
    pub checksum: u32,
}

impl Extension {
    /// Checks `content` against the declared checksum.
    ///
    /// `content` is the extension's bytes as read by a later stage; the
    /// parser itself never fetches them. The checksum is CRC-32 (IEEE).
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::ChecksumMismatch`] if the computed value
    /// disagrees with the descriptor. Security-relevant: must be surfaced,
    /// never ignored.
    pub fn verify(&self, content: &[u8]) -> Result<(), ManifestError> {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(content);
        if hasher.finalize() == self.checksum {
            Ok(())
        } else {
            Err(ManifestError::ChecksumMismatch)
        }
    }
}

impl<R: RegionRead + ?Sized> Manifest<'_, R> {
    /// Resolves the extension descriptor for `id`.
    ///
    /// A zero target address is the "absent" sentinel: extensions are
    /// optional per identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the descriptor straddles
    /// the region boundary (distinct from absence), or
    /// [`ManifestError::ExtensionNotFound`] if the extension is not
    /// present in this image.
    pub fn extension(&self, id: ExtensionId) -> Result<Extension, ManifestError> {
        let offset = id.descriptor_offset();
        let address = self.reader.read_u32(offset)?;
        let checksum = self.reader.read_u32(offset + 4)?;
        if address == 0 {
            return Err(ManifestError::ExtensionNotFound);
        }
        Ok(Extension { address, checksum })
    }
}
