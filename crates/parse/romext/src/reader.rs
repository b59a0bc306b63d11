//! Bounds-checked reads over an image region.

use crate::ManifestError;
use crate::region::RegionRead;

/// Bounds-checked reader over a candidate image region.
///
/// Pairs a [`RegionRead`] handle with the trusted region length and checks
/// `offset + size <= region_len` with overflow-safe arithmetic before every
/// physical read. All higher-level accessors route through this type; a
/// failed check performs no read and never touches a destination buffer.
pub struct BoundedReader<'a, R: ?Sized> {
    region: &'a R,
    region_len: u32,
}

impl<R: ?Sized> Clone for BoundedReader<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for BoundedReader<'_, R> {}

impl<'a, R: RegionRead + ?Sized> BoundedReader<'a, R> {
    /// Creates a reader over `region` with the given trusted length.
    ///
    /// `region_len` comes from deployment configuration, never from the
    /// image being parsed.
    #[must_use]
    pub fn new(region: &'a R, region_len: u32) -> Self {
        Self { region, region_len }
    }

    /// Length of the readable region, in bytes.
    #[must_use]
    pub fn region_len(&self) -> u32 {
        self.region_len
    }

    /// Checks that `[offset, offset + size)` lies within the region.
    ///
    /// A wrapped sum is rejected rather than being accepted as a small
    /// in-bounds value.
    fn check(&self, offset: u32, size: u32) -> Result<(), ManifestError> {
        let end = offset.checked_add(size).ok_or(ManifestError::OutOfBounds)?;
        if end > self.region_len {
            return Err(ManifestError::OutOfBounds);
        }
        Ok(())
    }

    /// Reads a little-endian `u32` at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the field range exceeds
    /// the region.
    pub fn read_u32(&self, offset: u32) -> Result<u32, ManifestError> {
        self.check(offset, 4)?;
        let mut bytes = [0u8; 4];
        self.region.read_bytes(offset as usize, &mut bytes);
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a little-endian `u64` at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the field range exceeds
    /// the region.
    pub fn read_u64(&self, offset: u32) -> Result<u64, ManifestError> {
        self.check(offset, 8)?;
        let mut bytes = [0u8; 8];
        self.region.read_bytes(offset as usize, &mut bytes);
        Ok(u64::from_le_bytes(bytes))
    }

    /// Reads `dst.len()` little-endian words starting at `offset`.
    ///
    /// The full range is validated before any word is copied, so `dst` is
    /// either fully populated or left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the field range exceeds
    /// the region; `dst` is not modified in that case.
    pub fn read_words(&self, offset: u32, dst: &mut [u32]) -> Result<(), ManifestError> {
        let size = u32::try_from(core::mem::size_of_val(dst))
            .map_err(|_| ManifestError::OutOfBounds)?;
        self.check(offset, size)?;
        let mut word = [0u8; 4];
        for (i, out) in dst.iter_mut().enumerate() {
            self.region.read_bytes(offset as usize + i * 4, &mut word);
            *out = u32::from_le_bytes(word);
        }
        Ok(())
    }
}
