//! Manifest handle, slot model, and field accessors.

use crate::ManifestError;
use crate::layout;
use crate::reader::BoundedReader;
use crate::region::{MmioRegion, RegionRead};

// Per-slot regions for `Manifest::from_slot`.
//
// SAFETY: the slot bases and `REGION_LEN` describe the two flash-backed
// image slots of this deployment, mapped and readable for the lifetime of
// the boot stage.
static SLOT_A_REGION: MmioRegion = unsafe { MmioRegion::new(layout::SLOT_A_BASE) };
static SLOT_B_REGION: MmioRegion = unsafe { MmioRegion::new(layout::SLOT_B_BASE) };

/// Boot slot holding a candidate image.
///
/// Exactly two slots exist, fixed at compile time; there is no way to name
/// a slot outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Primary slot.
    A,
    /// Redundant slot.
    B,
}

impl Slot {
    /// Base address of this slot's image region.
    #[must_use]
    pub const fn base_addr(self) -> usize {
        match self {
            Self::A => layout::SLOT_A_BASE,
            Self::B => layout::SLOT_B_BASE,
        }
    }
}

/// Image signature words, exactly as stored in the manifest.
///
/// Pure data at this layer; interpretation belongs to the verification
/// stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Raw signature words.
    pub data: [u32; layout::SIGNATURE_SIZE_WORDS],
}

impl Signature {
    /// An all-zero signature buffer, for use as a copy destination.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            data: [0; layout::SIGNATURE_SIZE_WORDS],
        }
    }
}

/// Signature public key words, exactly as stored in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    /// Raw public key words.
    pub data: [u32; layout::PUBLIC_KEY_SIZE_WORDS],
}

impl PublicKey {
    /// An all-zero public key buffer, for use as a copy destination.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            data: [0; layout::PUBLIC_KEY_SIZE_WORDS],
        }
    }
}

/// Peripheral lockdown configuration words.
///
/// Opaque at this layer; applied by the handoff stage before jumping into
/// the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockdownInfo {
    /// Raw lockdown configuration words.
    pub data: [u32; layout::LOCKDOWN_INFO_SIZE_WORDS],
}

impl LockdownInfo {
    /// An all-zero lockdown buffer, for use as a copy destination.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            data: [0; layout::LOCKDOWN_INFO_SIZE_WORDS],
        }
    }
}

/// Immutable handle over one candidate image.
///
/// Carries only a description of where to read (region handle, trusted
/// region length, slot identity), no ownership of the memory and no parse
/// state, so it is freely copyable and accessors may be called in any
/// order, any number of times.
pub struct Manifest<'a, R: ?Sized = MmioRegion> {
    pub(crate) reader: BoundedReader<'a, R>,
    slot: Slot,
}

impl<R: ?Sized> Clone for Manifest<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for Manifest<'_, R> {}

impl Manifest<'static, MmioRegion> {
    /// Builds the handle for a slot's image using the deployment's fixed
    /// base address and region length.
    ///
    /// Infallible: every slot maps to a valid region. Construction does
    /// not read the image.
    #[must_use]
    pub fn from_slot(slot: Slot) -> Self {
        let region = match slot {
            Slot::A => &SLOT_A_REGION,
            Slot::B => &SLOT_B_REGION,
        };
        Self {
            reader: BoundedReader::new(region, layout::REGION_LEN),
            slot,
        }
    }
}

impl<'a, R: RegionRead + ?Sized> Manifest<'a, R> {
    /// Builds a handle over an arbitrary region.
    ///
    /// For non-default deployments and tests; production boot code uses
    /// [`Manifest::from_slot`]. `region_len` is the trusted bound for all
    /// accesses and must not exceed the readable extent of `region`.
    #[must_use]
    pub fn with_region(region: &'a R, region_len: u32, slot: Slot) -> Self {
        Self {
            reader: BoundedReader::new(region, region_len),
            slot,
        }
    }

    /// Slot this handle was built for.
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Trusted length of the image region, in bytes.
    #[must_use]
    pub fn region_len(&self) -> u32 {
        self.reader.region_len()
    }

    /// Reads the manifest identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the region is smaller
    /// than the minimal manifest header; callers should treat that as
    /// fatal misconfiguration rather than a missing field.
    pub fn identifier(&self) -> Result<u32, ManifestError> {
        self.reader.read_u32(layout::IDENTIFIER_OFFSET)
    }

    /// Reads the declared image length.
    ///
    /// Informational output for the caller only; it is never used to widen
    /// the trusted region bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the region is smaller
    /// than the minimal manifest header.
    pub fn image_len(&self) -> Result<u32, ManifestError> {
        self.reader.read_u32(layout::IMAGE_LEN_OFFSET)
    }

    /// Reads the image version.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the region is smaller
    /// than the minimal manifest header.
    pub fn version(&self) -> Result<u32, ManifestError> {
        self.reader.read_u32(layout::VERSION_OFFSET)
    }

    /// Reads the image timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the region is smaller
    /// than the minimal manifest header.
    pub fn timestamp(&self) -> Result<u64, ManifestError> {
        self.reader.read_u64(layout::TIMESTAMP_OFFSET)
    }

    /// Reads the signature algorithm identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the region is smaller
    /// than the minimal manifest header.
    pub fn algorithm_id(&self) -> Result<u32, ManifestError> {
        self.reader.read_u32(layout::ALGORITHM_ID_OFFSET)
    }

    /// Reads the signature key exponent.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the region is smaller
    /// than the minimal manifest header.
    pub fn exponent(&self) -> Result<u32, ManifestError> {
        self.reader.read_u32(layout::EXPONENT_OFFSET)
    }

    /// Reads the usage constraints word.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the region is smaller
    /// than the minimal manifest header.
    pub fn usage_constraints(&self) -> Result<u32, ManifestError> {
        self.reader.read_u32(layout::USAGE_CONSTRAINTS_OFFSET)
    }

    /// Copies the image signature into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the field range exceeds
    /// the region; `dst` is left untouched in that case, never partially
    /// written.
    pub fn signature(&self, dst: &mut Signature) -> Result<(), ManifestError> {
        self.reader.read_words(layout::SIGNATURE_OFFSET, &mut dst.data)
    }

    /// Copies the signature public key into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the field range exceeds
    /// the region; `dst` is left untouched in that case, never partially
    /// written.
    pub fn public_key(&self, dst: &mut PublicKey) -> Result<(), ManifestError> {
        self.reader.read_words(layout::PUBLIC_KEY_OFFSET, &mut dst.data)
    }

    /// Copies the peripheral lockdown info into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::OutOfBounds`] if the field range exceeds
    /// the region; `dst` is left untouched in that case, never partially
    /// written.
    pub fn lockdown_info(&self, dst: &mut LockdownInfo) -> Result<(), ManifestError> {
        self.reader.read_words(layout::LOCKDOWN_INFO_OFFSET, &mut dst.data)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ManifestError;

    /// Builds a region of the given length with plausible header fields.
    pub(crate) fn make_manifest_region(len: usize) -> Vec<u8> {
        let mut region = vec![0u8; len];
        let put_u32 = |region: &mut Vec<u8>, off: usize, val: u32| {
            if off + 4 <= region.len() {
                region[off..off + 4].copy_from_slice(&val.to_le_bytes());
            }
        };
        put_u32(&mut region, layout::IDENTIFIER_OFFSET as usize, 0x4552_4f4d);
        put_u32(&mut region, layout::IMAGE_LEN_OFFSET as usize, 0x0001_8000);
        put_u32(&mut region, layout::VERSION_OFFSET as usize, 3);
        if layout::TIMESTAMP_OFFSET as usize + 8 <= region.len() {
            region[layout::TIMESTAMP_OFFSET as usize..layout::TIMESTAMP_OFFSET as usize + 8]
                .copy_from_slice(&0x0000_0001_8765_4321u64.to_le_bytes());
        }
        put_u32(&mut region, layout::ALGORITHM_ID_OFFSET as usize, 2);
        put_u32(&mut region, layout::EXPONENT_OFFSET as usize, 65537);
        put_u32(&mut region, layout::USAGE_CONSTRAINTS_OFFSET as usize, 0x5);
        region
    }

    #[test]
    fn from_slot_uses_deployment_constants() {
        let a = Manifest::from_slot(Slot::A);
        assert_eq!(a.slot(), Slot::A);
        assert_eq!(a.region_len(), layout::REGION_LEN);
        assert_eq!(Slot::A.base_addr(), layout::SLOT_A_BASE);

        let b = Manifest::from_slot(Slot::B);
        assert_eq!(b.slot(), Slot::B);
        assert_eq!(b.region_len(), layout::REGION_LEN);
        assert_eq!(Slot::B.base_addr(), layout::SLOT_B_BASE);
    }

    #[test]
    fn scalar_accessors_round_trip() {
        let region = make_manifest_region(4096);
        let manifest = Manifest::with_region(region.as_slice(), 4096, Slot::A);
        assert_eq!(manifest.identifier(), Ok(0x4552_4f4d));
        assert_eq!(manifest.image_len(), Ok(0x0001_8000));
        assert_eq!(manifest.version(), Ok(3));
        assert_eq!(manifest.timestamp(), Ok(0x0000_0001_8765_4321));
        assert_eq!(manifest.algorithm_id(), Ok(2));
        assert_eq!(manifest.exponent(), Ok(65537));
        assert_eq!(manifest.usage_constraints(), Ok(0x5));
    }

    #[test]
    fn scalar_accessors_fail_on_tiny_region() {
        // A region shorter than the minimal header is a fatal
        // misconfiguration, surfaced as OutOfBounds.
        let region = make_manifest_region(4);
        let manifest = Manifest::with_region(region.as_slice(), 4, Slot::A);
        assert_eq!(manifest.identifier(), Ok(0x4552_4f4d));
        assert_eq!(manifest.image_len(), Err(ManifestError::OutOfBounds));
        assert_eq!(manifest.timestamp(), Err(ManifestError::OutOfBounds));
    }

    #[test]
    fn signature_all_ones() {
        // region_length = 4096, signature field at offset 64, 512 bytes of
        // 0xFF.
        let mut region = make_manifest_region(4096);
        for byte in &mut region[64..64 + 512] {
            *byte = 0xFF;
        }
        let manifest = Manifest::with_region(region.as_slice(), 4096, Slot::A);
        let mut sig = Signature::zeroed();
        manifest.signature(&mut sig).unwrap();
        assert_eq!(sig.data, [0xFFFF_FFFFu32; layout::SIGNATURE_SIZE_WORDS]);
    }

    #[test]
    fn short_region_image_len_ok_public_key_oob() {
        // region_length = 100: the image-length field (offset 8, size 4)
        // is in bounds, the public key (offset 600, 128 bytes) is not.
        let region = make_manifest_region(100);
        let manifest = Manifest::with_region(region.as_slice(), 100, Slot::B);
        assert_eq!(manifest.image_len(), Ok(0x0001_8000));
        let mut key = PublicKey::zeroed();
        assert_eq!(
            manifest.public_key(&mut key),
            Err(ManifestError::OutOfBounds)
        );
        assert_eq!(key, PublicKey::zeroed());
    }

    #[test]
    fn block_copy_boundary_cases() {
        let sig_end = layout::SIGNATURE_OFFSET as usize + 4 * layout::SIGNATURE_SIZE_WORDS;

        // Region ending exactly at the field's offset: must fail.
        let region = make_manifest_region(layout::SIGNATURE_OFFSET as usize);
        let manifest = Manifest::with_region(
            region.as_slice(),
            layout::SIGNATURE_OFFSET,
            Slot::A,
        );
        let mut sig = Signature::zeroed();
        assert_eq!(
            manifest.signature(&mut sig),
            Err(ManifestError::OutOfBounds)
        );
        assert_eq!(sig, Signature::zeroed());

        // Region ending exactly at offset + size: must succeed.
        let mut region = make_manifest_region(sig_end);
        region[sig_end - 4..].copy_from_slice(&0x1234_5678u32.to_le_bytes());
        let manifest = Manifest::with_region(region.as_slice(), sig_end as u32, Slot::A);
        manifest.signature(&mut sig).unwrap();
        assert_eq!(sig.data[layout::SIGNATURE_SIZE_WORDS - 1], 0x1234_5678);
    }

    #[test]
    fn lockdown_info_round_trip() {
        let mut region = make_manifest_region(4096);
        let off = layout::LOCKDOWN_INFO_OFFSET as usize;
        for (i, chunk) in region[off..off + 16].chunks_exact_mut(4).enumerate() {
            chunk.copy_from_slice(&(0x10u32 + i as u32).to_le_bytes());
        }
        let manifest = Manifest::with_region(region.as_slice(), 4096, Slot::A);
        let mut lockdown = LockdownInfo::zeroed();
        manifest.lockdown_info(&mut lockdown).unwrap();
        assert_eq!(lockdown.data, [0x10, 0x11, 0x12, 0x13]);
    }

    #[test]
    fn public_key_round_trip() {
        let mut region = make_manifest_region(4096);
        let off = layout::PUBLIC_KEY_OFFSET as usize;
        for (i, chunk) in region[off..off + 128].chunks_exact_mut(4).enumerate() {
            chunk.copy_from_slice(&(0xA000u32 + i as u32).to_le_bytes());
        }
        let manifest = Manifest::with_region(region.as_slice(), 4096, Slot::A);
        let mut key = PublicKey::zeroed();
        manifest.public_key(&mut key).unwrap();
        for (i, word) in key.data.iter().enumerate() {
            assert_eq!(*word, 0xA000 + i as u32);
        }
    }

    #[test]
    fn handle_reuse_and_copy() {
        let region = make_manifest_region(4096);
        let manifest = Manifest::with_region(region.as_slice(), 4096, Slot::A);
        let copy = manifest;
        // Accessors are stateless; order and repetition do not matter.
        assert_eq!(manifest.version(), Ok(3));
        assert_eq!(copy.identifier(), Ok(0x4552_4f4d));
        assert_eq!(manifest.identifier(), Ok(0x4552_4f4d));
    }
}
