//! Raw access to candidate image regions.
//!
//! [`RegionRead`] is the seam between the parser and the platform's memory
//! primitive. The parser never computes raw pointers itself; the only
//! `unsafe` in this crate is the volatile access inside [`MmioRegion`].
//! Byte slices also implement the trait so tests can drive the parser from
//! plain buffers.

/// Read-only access to a candidate image region.
///
/// Implementations assume the requested range is valid: [`BoundedReader`]
/// (the sole caller) checks `offset + dst.len()` against the region length
/// it was constructed with before every read.
///
/// [`BoundedReader`]: crate::reader::BoundedReader
pub trait RegionRead {
    /// Copies `dst.len()` bytes starting at `offset` into `dst`.
    fn read_bytes(&self, offset: usize, dst: &mut [u8]);
}

/// A memory-mapped image region identified by its base address.
#[derive(Debug, Clone, Copy)]
pub struct MmioRegion {
    base: usize,
}

impl MmioRegion {
    /// Creates a region descriptor for a mapped base address.
    ///
    /// # Safety
    ///
    /// `base..base + len` must be mapped, readable memory for every region
    /// length this descriptor is later paired with in a `BoundedReader`.
    #[must_use]
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the region.
    #[must_use]
    pub const fn base(self) -> usize {
        self.base
    }
}

impl RegionRead for MmioRegion {
    fn read_bytes(&self, offset: usize, dst: &mut [u8]) {
        for (i, byte) in dst.iter_mut().enumerate() {
            let addr = (self.base + offset + i) as *const u8;
            // SAFETY: the `MmioRegion::new` contract guarantees the range
            // is mapped and readable, and the caller has bounds-checked it.
            // Volatile keeps the compiler from caching flash-backed reads.
            *byte = unsafe { core::ptr::read_volatile(addr) };
        }
    }
}

impl RegionRead for [u8] {
    /// Panics if the range exceeds the slice; the `BoundedReader` region
    /// length must not exceed the slice length.
    fn read_bytes(&self, offset: usize, dst: &mut [u8]) {
        dst.copy_from_slice(&self[offset..offset + dst.len()]);
    }
}
