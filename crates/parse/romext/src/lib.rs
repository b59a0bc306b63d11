//! ROM Extension manifest parser for the Muon boot chain.
//!
//! Extracts structured fields (identifier, image length, signature, public
//! key, version, timestamp, algorithm parameters, peripheral lockdown data,
//! and optional image extensions) from a candidate boot image residing in
//! one of two redundant slots, before that image has been verified and
//! before any of its code has run. The image is adversarial input: every
//! accessor bounds-checks the field range against the deployment's fixed
//! region length before touching memory, and the region length is never
//! taken from the (untrusted) image itself.
//!
//! All reads go through [`BoundedReader`], the single component allowed to
//! translate `(offset, size)` into raw bytes. Accessors are pure functions
//! over an immutable [`Manifest`] handle; there is no cursor or other
//! mutable parser state, so a handle may be reused and shared freely.
//!
//! # Usage
//!
//! ```ignore
//! use muon_romext::{Manifest, Signature, Slot};
//!
//! let manifest = Manifest::from_slot(Slot::A);
//! let image_len = manifest.image_len()?;
//! let mut sig = Signature::zeroed();
//! manifest.signature(&mut sig)?;
//! // Hand `sig` and the image bytes to the verification stage.
//! ```

#![cfg_attr(not(test), no_std)]

pub mod extension;
pub mod layout;
pub mod manifest;
pub mod reader;
pub mod region;

pub use extension::{Extension, ExtensionId};
pub use manifest::{LockdownInfo, Manifest, PublicKey, Signature, Slot};
pub use reader::BoundedReader;
pub use region::{MmioRegion, RegionRead};

use core::fmt;

/// Errors that can occur while extracting manifest fields.
///
/// Failures are never resolved locally into defaults and never retried;
/// the boot-chain caller decides whether to fall back to the other slot or
/// halt. The `Display` impl keeps the kinds distinguishable in boot logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestError {
    /// A field's byte range falls outside the manifest region, or the
    /// offset arithmetic would overflow.
    OutOfBounds,
    /// The requested image extension is not present in this image.
    ///
    /// Extensions are optional per identifier; this is not a malformed
    /// image condition.
    ExtensionNotFound,
    /// Extension contents disagree with the checksum declared in the
    /// manifest descriptor.
    ChecksumMismatch,
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "field range exceeds the manifest region"),
            Self::ExtensionNotFound => write!(f, "image extension not present"),
            Self::ChecksumMismatch => {
                write!(f, "extension contents do not match the declared checksum")
            }
        }
    }
}
