//! Index handle for type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-bit index into the database's type definition list.
///
/// Descriptors reference type definitions by index rather than by name so
/// that descriptor equality is a plain field comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TypeDefId(u32);

impl TypeDefId {
    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the target database.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The index as a `usize`, for direct list indexing.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDefId({})", self.0)
    }
}
