//! Record types stored in the database.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::TypeDefId;

/// Address space carried by a pointer descriptor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum AddrSpace {
    #[default]
    Default,
    Private,
    Global,
    Local,
    Constant,
    Generic,
}

impl AddrSpace {
    /// Variant identifier as spelled in emitted code.
    pub const fn name(self) -> &'static str {
        match self {
            AddrSpace::Default => "Default",
            AddrSpace::Private => "Private",
            AddrSpace::Global => "Global",
            AddrSpace::Local => "Local",
            AddrSpace::Constant => "Constant",
            AddrSpace::Generic => "Generic",
        }
    }
}

/// A named builtin type.
///
/// `semantic` names the `TypeCx` accessor that produces the frontend type
/// for this definition. `None` marks an abstract definition (a placeholder
/// such as a generic element type) with no concrete frontend type; abstract
/// definitions must never appear in a live signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    pub name: String,
    pub semantic: Option<String>,
}

impl TypeDef {
    /// A definition backed by a concrete frontend type.
    pub fn concrete(name: impl Into<String>, semantic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semantic: Some(semantic.into()),
        }
    }

    /// An abstract definition with no concrete frontend type.
    pub fn abstract_def(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semantic: None,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.semantic.is_none()
    }
}

/// One slot of a signature: a compact encoding of a semantic type.
///
/// Compared by structural equality; two descriptors are equal iff all four
/// fields match.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDesc {
    pub ty: TypeDefId,
    /// Vector width; 0 means scalar.
    #[serde(default)]
    pub vec_width: u8,
    #[serde(default)]
    pub addr_space: AddrSpace,
    #[serde(default)]
    pub is_pointer: bool,
}

impl TypeDesc {
    /// Scalar, default-address-space, non-pointer descriptor.
    pub const fn scalar(ty: TypeDefId) -> Self {
        Self {
            ty,
            vec_width: 0,
            addr_space: AddrSpace::Default,
            is_pointer: false,
        }
    }

    /// Vector descriptor of the given width.
    pub const fn vector(ty: TypeDefId, width: u8) -> Self {
        Self {
            ty,
            vec_width: width,
            addr_space: AddrSpace::Default,
            is_pointer: false,
        }
    }

    /// Pointer descriptor into the given address space.
    pub const fn pointer(ty: TypeDefId, addr_space: AddrSpace) -> Self {
        Self {
            ty,
            vec_width: 0,
            addr_space,
            is_pointer: true,
        }
    }
}

/// Return type followed by arguments in call order.
///
/// Never empty in a valid declaration: element 0 is always the return
/// type. Most builtin signatures fit inline (return plus a handful of
/// arguments).
pub type Signature = SmallVec<[TypeDesc; 6]>;

/// One overload of a named builtin function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Builtin {
    pub name: String,
    pub signature: Signature,
    /// Extension providing this overload; empty means core.
    #[serde(default)]
    pub extension: String,
    /// Language version that introduced this overload (e.g. 100 for 1.0).
    pub version: u16,
}
