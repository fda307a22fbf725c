//! Overload collection and signature interning.
//!
//! One scan over the database groups builtin declarations by name (in
//! first-seen order) and interns each distinct signature exactly once,
//! assigning it a cumulative start offset into the flat signature table.
//! Many builtins share a signature (every `genfloat(genfloat)` math
//! function has the same call shape), so interning shrinks the emitted
//! table considerably while the offsets keep every overload addressable.

use glint_builtin_db::{BuiltinDb, Signature, TypeDef};
use rustc_hash::{FxHashMap, FxHashSet};

/// One interned signature with its start offset in the flat table.
#[derive(Debug, Clone)]
pub struct SignatureEntry {
    pub signature: Signature,
    pub offset: u32,
}

/// The ordered list of distinct signatures, in first-interned order.
///
/// Invariant: no two entries are structurally equal, and the offsets tile
/// the flat table exactly: each entry starts where the previous one ends.
#[derive(Debug, Default)]
pub struct SignatureTable {
    entries: Vec<SignatureEntry>,
    index: FxHashMap<Signature, usize>,
    total_len: u32,
}

impl SignatureTable {
    /// Intern `signature`, returning its start offset.
    ///
    /// Structurally equal signatures always resolve to the same offset;
    /// a new signature is appended after everything interned so far.
    fn intern(&mut self, signature: &Signature) -> u32 {
        if let Some(&slot) = self.index.get(signature) {
            return self.entries[slot].offset;
        }
        let offset = self.total_len;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "signature length is capped at u8::MAX before collection"
        )]
        let len = signature.len() as u32;
        self.total_len += len;
        self.index.insert(signature.clone(), self.entries.len());
        self.entries.push(SignatureEntry {
            signature: signature.clone(),
            offset,
        });
        offset
    }

    /// Entries in first-interned order.
    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    /// Total number of descriptor rows across all interned signatures.
    pub fn total_len(&self) -> u32 {
        self.total_len
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One collected overload: the declaration's index in the database plus
/// its resolved signature start offset.
#[derive(Debug, Clone, Copy)]
pub struct OverloadRef {
    pub builtin: usize,
    pub sig_offset: u32,
}

/// Order-preserving map from builtin name to its overloads.
///
/// Bucket order is the first-seen order of names during the single scan;
/// concatenating all buckets in iteration order is exactly the emitted
/// builtin table order. Implemented as a vec of buckets plus a name-to-slot
/// index because emitted-table order is part of the observable contract
/// and must not depend on hash iteration order.
#[derive(Debug, Default)]
pub struct OverloadIndex {
    buckets: Vec<(String, Vec<OverloadRef>)>,
    slots: FxHashMap<String, usize>,
}

impl OverloadIndex {
    fn push(&mut self, name: &str, overload: OverloadRef) {
        let slot = match self.slots.get(name) {
            Some(&slot) => slot,
            None => {
                let slot = self.buckets.len();
                self.slots.insert(name.to_owned(), slot);
                self.buckets.push((name.to_owned(), Vec::new()));
                slot
            }
        };
        self.buckets[slot].1.push(overload);
    }

    /// Buckets in first-seen name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OverloadRef])> {
        self.buckets
            .iter()
            .map(|(name, overloads)| (name.as_str(), overloads.as_slice()))
    }

    /// Overloads of `name`, if it was declared.
    pub fn get(&self, name: &str) -> Option<&[OverloadRef]> {
        self.slots
            .get(name)
            .map(|&slot| self.buckets[slot].1.as_slice())
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Collection output: the interned signature table plus the name buckets.
#[derive(Debug, Default)]
pub struct Overloads {
    pub signatures: SignatureTable,
    pub index: OverloadIndex,
}

/// Scan the database once, interning signatures and bucketing overloads.
///
/// Duplicate (name, signature) declarations are kept as distinct rows:
/// they are the same call shape introduced under different extensions or
/// versions, and the caller disambiguates between them.
pub fn collect(db: &BuiltinDb) -> Overloads {
    let mut out = Overloads::default();
    for (builtin, decl) in db.builtins().iter().enumerate() {
        let sig_offset = out.signatures.intern(&decl.signature);
        out.index.push(&decl.name, OverloadRef { builtin, sig_offset });
    }
    tracing::debug!(
        builtins = db.builtins().len(),
        names = out.index.len(),
        distinct_signatures = out.signatures.len(),
        "collected overloads"
    );
    out
}

/// Distinct type definitions in first-seen name order.
///
/// The database may declare the same type name more than once; the tag
/// enumeration and the reconstructor want one entry per name.
pub fn distinct_type_defs(db: &BuiltinDb) -> Vec<&TypeDef> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for def in db.types() {
        if seen.insert(def.name.as_str()) {
            out.push(def);
        }
    }
    out
}
