//! Declarative builtin-function database for the Glint frontend.
//!
//! This crate is the record store the table generator scans: type
//! definitions and builtin declarations, pre-parsed and already validated
//! by whatever produced them. Declaration order is meaningful (every
//! emitted table order is derived from it), so the store preserves
//! insertion order everywhere and never reorders records.
//!
//! No surface syntax is parsed here. Databases are built in memory through
//! [`BuiltinDb`] or loaded from their serialized (JSON) form.

mod db;
mod id;
mod records;

pub use db::BuiltinDb;
pub use id::TypeDefId;
pub use records::{AddrSpace, Builtin, Signature, TypeDef, TypeDesc};
