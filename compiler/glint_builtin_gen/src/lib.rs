//! Build-time generator for the Glint frontend's builtin lookup tables.
//!
//! Turns the declarative builtin database into a generated Rust source
//! file containing:
//!
//! - a `TypeTag` enumeration, one variant per distinct type definition;
//! - `SIGNATURE_TABLE`, the deduplicated flat list of signature slots;
//! - `BUILTIN_TABLE`, one row per overload, pointing into the signature
//!   table by start offset;
//! - `lookup_builtin`, a deterministic name-to-range dispatcher, plus the
//!   `builtin_overloads` slice accessor built on top of it;
//! - `descriptor_type`, mapping a table row back to a frontend type.
//!
//! The frontend includes the generated file at its own compile time. On a
//! `lookup_builtin` hit it walks `BUILTIN_TABLE[start-1..start-1+count]`,
//! then for each row `SIGNATURE_TABLE[sig_index..sig_index+num_args]`
//! (return slot first, arguments in call order), applying
//! `descriptor_type` to each slot before matching arguments.
//!
//! All phases run once, in order, single-threaded. Output is byte-for-byte
//! deterministic for identical input: the generated text is checked into
//! downstream builds, which may cache or diff it.

pub mod collect;
mod emit;
mod error;
pub mod matcher;
mod reconstruct;
mod verify;
mod writer;

pub use error::GenError;
pub use writer::SourceWriter;

use glint_builtin_db::BuiltinDb;

use crate::collect::OverloadIndex;
use crate::matcher::{DispatchTree, Window};

/// Generate the full builtin-tables source file for `db`.
///
/// Fails without producing any text when the database is malformed; see
/// [`GenError`] for the conditions.
pub fn generate(db: &BuiltinDb) -> Result<String, GenError> {
    verify::verify(db)?;

    let overloads = collect::collect(db);
    if overloads.signatures.total_len() > u32::from(u16::MAX) {
        return Err(GenError::TableOverflow {
            what: "signature table length",
        });
    }

    let windows = dispatch_windows(&overloads.index)?;
    let tree = DispatchTree::build(&windows)?;
    tracing::debug!(names = windows.len(), "built dispatch tree");

    let mut w = SourceWriter::new();
    emit::header(&mut w);
    emit::declarations(&mut w, db);
    emit::signature_table(&mut w, db, &overloads.signatures);
    emit::builtin_table(&mut w, db, &overloads.index);
    tree.emit_lookup_fn(&mut w);
    emit::overloads_helper(&mut w);
    reconstruct::descriptor_type_fn(&mut w, db);
    Ok(w.finish())
}

/// Assign each name its 1-based `(start, count)` run over the builtin
/// table, walking the index in its iteration order; 0 stays reserved for
/// the not-found sentinel. The runs tile the table with no gaps and no
/// overlaps.
pub fn dispatch_windows(index: &OverloadIndex) -> Result<Vec<(String, Window)>, GenError> {
    let mut windows = Vec::with_capacity(index.len());
    let mut next: u32 = 1;
    for (name, overloads) in index.iter() {
        let count = u16::try_from(overloads.len()).map_err(|_| GenError::TableOverflow {
            what: "overload count",
        })?;
        let start = u16::try_from(next).map_err(|_| GenError::TableOverflow {
            what: "builtin table index",
        })?;
        windows.push((name.to_owned(), (start, count)));
        next += u32::from(count);
    }
    Ok(windows)
}
