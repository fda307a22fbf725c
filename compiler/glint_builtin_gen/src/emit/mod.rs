//! Rendering of the generated declarations and flat tables.
//!
//! Everything here is a straight flattening of the collected structures:
//! iterating the emitted text in declaration order reconstructs exactly
//! the interned signature list and the name buckets. Each interned
//! signature is preceded by its start offset as a comment, and each name's
//! run of builtin rows by the name, so the generated file stays diffable.

use glint_builtin_db::{BuiltinDb, TypeDesc};

use crate::collect::{distinct_type_defs, OverloadIndex, SignatureTable};
use crate::writer::{str_lit, type_tag_ident, SourceWriter};

/// Fixed header for the generated file.
pub(crate) fn header(w: &mut SourceWriter) {
    w.line("// Builtin-function descriptor tables for the Glint frontend.");
    w.line("// Generated by glint-bgen. Do not edit.");
    w.line("//");
    w.line("// The including scope must have `TypeCx`, `TypeId` and `AddrSpace`");
    w.line("// in scope; see `descriptor_type` at the bottom of this file.");
    w.blank();
}

/// Emit the `TypeTag` enumeration and the table row struct definitions.
///
/// `TypeTag` gets one variant per distinct type definition name: not one
/// per use, and not one per database record when names repeat.
pub(crate) fn declarations(w: &mut SourceWriter, db: &BuiltinDb) {
    w.line("/// Compact tag identifying a named builtin type.");
    w.line("#[derive(Clone, Copy, PartialEq, Eq, Debug)]");
    w.line("pub enum TypeTag {");
    w.indent();
    for def in distinct_type_defs(db) {
        w.line(&format!("{},", type_tag_ident(&def.name)));
    }
    w.dedent();
    w.line("}");
    w.blank();

    w.line("/// One slot of a builtin signature.");
    w.line("#[derive(Clone, Copy, Debug)]");
    w.line("pub struct TypeDesc {");
    w.indent();
    w.line("pub tag: TypeTag,");
    w.line("/// Vector width; 0 means scalar.");
    w.line("pub vec_width: u8,");
    w.line("pub addr_space: AddrSpace,");
    w.line("pub is_pointer: bool,");
    w.dedent();
    w.line("}");
    w.blank();

    w.line("/// One overload of a builtin function.");
    w.line("#[derive(Clone, Copy, Debug)]");
    w.line("pub struct BuiltinDecl {");
    w.indent();
    w.line("/// Signature length, including the return slot.");
    w.line("pub num_args: u8,");
    w.line("/// Start offset of the signature in `SIGNATURE_TABLE`.");
    w.line("pub sig_index: u16,");
    w.line("/// Extension providing the overload; empty means core.");
    w.line("pub extension: &'static str,");
    w.line("/// Language version that introduced the overload.");
    w.line("pub version: u16,");
    w.dedent();
    w.line("}");
    w.blank();
}

/// Emit the flat signature table: one descriptor row per slot, interned
/// signatures in first-interned order, return slot first within each.
pub(crate) fn signature_table(w: &mut SourceWriter, db: &BuiltinDb, table: &SignatureTable) {
    w.line(&format!(
        "pub static SIGNATURE_TABLE: [TypeDesc; {}] = [",
        table.total_len()
    ));
    w.indent();
    for entry in table.entries() {
        w.line(&format!("// {}", entry.offset));
        for desc in &entry.signature {
            w.line(&descriptor_row(db, desc));
        }
    }
    w.dedent();
    w.line("];");
    w.blank();
}

fn descriptor_row(db: &BuiltinDb, desc: &TypeDesc) -> String {
    // Validity of the type reference was established before emission.
    let def = &db.types()[desc.ty.as_usize()];
    format!(
        "TypeDesc {{ tag: TypeTag::{}, vec_width: {}, addr_space: AddrSpace::{}, is_pointer: {} }},",
        type_tag_ident(&def.name),
        desc.vec_width,
        desc.addr_space.name(),
        desc.is_pointer
    )
}

/// Emit the builtin table: one row per overload, names in first-seen
/// order, each name's overloads in declaration order.
pub(crate) fn builtin_table(w: &mut SourceWriter, db: &BuiltinDb, index: &OverloadIndex) {
    let rows: usize = index.iter().map(|(_, overloads)| overloads.len()).sum();
    w.line(&format!("pub static BUILTIN_TABLE: [BuiltinDecl; {rows}] = ["));
    w.indent();
    for (name, overloads) in index.iter() {
        w.line(&format!("// {name}"));
        for overload in overloads {
            let decl = &db.builtins()[overload.builtin];
            w.line(&format!(
                "BuiltinDecl {{ num_args: {}, sig_index: {}, extension: {}, version: {} }},",
                decl.signature.len(),
                overload.sig_offset,
                str_lit(&decl.extension),
                decl.version
            ));
        }
    }
    w.dedent();
    w.line("];");
    w.blank();
}

/// Emit the convenience accessor resolving a name straight to its table
/// slice, folding away the 1-based window arithmetic.
pub(crate) fn overloads_helper(w: &mut SourceWriter) {
    w.line("/// Overloads of `name` as a slice of `BUILTIN_TABLE`; empty when");
    w.line("/// `name` is not a builtin.");
    w.line("pub fn builtin_overloads(name: &str) -> &'static [BuiltinDecl] {");
    w.indent();
    w.line("let (start, count) = lookup_builtin(name);");
    w.line("if count == 0 {");
    w.indent();
    w.line("return &[];");
    w.dedent();
    w.line("}");
    w.line("let start = (start - 1) as usize;");
    w.line("&BUILTIN_TABLE[start..start + count as usize]");
    w.dedent();
    w.line("}");
    w.blank();
}
