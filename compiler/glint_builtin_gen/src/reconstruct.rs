//! Rendering of the descriptor-to-type reconstruction function.
//!
//! The emitted `descriptor_type` maps a table row back to the frontend's
//! semantic type: base type from the tag, then vector wrapping, then
//! address-space qualification before pointer wrapping. The order mirrors
//! how a C-like type grammar composes (`addrspace vector*`): qualifying
//! after taking the pointer, or vectorizing a pointer, would denote a
//! different type.

use glint_builtin_db::BuiltinDb;

use crate::collect::distinct_type_defs;
use crate::writer::{type_tag_ident, SourceWriter};

pub(crate) fn descriptor_type_fn(w: &mut SourceWriter, db: &BuiltinDb) {
    let defs = distinct_type_defs(db);

    w.line("/// Reconstruct the frontend type for one signature slot.");
    w.line("pub fn descriptor_type(cx: &mut TypeCx, desc: &TypeDesc) -> TypeId {");
    w.indent();
    w.line("let mut ty = match desc.tag {");
    w.indent();
    for def in defs.iter().filter(|def| !def.is_abstract()) {
        if let Some(semantic) = &def.semantic {
            w.line(&format!(
                "TypeTag::{} => cx.{}(),",
                type_tag_ident(&def.name),
                semantic
            ));
        }
    }
    let abstracts: Vec<String> = defs
        .iter()
        .filter(|def| def.is_abstract())
        .map(|def| format!("TypeTag::{}", type_tag_ident(&def.name)))
        .collect();
    if !abstracts.is_empty() {
        // Generation already rejected any signature referencing these
        // tags, so the arm can never be taken by a table row.
        w.line(&format!("{} => {{", abstracts.join(" | ")));
        w.indent();
        w.line("unreachable!(\"abstract builtin type in signature table\")");
        w.dedent();
        w.line("}");
    }
    w.dedent();
    w.line("};");
    w.line("if desc.vec_width > 0 {");
    w.indent();
    w.line("ty = cx.vector_of(ty, desc.vec_width);");
    w.dedent();
    w.line("}");
    w.line("if desc.is_pointer {");
    w.indent();
    w.line("ty = cx.addr_qualified(ty, desc.addr_space);");
    w.line("ty = cx.pointer_to(ty);");
    w.dedent();
    w.line("}");
    w.line("ty");
    w.dedent();
    w.line("}");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests can panic")]

    use glint_builtin_db::{BuiltinDb, TypeDef};
    use pretty_assertions::assert_eq;

    use super::descriptor_type_fn;
    use crate::writer::SourceWriter;

    fn render(db: &BuiltinDb) -> String {
        let mut w = SourceWriter::new();
        descriptor_type_fn(&mut w, db);
        w.finish()
    }

    #[test]
    fn concrete_definitions_become_match_arms() {
        let mut db = BuiltinDb::new();
        db.add_type(TypeDef::concrete("float", "float_ty"));
        db.add_type(TypeDef::concrete("double", "double_ty"));

        let text = render(&db);
        assert!(text.contains("TypeTag::Float => cx.float_ty(),"));
        assert!(text.contains("TypeTag::Double => cx.double_ty(),"));
        assert!(!text.contains("unreachable!"));
    }

    #[test]
    fn abstract_definitions_share_one_terminal_arm() {
        let mut db = BuiltinDb::new();
        db.add_type(TypeDef::concrete("float", "float_ty"));
        db.add_type(TypeDef::abstract_def("gentype"));
        db.add_type(TypeDef::abstract_def("sgentype"));

        let text = render(&db);
        assert!(text.contains("TypeTag::Gentype | TypeTag::Sgentype => {"));
        assert_eq!(text.matches("unreachable!").count(), 1);
    }

    #[test]
    fn wrapping_order_is_vector_then_addrspace_then_pointer() {
        let mut db = BuiltinDb::new();
        db.add_type(TypeDef::concrete("float", "float_ty"));

        let text = render(&db);
        let vector = text.find("cx.vector_of(ty, desc.vec_width)").unwrap();
        let qualify = text.find("cx.addr_qualified(ty, desc.addr_space)").unwrap();
        let pointer = text.find("cx.pointer_to(ty)").unwrap();
        assert!(vector < qualify);
        assert!(qualify < pointer);
    }
}
