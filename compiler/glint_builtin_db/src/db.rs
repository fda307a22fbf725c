//! The in-memory record store.

use serde::{Deserialize, Serialize};

use crate::{Builtin, TypeDef, TypeDefId};

/// The full builtin database: type definitions plus builtin declarations,
/// in declaration order.
///
/// The generator scans this store exactly once; it never mutates it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuiltinDb {
    types: Vec<TypeDef>,
    builtins: Vec<Builtin>,
}

impl BuiltinDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type definition, returning its index handle.
    pub fn add_type(&mut self, def: TypeDef) -> TypeDefId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "type definition counts are tiny at generation scale"
        )]
        let id = TypeDefId::from_raw(self.types.len() as u32);
        self.types.push(def);
        id
    }

    /// Append a builtin declaration. Order of calls is the declaration
    /// order every emitted table derives from.
    pub fn add_builtin(&mut self, builtin: Builtin) {
        self.builtins.push(builtin);
    }

    /// Look up a type definition by handle.
    pub fn type_def(&self, id: TypeDefId) -> Option<&TypeDef> {
        self.types.get(id.as_usize())
    }

    /// All type definitions in declaration order.
    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    /// All builtin declarations in declaration order.
    pub fn builtins(&self) -> &[Builtin] {
        &self.builtins
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests can panic")]

    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    use crate::{Builtin, BuiltinDb, TypeDef, TypeDesc};

    fn sample_db() -> BuiltinDb {
        let mut db = BuiltinDb::new();
        let float = db.add_type(TypeDef::concrete("float", "float_ty"));
        db.add_builtin(Builtin {
            name: "cos".into(),
            signature: smallvec![TypeDesc::scalar(float), TypeDesc::scalar(float)],
            extension: String::new(),
            version: 100,
        });
        db
    }

    #[test]
    fn handles_resolve_in_declaration_order() {
        let mut db = BuiltinDb::new();
        let a = db.add_type(TypeDef::concrete("int", "int_ty"));
        let b = db.add_type(TypeDef::abstract_def("gentype"));
        assert_eq!(db.type_def(a).unwrap().name, "int");
        assert_eq!(db.type_def(b).unwrap().name, "gentype");
        assert!(db.type_def(b).unwrap().is_abstract());
    }

    #[test]
    fn serde_round_trip_preserves_records() {
        let db = sample_db();
        let json = serde_json::to_string(&db).unwrap();
        let back: BuiltinDb = serde_json::from_str(&json).unwrap();
        assert_eq!(back.types(), db.types());
        assert_eq!(back.builtins(), db.builtins());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = r#"{"types": [], "builtins": [], "extra": 1}"#;
        assert!(serde_json::from_str::<BuiltinDb>(json).is_err());
    }

    #[test]
    fn descriptor_defaults_fill_scalar_shape() {
        let json = r#"{"ty": 0}"#;
        let desc: TypeDesc = serde_json::from_str(json).unwrap();
        assert_eq!(desc, TypeDesc::scalar(crate::TypeDefId::from_raw(0)));
    }
}
