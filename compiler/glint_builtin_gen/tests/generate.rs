#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

//! End-to-end generation over a small trigonometry database: the shared
//! `cos`/`sin` signature must be interned once, the builtin table must
//! tile in declaration order, and the dispatcher must hand out the
//! matching 1-based windows.

use glint_builtin_db::{AddrSpace, Builtin, BuiltinDb, Signature, TypeDef, TypeDesc};
use glint_builtin_gen::matcher::DispatchTree;
use glint_builtin_gen::{collect, dispatch_windows, generate, GenError};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

fn declare(db: &mut BuiltinDb, name: &str, signature: Signature) {
    db.add_builtin(Builtin {
        name: name.into(),
        signature,
        extension: String::new(),
        version: 100,
    });
}

/// cos(float)->float, cos(double)->double, sin(float)->float, where sin's
/// signature is identical to cos's first overload.
fn trig_db() -> BuiltinDb {
    let mut db = BuiltinDb::new();
    let float = db.add_type(TypeDef::concrete("float", "float_ty"));
    let double = db.add_type(TypeDef::concrete("double", "double_ty"));
    declare(
        &mut db,
        "cos",
        smallvec![TypeDesc::scalar(float), TypeDesc::scalar(float)],
    );
    declare(
        &mut db,
        "cos",
        smallvec![TypeDesc::scalar(double), TypeDesc::scalar(double)],
    );
    declare(
        &mut db,
        "sin",
        smallvec![TypeDesc::scalar(float), TypeDesc::scalar(float)],
    );
    db
}

#[test]
fn trig_tables_intern_the_shared_signature() {
    let text = generate(&trig_db()).unwrap();

    // Two distinct signatures of two slots each, three builtin rows.
    assert!(text.contains("pub static SIGNATURE_TABLE: [TypeDesc; 4] = ["));
    assert!(text.contains("pub static BUILTIN_TABLE: [BuiltinDecl; 3] = ["));

    // cos's first overload and sin both point at offset 0.
    assert_eq!(text.matches("sig_index: 0,").count(), 2);
    assert_eq!(text.matches("sig_index: 2,").count(), 1);

    let cos = text.find("// cos").unwrap();
    let sin = text.find("// sin").unwrap();
    assert!(cos < sin);
}

#[test]
fn trig_dispatch_windows_tile_the_builtin_table() {
    let db = trig_db();
    let overloads = collect::collect(&db);
    let windows = dispatch_windows(&overloads.index).unwrap();
    assert_eq!(
        windows,
        vec![("cos".to_owned(), (1, 2)), ("sin".to_owned(), (3, 1))]
    );

    let tree = DispatchTree::build(&windows).unwrap();
    assert_eq!(tree.lookup("cos"), (1, 2));
    assert_eq!(tree.lookup("sin"), (3, 1));
    assert_eq!(tree.lookup("tan"), (0, 0));
    assert_eq!(tree.lookup(""), (0, 0));
}

#[test]
fn generated_text_contains_the_full_surface() {
    let text = generate(&trig_db()).unwrap();
    assert!(text.starts_with("// Builtin-function descriptor tables"));
    assert!(text.contains("pub enum TypeTag {"));
    assert!(text.contains("pub fn lookup_builtin(name: &str) -> (u16, u16) {"));
    assert!(text.contains("pub fn builtin_overloads(name: &str) -> &'static [BuiltinDecl] {"));
    assert!(text.contains("pub fn descriptor_type(cx: &mut TypeCx, desc: &TypeDesc) -> TypeId {"));
    assert!(text.ends_with('\n'));
}

#[test]
fn generation_is_byte_identical_across_runs() {
    let first = generate(&trig_db()).unwrap();
    let second = generate(&trig_db()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pointer_descriptors_emit_their_address_space() {
    let mut db = BuiltinDb::new();
    let float = db.add_type(TypeDef::concrete("float", "float_ty"));
    declare(
        &mut db,
        "vload4",
        smallvec![
            TypeDesc::vector(float, 4),
            TypeDesc::pointer(float, AddrSpace::Global),
        ],
    );

    let text = generate(&db).unwrap();
    assert!(text.contains(
        "TypeDesc { tag: TypeTag::Float, vec_width: 4, addr_space: AddrSpace::Default, is_pointer: false },"
    ));
    assert!(text.contains(
        "TypeDesc { tag: TypeTag::Float, vec_width: 0, addr_space: AddrSpace::Global, is_pointer: true },"
    ));
}

#[test]
fn abstract_type_in_a_signature_aborts_generation() {
    let mut db = BuiltinDb::new();
    let gentype = db.add_type(TypeDef::abstract_def("gentype"));
    declare(&mut db, "frob", smallvec![TypeDesc::scalar(gentype)]);

    assert_eq!(
        generate(&db),
        Err(GenError::AbstractTypeInSignature {
            name: "frob".into(),
            type_name: "gentype".into(),
        })
    );
}

#[test]
fn colliding_tag_spellings_abort_generation() {
    // "int2" and "int_2" both render as the TypeTag variant `Int2`; the
    // file that would result declares the variant twice.
    let mut db = BuiltinDb::new();
    let int2 = db.add_type(TypeDef::concrete("int2", "int2_ty"));
    db.add_type(TypeDef::concrete("int_2", "int2_ty"));
    declare(&mut db, "abs", smallvec![TypeDesc::scalar(int2), TypeDesc::scalar(int2)]);

    assert_eq!(
        generate(&db),
        Err(GenError::TagCollision {
            first: "int2".into(),
            second: "int_2".into(),
            tag: "Int2".into(),
        })
    );
}

#[test]
fn empty_database_aborts_generation() {
    let db = BuiltinDb::new();
    assert_eq!(generate(&db), Err(GenError::NoBuiltins));
}

#[test]
fn unused_abstract_definitions_are_allowed() {
    // Abstract definitions may exist in the database as long as no live
    // signature references them; they still get a TypeTag variant.
    let mut db = trig_db();
    db.add_type(TypeDef::abstract_def("gentype"));

    let text = generate(&db).unwrap();
    assert!(text.contains("    Gentype,"));
    assert!(text.contains("TypeTag::Gentype => {"));
    assert!(text.contains("unreachable!"));
}
