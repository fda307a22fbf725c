//! Up-front validation of the record store.
//!
//! Any malformed record invalidates the cumulative-offset arithmetic for
//! everything emitted after it, so there is no skip-and-continue path: the
//! first violation aborts generation before any text is produced.

use glint_builtin_db::BuiltinDb;
use rustc_hash::FxHashMap;

use crate::writer::type_tag_ident;
use crate::GenError;

pub(crate) fn verify(db: &BuiltinDb) -> Result<(), GenError> {
    for (index, def) in db.types().iter().enumerate() {
        if def.name.is_empty() {
            return Err(GenError::EmptyTypeName { index });
        }
        if !is_ident(&def.name) {
            return Err(GenError::BadTypeName {
                name: def.name.clone(),
            });
        }
        if let Some(semantic) = &def.semantic {
            if !is_ident(semantic) {
                return Err(GenError::BadSemanticName {
                    name: def.name.clone(),
                    semantic: semantic.clone(),
                });
            }
        }
    }

    // Distinct names that render to the same tag variant (`int2` vs
    // `int_2`) would emit a duplicate enum member; exact repeats of one
    // name are fine, the tag enumeration dedups those.
    let mut tags: FxHashMap<String, &str> = FxHashMap::default();
    for def in db.types() {
        let tag = type_tag_ident(&def.name);
        match tags.get(&tag) {
            Some(&first) if first != def.name => {
                return Err(GenError::TagCollision {
                    first: first.to_owned(),
                    second: def.name.clone(),
                    tag,
                });
            }
            Some(_) => {}
            None => {
                tags.insert(tag, def.name.as_str());
            }
        }
    }

    if db.builtins().is_empty() {
        return Err(GenError::NoBuiltins);
    }

    for (index, builtin) in db.builtins().iter().enumerate() {
        if builtin.name.is_empty() {
            return Err(GenError::EmptyBuiltinName { index });
        }
        if builtin.signature.is_empty() {
            return Err(GenError::EmptySignature {
                name: builtin.name.clone(),
            });
        }
        if builtin.signature.len() > usize::from(u8::MAX) {
            return Err(GenError::TableOverflow {
                what: "signature length",
            });
        }
        for desc in &builtin.signature {
            let Some(def) = db.type_def(desc.ty) else {
                return Err(GenError::InvalidTypeRef {
                    name: builtin.name.clone(),
                    raw: desc.ty.as_u32(),
                });
            };
            if def.is_abstract() {
                return Err(GenError::AbstractTypeInSignature {
                    name: builtin.name.clone(),
                    type_name: def.name.clone(),
                });
            }
        }
    }

    Ok(())
}

/// True when `name` can be spelled verbatim as an emitted identifier stem.
fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
