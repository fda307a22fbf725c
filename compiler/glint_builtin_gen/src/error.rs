//! Generation-time errors.
//!
//! Every failure is fatal and detected before any output text exists; the
//! generator never emits partial tables.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// A type definition with an empty name field.
    #[error("type definition #{index} has an empty name")]
    EmptyTypeName { index: usize },

    /// A type definition whose name cannot become an emitted identifier.
    #[error("type definition `{name}` is not a valid identifier")]
    BadTypeName { name: String },

    /// A concrete type definition whose accessor name cannot be emitted
    /// as a method call.
    #[error("type definition `{name}` has a non-identifier accessor `{semantic}`")]
    BadSemanticName { name: String, semantic: String },

    /// Two distinct type definition names rendering to the same emitted
    /// tag variant, which would produce a duplicate enum member.
    #[error("type definitions `{first}` and `{second}` both render as tag `{tag}`")]
    TagCollision {
        first: String,
        second: String,
        tag: String,
    },

    /// A builtin declaration with an empty name field.
    #[error("builtin declaration #{index} has an empty name")]
    EmptyBuiltinName { index: usize },

    /// A builtin declaration with no return slot.
    #[error("builtin `{name}` has an empty signature")]
    EmptySignature { name: String },

    /// A descriptor referencing a type id outside the database.
    #[error("builtin `{name}` references unknown type id {raw}")]
    InvalidTypeRef { name: String, raw: u32 },

    /// A live signature slot naming an abstract type definition, which the
    /// reconstructor could never map to a concrete frontend type.
    #[error("builtin `{name}` uses abstract type `{type_name}` in its signature")]
    AbstractTypeInSignature { name: String, type_name: String },

    /// An empty builtin set leaves nothing to dispatch.
    #[error("builtin database declares no builtins")]
    NoBuiltins,

    /// The same name handed to the dispatcher builder more than once.
    #[error("duplicate name `{name}` in the dispatch set")]
    DuplicateName { name: String },

    /// A table index outgrew its emitted integer width.
    #[error("{what} exceeds the emitted table index range")]
    TableOverflow { what: &'static str },
}
