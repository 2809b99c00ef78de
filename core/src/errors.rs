use core::ops::Range;

use thiserror::Error;

use crate::factory::Value;

/// Byte range into a catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self(start..end)
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(span: pest::Span<'_>) -> Self {
        Self(span.start()..span.end())
    }
}

/// Umbrella error for every fallible operation of the engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
}

/// Failures of type resolution.
///
/// None of these are transient: they all point at a malformed input model
/// or a misuse of the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A variable was resolved against something other than a raw or
    /// parameterized type.
    #[error("viewing context must be a raw or parameterized type, but was `{found}`")]
    InvalidArgument { found: String },

    #[error("type `{name}` is not declared")]
    UnknownType { name: String },

    #[error("type variable `{name}` is not a parameter of `{declaring}`")]
    UnknownVariable { name: String, declaring: String },

    #[error("`{raw}` declares {expected} type parameter(s) but `{context}` supplies {found}")]
    ArityMismatch {
        raw: String,
        expected: usize,
        found: usize,
        context: String,
    },

    /// No inheritance edge leads from the viewing type to the variable.
    ///
    /// Only reported under [`Fallback::Error`](crate::Fallback::Error).
    #[error("type variable `{name}` of `{declaring}` cannot be resolved through `{viewing}`")]
    Unresolved {
        name: String,
        declaring: String,
        viewing: String,
    },
}

/// Failures of loading or validating a declaration catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("parse error: {message}")]
    Parse { message: String, span: Span },

    #[error("type `{name}` is declared more than once")]
    Duplicate { name: String },

    #[error("`{referenced_by}` refers to undeclared type `{name}`")]
    UnknownType { name: String, referenced_by: String },

    #[error(
        "`{name}` declares {expected} type parameter(s) but `{referenced_by}` uses it with {found}"
    )]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        referenced_by: String,
    },

    #[error("`{referenced_by}` uses type variable `{name}` which `{owner}` does not declare")]
    UnboundVariable {
        name: String,
        owner: String,
        referenced_by: String,
    },

    #[error("`{name}` cannot inherit from `{supertype}`: supertypes must be raw or parameterized")]
    InvalidSupertype { name: String, supertype: String },

    #[error("inheritance cycle through `{name}`")]
    Cycle { name: String },
}

impl CatalogError {
    /// Source location of the error, when it has one.
    pub fn span(&self) -> Option<&Span> {
        match self {
            CatalogError::Parse { span, .. } => Some(span),
            _ => None,
        }
    }
}

/// Failure of the object factory to build an instance of a resolved type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "Error instantiating {type_name} with invalid types ({}) or values ({}). Cause: {cause}",
    .arg_types.join(","),
    join_values(.arg_values)
)]
pub struct InstantiationError {
    pub type_name: String,
    pub arg_types: Vec<String>,
    pub arg_values: Vec<Value>,
    #[source]
    pub cause: InstantiationCause,
}

/// Why an instantiation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantiationCause {
    #[error("type is not declared")]
    UnknownType,

    #[error("`{0}` is not a raw or parameterized type")]
    NotConcrete(String),

    #[error("cannot instantiate an interface or abstract class")]
    Abstract,

    #[error("no constructor takes ({0})")]
    NoSuchConstructor(String),

    #[error("constructor ({0}) is not accessible")]
    Inaccessible(String),

    #[error("constructor takes {expected} argument(s) but {found} were given")]
    ArgumentCount { expected: usize, found: usize },
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
