//! Instantiation of resolved types.

mod default;

pub use default::DefaultObjectFactory;

use core::fmt;

use generis_types::TypeBuilder;

use crate::errors::InstantiationError;

/// A constructor argument or a field of a created instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Object(Instance),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Object(instance) => write!(f, "{instance}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Object(instance)
    }
}

/// An object built by a factory: its class and the constructor arguments it
/// was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub class: String,
    pub args: Vec<Value>,
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.class)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// Creates instances of types.
pub trait ObjectFactory<B: TypeBuilder> {
    /// Create an instance with the no-argument constructor.
    fn create(&self, ty: &B::TypeView) -> Result<Instance, InstantiationError> {
        self.create_with(ty, None, None)
    }

    /// Create an instance with the constructor taking `arg_types`.
    ///
    /// When either list is absent the no-argument constructor is used.
    fn create_with(
        &self,
        ty: &B::TypeView,
        arg_types: Option<&[&str]>,
        arg_values: Option<&[Value]>,
    ) -> Result<Instance, InstantiationError>;

    /// Whether instances of `type_name` are collections.
    fn is_collection(&self, type_name: &str) -> bool;
}
