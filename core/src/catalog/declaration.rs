use generis_types::{TypeBuilder, TypeKind, TypeView};

use crate::errors::Span;

/// Whether a declaration is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A type parameter introduced by a generic declaration.
///
/// Bounds live here rather than in the variables that refer to the
/// parameter, so recursive bounds such as `T extends Comparable<T>` stay
/// finite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam<B: TypeBuilder> {
    pub name: B::InternedStr,
    pub bounds: Vec<B::TypeView>,
}

/// A field and the declared type it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl<B: TypeBuilder> {
    pub name: B::InternedStr,
    /// Identity of the type declaring the field.
    pub declaring: B::InternedStr,
    pub ty: B::TypeView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl<B: TypeBuilder> {
    pub name: B::InternedStr,
    pub ty: B::TypeView,
}

/// A method signature. Methods do not introduce type parameters of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl<B: TypeBuilder> {
    pub name: B::InternedStr,
    /// Identity of the type declaring the method.
    pub declaring: B::InternedStr,
    pub params: Vec<ParamDecl<B>>,
    pub ret: B::TypeView,
}

/// A constructor, identified by the nominal identities of its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstructorDecl {
    pub params: Vec<String>,
    pub visibility: Visibility,
}

impl ConstructorDecl {
    pub fn new<S: Into<String>>(params: impl IntoIterator<Item = S>) -> Self {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            visibility: Visibility::Public,
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn takes(&self, types: &[&str]) -> bool {
        self.params.len() == types.len()
            && self.params.iter().zip(types).all(|(p, t)| p == t)
    }

    /// Parameter identities joined the way they are written in a catalog.
    pub fn signature(&self) -> String {
        self.params.join(",")
    }
}

/// A declared class or interface.
///
/// # Example
///
/// ```
/// use generis_core::TypeDeclaration;
/// use generis_types::{BoxBuilder, TypeBuilder};
///
/// let b = BoxBuilder::new();
/// let holder = TypeDeclaration::class(b, "Holder")
///     .with_param(b, "T", [])
///     .with_field(b, "value", b.variable("T", "Holder"));
///
/// assert_eq!(holder.param_position("T"), Some(0));
/// assert!(holder.field("value").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration<B: TypeBuilder> {
    pub name: B::InternedStr,
    pub kind: DeclKind,
    pub is_abstract: bool,
    /// Type parameters in declaration order.
    pub params: Vec<TypeParam<B>>,
    pub superclass: Option<B::TypeView>,
    pub interfaces: Vec<B::TypeView>,
    pub fields: Vec<FieldDecl<B>>,
    pub methods: Vec<MethodDecl<B>>,
    /// Declared constructors. A class without any gets an implicit public
    /// no-arg constructor.
    pub constructors: Vec<ConstructorDecl>,
    /// Where the declaration was written, when it came from catalog source.
    pub span: Option<Span>,
}

impl<B: TypeBuilder> TypeDeclaration<B> {
    fn new(builder: B, name: &str, kind: DeclKind) -> Self {
        Self {
            name: builder.intern_str(name),
            kind,
            is_abstract: false,
            params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            span: None,
        }
    }

    pub fn class(builder: B, name: &str) -> Self {
        Self::new(builder, name, DeclKind::Class)
    }

    pub fn interface(builder: B, name: &str) -> Self {
        Self::new(builder, name, DeclKind::Interface)
    }

    pub fn into_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_param(
        mut self,
        builder: B,
        name: &str,
        bounds: impl IntoIterator<Item = B::TypeView>,
    ) -> Self {
        self.params.push(TypeParam {
            name: builder.intern_str(name),
            bounds: bounds.into_iter().collect(),
        });
        self
    }

    pub fn extends(mut self, superclass: B::TypeView) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: B::TypeView) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_field(mut self, builder: B, name: &str, ty: B::TypeView) -> Self {
        self.fields.push(FieldDecl {
            name: builder.intern_str(name),
            declaring: self.name.clone(),
            ty,
        });
        self
    }

    pub fn with_method<'a>(
        mut self,
        builder: B,
        name: &str,
        params: impl IntoIterator<Item = (&'a str, B::TypeView)>,
        ret: B::TypeView,
    ) -> Self {
        let params = params
            .into_iter()
            .map(|(name, ty)| ParamDecl {
                name: builder.intern_str(name),
                ty,
            })
            .collect();
        self.methods.push(MethodDecl {
            name: builder.intern_str(name),
            declaring: self.name.clone(),
            params,
            ret,
        });
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DeclKind::Interface
    }

    /// Whether the factory may build instances of this declaration.
    pub fn is_instantiable(&self) -> bool {
        self.kind == DeclKind::Class && !self.is_abstract
    }

    /// Ordinal position of the type parameter called `name`.
    pub fn param_position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name.as_ref() == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl<B>> {
        self.fields.iter().find(|f| f.name.as_ref() == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl<B>> {
        self.methods.iter().find(|m| m.name.as_ref() == name)
    }

    /// Direct supertypes: the superclass first, then interfaces in
    /// declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &B::TypeView> {
        self.superclass.iter().chain(self.interfaces.iter())
    }

    /// Identities of the direct supertypes, in [`supertypes`](Self::supertypes) order.
    pub fn supertype_names(&self, builder: B) -> impl Iterator<Item = &str> {
        self.supertypes().filter_map(move |ty| match ty.view(builder) {
            TypeKind::Concrete(name) | TypeKind::Parameterized { raw: name, .. } => {
                Some(name.as_ref())
            }
            _ => None,
        })
    }

    /// Constructors a caller can choose from, including the implicit one.
    pub fn effective_constructors(&self) -> Vec<ConstructorDecl> {
        if self.constructors.is_empty() && self.kind == DeclKind::Class {
            vec![ConstructorDecl::default()]
        } else {
            self.constructors.clone()
        }
    }
}
