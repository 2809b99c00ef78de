use generis_types::{ARRAY_SUFFIX, TypeBuilder};
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::error::{convert_pest_error, syntax_error};
use crate::catalog::{ConstructorDecl, DeclKind, TypeDeclaration, Visibility};
use crate::errors::{CatalogError, Span};

#[derive(Parser)]
#[grammar = "parser/catalog.pest"]
pub struct CatalogParser;

type ParseResult<T> = Result<T, CatalogError>;

/// Parse catalog source into declarations, in source order.
///
/// Declarations are not validated against each other here; see
/// [`Catalog::load`](crate::Catalog::load).
pub fn parse_catalog<B: TypeBuilder>(
    builder: B,
    source: &str,
) -> Result<Vec<TypeDeclaration<B>>, CatalogError> {
    let mut pairs = CatalogParser::parse(Rule::catalog, source).map_err(convert_pest_error)?;
    let Some(catalog) = pairs.next() else {
        return Ok(Vec::new());
    };
    let reader = Reader { builder };
    catalog
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::declaration)
        .map(|pair| reader.declaration(pair))
        .collect()
}

/// Parse a standalone type expression such as `Map<String, List<Integer>>`.
///
/// Outside a declaration no name is a type variable.
pub fn parse_type<B: TypeBuilder>(builder: B, source: &str) -> Result<B::TypeView, CatalogError> {
    let mut pairs =
        CatalogParser::parse(Rule::standalone_type, source).map_err(convert_pest_error)?;
    let ty = pairs
        .next()
        .and_then(|standalone| standalone.into_inner().next())
        .ok_or_else(|| CatalogError::Parse {
            message: "expected a type".to_string(),
            span: Span(0..source.len()),
        })?;
    Reader { builder }.type_expr(ty, None)
}

/// Type parameters in scope while reading a declaration.
struct Scope<'a> {
    owner: &'a str,
    params: &'a [&'a str],
}

impl Scope<'_> {
    fn binds(&self, name: &str) -> bool {
        self.params.contains(&name)
    }
}

struct Reader<B> {
    builder: B,
}

impl<B: TypeBuilder> Reader<B> {
    fn declaration(&self, pair: Pair<'_, Rule>) -> ParseResult<TypeDeclaration<B>> {
        let span = pair.as_span();

        let mut is_abstract = false;
        let mut kind = DeclKind::Class;
        let mut name = None;
        let mut params = None;
        let mut extends = None;
        let mut implements = None;
        let mut members = Vec::new();

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::kw_abstract => is_abstract = true,
                Rule::decl_kind => {
                    if inner.into_inner().any(|k| k.as_rule() == Rule::kw_interface) {
                        kind = DeclKind::Interface;
                    }
                }
                Rule::name => name = Some(inner.as_str()),
                Rule::type_params => params = Some(inner),
                Rule::extends_clause => extends = Some(inner),
                Rule::implements_clause => implements = Some(inner),
                Rule::field | Rule::method | Rule::constructor => members.push(inner),
                _ => {}
            }
        }

        let name = name.ok_or_else(|| syntax_error("expected a declaration name", span))?;
        let param_pairs: Vec<Pair<'_, Rule>> = params
            .map(|p| p.into_inner().filter(|p| p.as_rule() == Rule::type_param).collect())
            .unwrap_or_default();
        let param_names = param_pairs
            .iter()
            .map(|p| first_name(p))
            .collect::<ParseResult<Vec<_>>>()?;
        let scope = Scope {
            owner: name,
            params: &param_names,
        };

        let mut decl = match kind {
            DeclKind::Class => TypeDeclaration::class(self.builder, name),
            DeclKind::Interface => TypeDeclaration::interface(self.builder, name),
        };
        decl.is_abstract = is_abstract;
        decl.span = Some(span.into());

        for (param, param_name) in param_pairs.into_iter().zip(&param_names) {
            let bounds = self.type_exprs(param, Some(&scope))?;
            decl = decl.with_param(self.builder, param_name, bounds);
        }

        if let Some(clause) = extends {
            let clause_span = clause.as_span();
            let mut parents = self.type_exprs(clause, Some(&scope))?;
            match kind {
                DeclKind::Interface => decl.interfaces.append(&mut parents),
                DeclKind::Class if parents.len() > 1 => {
                    return Err(syntax_error(
                        format!("class `{name}` can extend only one type"),
                        clause_span,
                    ));
                }
                DeclKind::Class => decl.superclass = parents.pop(),
            }
        }

        if let Some(clause) = implements {
            if kind == DeclKind::Interface {
                return Err(syntax_error(
                    format!("interface `{name}` cannot implement types; use `extends`"),
                    clause.as_span(),
                ));
            }
            let mut interfaces = self.type_exprs(clause, Some(&scope))?;
            decl.interfaces.append(&mut interfaces);
        }

        for member in members {
            decl = match member.as_rule() {
                Rule::field => self.field(decl, member, &scope)?,
                Rule::method => self.method(decl, member, &scope)?,
                _ => self.constructor(decl, member)?,
            };
        }

        Ok(decl)
    }

    fn field(
        &self,
        decl: TypeDeclaration<B>,
        pair: Pair<'_, Rule>,
        scope: &Scope<'_>,
    ) -> ParseResult<TypeDeclaration<B>> {
        let span = pair.as_span();
        let name = first_name(&pair)?;
        let ty = self
            .type_exprs(pair, Some(scope))?
            .pop()
            .ok_or_else(|| syntax_error("expected a field type", span))?;
        Ok(decl.with_field(self.builder, name, ty))
    }

    fn method(
        &self,
        decl: TypeDeclaration<B>,
        pair: Pair<'_, Rule>,
        scope: &Scope<'_>,
    ) -> ParseResult<TypeDeclaration<B>> {
        let span = pair.as_span();
        let name = first_name(&pair)?;

        let mut params = Vec::new();
        let mut ret = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::param => {
                    let param_name = first_name(&inner)?;
                    let param_span = inner.as_span();
                    let ty = self
                        .type_exprs(inner, Some(scope))?
                        .pop()
                        .ok_or_else(|| syntax_error("expected a parameter type", param_span))?;
                    params.push((param_name, ty));
                }
                Rule::type_expr => ret = Some(self.type_expr(inner, Some(scope))?),
                _ => {}
            }
        }

        let ret = ret.ok_or_else(|| syntax_error("expected a return type", span))?;
        Ok(decl.with_method(self.builder, name, params, ret))
    }

    fn constructor(
        &self,
        decl: TypeDeclaration<B>,
        pair: Pair<'_, Rule>,
    ) -> ParseResult<TypeDeclaration<B>> {
        let mut constructor = ConstructorDecl::default();
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::visibility => {
                    if inner.into_inner().any(|v| v.as_rule() == Rule::kw_private) {
                        constructor.visibility = Visibility::Private;
                    }
                }
                Rule::ctor_param => constructor.params.push(ctor_param(inner)?),
                _ => {}
            }
        }
        Ok(decl.with_constructor(constructor))
    }

    fn type_exprs(
        &self,
        pair: Pair<'_, Rule>,
        scope: Option<&Scope<'_>>,
    ) -> ParseResult<Vec<B::TypeView>> {
        pair.into_inner()
            .filter(|p| p.as_rule() == Rule::type_expr)
            .map(|p| self.type_expr(p, scope))
            .collect()
    }

    fn type_expr(
        &self,
        pair: Pair<'_, Rule>,
        scope: Option<&Scope<'_>>,
    ) -> ParseResult<B::TypeView> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let base = inner
            .next()
            .ok_or_else(|| syntax_error("expected a type", span))?;

        let mut ty = match base.as_rule() {
            Rule::named_type => self.named_type(base, scope)?,
            Rule::wildcard => self.wildcard(base, scope)?,
            rule => return Err(syntax_error(format!("unexpected {rule:?}"), base.as_span())),
        };
        for suffix in inner {
            if suffix.as_rule() == Rule::array_suffix {
                ty = self.builder.array_of(ty);
            }
        }
        Ok(ty)
    }

    fn named_type(
        &self,
        pair: Pair<'_, Rule>,
        scope: Option<&Scope<'_>>,
    ) -> ParseResult<B::TypeView> {
        let name = first_name(&pair)?;
        let args = pair.into_inner().find(|p| p.as_rule() == Rule::type_args);

        match (args, scope) {
            (Some(args), _) => {
                let args = self.type_exprs(args, scope)?;
                Ok(self.builder.parameterized(name, args))
            }
            (None, Some(scope)) if scope.binds(name) => {
                Ok(self.builder.variable(name, scope.owner))
            }
            (None, _) => Ok(self.builder.concrete(name)),
        }
    }

    fn wildcard(
        &self,
        pair: Pair<'_, Rule>,
        scope: Option<&Scope<'_>>,
    ) -> ParseResult<B::TypeView> {
        let builder = self.builder;
        let Some(bound) = pair.into_inner().next() else {
            return Ok(builder.wildcard([], [builder.top()]));
        };

        match bound.as_rule() {
            Rule::wildcard_extends => {
                let upper = self.type_exprs(bound, scope)?;
                Ok(builder.wildcard([], upper))
            }
            Rule::wildcard_super => {
                let lower = self.type_exprs(bound, scope)?;
                Ok(builder.wildcard(lower, [builder.top()]))
            }
            rule => Err(syntax_error(format!("unexpected {rule:?}"), bound.as_span())),
        }
    }
}

/// Text of the first `name` inside `pair`.
fn first_name<'i>(pair: &Pair<'i, Rule>) -> ParseResult<&'i str> {
    pair.clone()
        .into_inner()
        .find(|p| p.as_rule() == Rule::name)
        .map(|p| p.as_str())
        .ok_or_else(|| syntax_error("expected a name", pair.as_span()))
}

/// Constructor parameters are nominal identities, so `String[]` stays a name.
fn ctor_param(pair: Pair<'_, Rule>) -> ParseResult<String> {
    let mut identity = first_name(&pair)?.to_string();
    for suffix in pair.into_inner() {
        if suffix.as_rule() == Rule::array_suffix {
            identity.push_str(ARRAY_SUFFIX);
        }
    }
    Ok(identity)
}
