//! Error rendering using ariadne
//!
//! Catalog parse errors are shown against the catalog source with the
//! offending span labelled. Every other error has no location and is written
//! as a plain message with an optional hint.

use crate::{CatalogError, Error, InstantiationCause, InstantiationError, ResolveError};
use ariadne::{ColorGenerator, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<catalog>";

/// Render an error to stderr
///
/// `source` is the catalog text the error came from, used for snippets.
///
/// # Example
/// ```no_run
/// use generis::{BoxBuilder, Catalog, render_error};
///
/// let mut catalog = Catalog::with_prelude(BoxBuilder::new()).unwrap();
/// let source = "class Broken extends { }";
/// if let Err(e) = catalog.load(source) {
///     render_error(&e.into(), source);
/// }
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to_writer(error, source, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, source: &str, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, source, writer, true)
}

/// Render an error to a String
///
/// # Example
/// ```
/// use generis::{
///     BoxBuilder, Catalog, Error, render_error_to_string, render_error_to_string_no_color,
/// };
///
/// let mut catalog = Catalog::with_prelude(BoxBuilder::new()).unwrap();
/// let source = "class Broken extends { }";
/// let err: Error = catalog.load(source).unwrap_err().into();
/// assert!(!render_error_to_string(&err, source).is_empty());
/// assert!(render_error_to_string_no_color(&err, source).contains("class Broken extends"));
/// ```
pub fn render_error_to_string(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes
///
/// Same as `render_error_to_string` but without ANSI color codes, which
/// makes the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Catalog(CatalogError::Parse { message, span }) => {
            let mut colors = ColorGenerator::new();
            colors.next(); // Skip the first color.

            // Empty spans are widened to one character inside the source.
            let end = span.0.end.min(source.len());
            let start = span.0.start.min(end);
            let range = match (start == end, end < source.len()) {
                (true, true) => start..end + 1,
                (true, false) if end > 0 => end - 1..end,
                _ => start..end,
            };

            Report::build(ReportKind::Error, (SOURCE_ID, range.clone()))
                .with_message("Syntax error in catalog")
                .with_config(
                    ariadne::Config::default()
                        .with_color(use_color)
                        .with_index_type(IndexType::Byte),
                )
                .with_label(
                    Label::new((SOURCE_ID, range))
                        .with_message(message)
                        .with_color(colors.next()),
                )
                .finish()
                .write((SOURCE_ID, Source::from(source)), &mut *writer)
        }
        Error::Catalog(err) => render_plain(&err.to_string(), catalog_help(err), writer),
        Error::Resolve(err) => render_plain(&err.to_string(), resolve_help(err), writer),
        Error::Instantiation(err) => {
            render_plain(&err.to_string(), instantiation_help(err), writer)
        }
    }
}

fn render_plain(message: &str, help: Option<&str>, writer: &mut dyn Write) -> std::io::Result<()> {
    writeln!(writer, "Error: {message}")?;
    if let Some(help) = help {
        writeln!(writer, "  help: {help}")?;
    }
    Ok(())
}

fn catalog_help(err: &CatalogError) -> Option<&'static str> {
    match err {
        CatalogError::UnknownType { .. } => {
            Some("declare the type in the same catalog or load a catalog that declares it")
        }
        CatalogError::UnboundVariable { .. } => {
            Some("type variables can only be used inside the type that declares them")
        }
        CatalogError::Cycle { .. } => Some("a type cannot be its own ancestor"),
        CatalogError::InvalidSupertype { .. } => {
            Some("wildcards, type variables and arrays cannot be inherited from")
        }
        _ => None,
    }
}

fn resolve_help(err: &ResolveError) -> Option<&'static str> {
    match err {
        ResolveError::Unresolved { .. } => {
            Some("view the member through a type that binds the variable, or use the lenient fallback")
        }
        ResolveError::InvalidArgument { .. } => {
            Some("resolve through a named type such as `List<String>`")
        }
        _ => None,
    }
}

fn instantiation_help(err: &InstantiationError) -> Option<&'static str> {
    match err.cause {
        InstantiationCause::Abstract => {
            Some("only concrete classes, or interfaces with a default implementation, can be created")
        }
        _ => None,
    }
}
