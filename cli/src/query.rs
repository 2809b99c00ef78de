//! Resolution queries: a viewing type followed by a member.
//!
//! ```text
//! ArrayList<String> List.get()
//! Scores values()
//! Holder<Long> put(..)
//! Holder<Long> value
//! ```

use thiserror::Error;

/// What to resolve for a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// `name`
    Field,
    /// `name()`
    ReturnType,
    /// `name(..)`
    ParamTypes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member<'a> {
    /// Type the member is looked up in. Defaults to the viewing type.
    pub owner: Option<&'a str>,
    pub name: &'a str,
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("expected `<viewing type> <member>`")]
    MissingMember,

    #[error("invalid member `{0}`: expected `name`, `name()` or `name(..)`")]
    InvalidMember(String),

    #[error("`{0}` does not name a type to look members up in")]
    NoOwner(String),

    #[error("`{owner}` has no field `{name}`")]
    NoSuchField { owner: String, name: String },

    #[error("`{owner}` has no method `{name}`")]
    NoSuchMethod { owner: String, name: String },
}

/// Parse `[Owner.]name`, `[Owner.]name()` or `[Owner.]name(..)`.
pub fn parse_member(text: &str) -> Result<Member<'_>, QueryError> {
    let text = text.trim();
    let (path, kind) = if let Some(path) = text.strip_suffix("(..)") {
        (path, MemberKind::ParamTypes)
    } else if let Some(path) = text.strip_suffix("()") {
        (path, MemberKind::ReturnType)
    } else {
        (text, MemberKind::Field)
    };

    let (owner, name) = match path.rsplit_once('.') {
        Some((owner, name)) => (Some(owner), name),
        None => (None, path),
    };
    let invalid = || QueryError::InvalidMember(text.to_string());
    if !is_identifier(name) {
        return Err(invalid());
    }
    if let Some(owner) = owner {
        if !owner.split('.').all(is_identifier) {
            return Err(invalid());
        }
    }
    Ok(Member { owner, name, kind })
}

/// Split a query line into its viewing type and member.
///
/// The member is the last whitespace-separated word, so viewing types may
/// contain spaces.
pub fn split_line(line: &str) -> Result<(&str, &str), QueryError> {
    line.trim()
        .rsplit_once(char::is_whitespace)
        .map(|(viewing, member)| (viewing.trim_end(), member))
        .ok_or(QueryError::MissingMember)
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
