use pest::error::{ErrorVariant, InputLocation};

use super::Rule;
use crate::errors::{CatalogError, Span};

/// Convert Pest error to human-readable CatalogError
pub(super) fn convert_pest_error(err: pest::error::Error<Rule>) -> CatalogError {
    let span = match err.location {
        InputLocation::Pos(pos) => Span(pos..pos),
        InputLocation::Span((start, end)) => Span(start..end),
    };

    let message = match err.variant {
        ErrorVariant::ParsingError { positives, .. } => {
            format!("expected {}", format_expected_rules(&positives))
        }
        ErrorVariant::CustomError { message } => message,
    };

    CatalogError::Parse { message, span }
}

/// Error raised while building declarations from a successful parse.
pub(super) fn syntax_error(message: impl Into<String>, span: pest::Span<'_>) -> CatalogError {
    CatalogError::Parse {
        message: message.into(),
        span: span.into(),
    }
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();
    for rule in rules {
        let concept = describe(*rule);
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "something else".to_string(),
        Some((only, [])) => only.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

fn describe(rule: Rule) -> &'static str {
    match rule {
        Rule::declaration | Rule::decl_kind | Rule::kw_abstract => "a declaration",
        Rule::kw_class => "`class`",
        Rule::kw_interface => "`interface`",
        Rule::kw_extends => "`extends`",
        Rule::kw_implements => "`implements`",
        Rule::kw_super => "`super`",
        Rule::field | Rule::method | Rule::constructor | Rule::visibility => "a member",
        Rule::name | Rule::param | Rule::ctor_param | Rule::type_param => "a name",
        Rule::type_params | Rule::type_args => "type arguments",
        Rule::type_expr | Rule::named_type | Rule::wildcard => "a type",
        Rule::array_suffix => "`[]`",
        Rule::EOI => "end of input",
        _ => "something else",
    }
}
