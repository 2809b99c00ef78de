mod error;
pub mod parser;

pub use parser::{CatalogParser, Rule, parse_catalog, parse_type};

#[cfg(test)]
mod parse_test;
