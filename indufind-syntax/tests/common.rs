#![allow(dead_code)]
//! Shared helpers for `indufind-syntax` integration tests.

use indufind_syntax::*;

pub fn parse_ok(input: &str) -> Query {
    parse_query(input).unwrap()
}

pub fn parse_err(input: &str) -> ParseError {
    parse_query(input).unwrap_err()
}

/// Parses a query expected to contain exactly one filter and returns it.
pub fn single_filter(input: &str) -> Filter {
    let query = parse_ok(input);
    assert_eq!(query.filters.len(), 1, "query: {input:?}");
    query.filters.into_iter().next().unwrap()
}

pub fn assert_filter(
    filter: &Filter,
    path: &[&str],
    param: Option<&str>,
    value: Option<&str>,
) {
    assert_eq!(filter.path, path);
    assert_eq!(filter.param.as_deref(), param);
    assert_eq!(filter.value.as_deref(), value);
}
