use indufind_syntax::{Filter, Query};
use memchr::memmem;

use crate::record::RecordValue;

/// Field consulted by the query's tag precondition.
const TAG_FIELD: &str = "tag";

/// Case- and whitespace-insensitive substring test. Both sides are
/// normalized before the scan; an empty needle matches everything.
pub(crate) fn contains_normalized(haystack: &str, needle: &str) -> bool {
    let haystack = textnorm::normalize(haystack);
    let needle = textnorm::normalize(needle);
    memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

/// Evaluates a parsed query against one record.
///
/// The tag is an AND-ed precondition on the record's `tag` field; the
/// filters are then AND-ed in order, short-circuiting on the first miss.
/// Missing fields and shape mismatches are ordinary non-matches, never
/// errors.
#[must_use]
pub fn matches(record: &RecordValue, query: &Query) -> bool {
    if let Some(tag) = &query.tag {
        let record_tag = record
            .get_normalized(TAG_FIELD)
            .map(RecordValue::render)
            .unwrap_or_default();
        if !contains_normalized(&record_tag, tag) {
            return false;
        }
    }
    query.filters.iter().all(|filter| filter_matches(record, filter))
}

fn filter_matches(record: &RecordValue, filter: &Filter) -> bool {
    path_match(
        record,
        &filter.path,
        filter.param.as_deref(),
        filter.value.as_deref(),
    )
}

/// Walks `path` through the record, then applies `param` and the value
/// check.
///
/// At a map the current segment must be present (normalized key compare);
/// at a list the remaining path broadcasts over the items and the walk
/// succeeds if any item does; a scalar with path left is a dead end.
fn path_match(
    record: &RecordValue,
    path: &[String],
    param: Option<&str>,
    value: Option<&str>,
) -> bool {
    let mut current = record;
    for (i, segment) in path.iter().enumerate() {
        let segment = textnorm::normalize(segment);
        match current {
            RecordValue::Map(_) => match current.get_normalized(&segment) {
                Some(next) => current = next,
                None => return false,
            },
            RecordValue::List(items) => {
                let remaining = &path[i..];
                return items
                    .iter()
                    .any(|item| path_match(item, remaining, param, value));
            }
            RecordValue::Scalar(_) => return false,
        }
    }

    match (current, param) {
        (RecordValue::Map(_), Some(param)) => {
            let param = textnorm::normalize(param);
            match current.get_normalized(&param) {
                Some(next) => current = next,
                None => return false,
            }
        }
        // On a list the parameter check is terminal: some item must be a
        // map carrying the key, with the value check applied to that
        // sub-field directly.
        (RecordValue::List(items), Some(param)) => {
            let param = textnorm::normalize(param);
            return items.iter().any(|item| match item.get_normalized(&param) {
                Some(field) => {
                    value.is_none_or(|value| contains_normalized(&field.render(), value))
                }
                None => false,
            });
        }
        (RecordValue::Scalar(_), Some(_)) => return false,
        (_, None) => {}
    }

    match value {
        Some(value) => contains_normalized(&current.render(), value),
        // A bare path (or path + param) only asserts existence; any reached
        // value counts, including the empty string.
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indufind_syntax::parse_query;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RecordValue {
        RecordValue::from(value)
    }

    fn check(value: &RecordValue, query: &str) -> bool {
        matches(value, &parse_query(query).unwrap())
    }

    #[test]
    fn empty_query_matches_everything() {
        let target = record(json!({"tag": "=A1"}));
        assert!(check(&target, ""));
        assert!(check(&target, "   "));
    }

    #[test]
    fn tag_is_a_normalized_substring_precondition() {
        let target = record(json!({"tag": "=DEV+LOC", "page": 4}));
        assert!(check(&target, "=DEV"));
        assert!(check(&target, "=dev"));
        assert!(!check(&target, "=NOMATCH"));
        // Tag failure vetoes the query even when the filters would match.
        assert!(!check(&target, "=NOMATCH @page=4"));
    }

    #[test]
    fn tag_whitespace_collapses_before_comparison() {
        let target = record(json!({"tag": "  Foo   Bar "}));
        let spellings = ["foo bar", "FOO   BAR", "  Foo   Bar "];
        for spelling in spellings {
            let query = Query {
                tag: Some(spelling.to_string()),
                filters: Vec::new(),
            };
            assert!(matches(&target, &query), "{spelling:?}");
        }
    }

    #[test]
    fn missing_tag_field_fails_closed() {
        let target = record(json!({"page": 4}));
        assert!(!check(&target, "=A1"));
    }

    #[test]
    fn simple_path_value_match() {
        let target = record(json!({"name": "test", "value": "123"}));
        assert!(check(&target, "@name=test"));
        assert!(check(&target, "@name=tes"));
        assert!(!check(&target, "@name=other"));
    }

    #[test]
    fn nested_path_descends_maps() {
        let target = record(json!({"level1": {"level2": "value"}}));
        assert!(check(&target, "@level1.level2=value"));
        assert!(!check(&target, "@level1.level2=other"));
        assert!(!check(&target, "@level1.missing=value"));
    }

    #[test]
    fn list_broadcasts_the_remaining_path() {
        let target = record(json!({"items": [{"name": "item1"}, {"name": "item2"}]}));
        assert!(check(&target, "@items.name=item1"));
        assert!(check(&target, "@items.name=item2"));
        assert!(!check(&target, "@items.name=item3"));
    }

    #[test]
    fn list_broadcast_reaches_nested_maps() {
        let target = record(json!({"items": [{"sub": {"name": "X"}}]}));
        assert!(check(&target, "@items.sub(name)=X"));
        assert!(!check(&target, "@items.sub(name)=Y"));
    }

    #[test]
    fn param_selects_a_map_sub_field() {
        let target = record(json!({"attributes": {"color": "red", "size": "large"}}));
        assert!(check(&target, "@attributes(color)=red"));
        assert!(!check(&target, "@attributes(color)=blue"));
        assert!(!check(&target, "@attributes(missing)=red"));
    }

    #[test]
    fn param_on_a_list_checks_any_item() {
        let target = record(json!({"links": [{"color": "red"}, {"color": "blue"}]}));
        assert!(check(&target, "@links(color)=blue"));
        assert!(check(&target, "@links(color)=red"));
        assert!(!check(&target, "@links(color)=green"));
    }

    #[test]
    fn param_on_a_list_without_value_asserts_existence() {
        let target = record(json!({"items": [
            {"name": "color", "value": "red"},
            {"name": "size", "value": "large"},
        ]}));
        assert!(check(&target, "@items(name)"));
        assert!(check(&target, "@items(value)=red"));
        assert!(!check(&target, "@items(weight)"));
    }

    #[test]
    fn param_on_a_scalar_fails() {
        let target = record(json!({"name": "test"}));
        assert!(!check(&target, "@name(sub)"));
    }

    #[test]
    fn bare_path_asserts_existence_only() {
        let target = record(json!({"name": "test", "empty": ""}));
        assert!(check(&target, "@name"));
        assert!(check(&target, "@empty"));
        assert!(!check(&target, "@nonexistent"));
    }

    #[test]
    fn scalar_mid_path_is_a_dead_end() {
        let target = record(json!({"name": "test"}));
        assert!(!check(&target, "@name.deeper=test"));
    }

    #[test]
    fn filters_combine_with_and() {
        let target = record(json!({"tag": "=DEV", "page": 4}));
        assert!(check(&target, "@tag=DEV @page=4"));
        assert!(!check(&target, "@tag=DEV @page=5"));
    }

    #[test]
    fn value_comparison_collapses_whitespace_and_case() {
        let target = record(json!({"desc": "  Wire   STRONG  2 "}));
        assert!(check(&target, "@desc=wire strong"));
        assert!(check(&target, "@desc=STRONG 2"));
    }

    #[test]
    fn numbers_and_bools_match_by_rendering() {
        let target = record(json!({"page": 4, "active": true}));
        assert!(check(&target, "@page=4"));
        assert!(!check(&target, "@page=5"));
        assert!(check(&target, "@active=true"));
    }

    #[test]
    fn empty_value_matches_any_reached_field() {
        let target = record(json!({"guid": "abc"}));
        assert!(check(&target, "@guid=()"));
    }
}
