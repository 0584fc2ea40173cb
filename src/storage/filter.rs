//! Filter document evaluation
//!
//! Implements the subset of the MongoDB query language produced by the scope
//! resolver and the search service: equality on dotted paths (arrays are
//! matched element-wise), `$eq`, `$ne`, `$in`, `$nin`, `$exists`, `$gt`,
//! `$gte`, `$lt`, `$lte`, `$regex`/`$options`, `$and`, `$or` and `$nor`.

use crate::utils::error::{FixzitError, Result};
use bson::{Bson, Document};
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;

/// Check whether `document` satisfies `filter`
pub fn matches(document: &Document, filter: &Document) -> Result<bool> {
    for (key, condition) in filter {
        let satisfied = match key.as_str() {
            "$and" => all_match(document, clauses(key, condition)?)?,
            "$or" => any_match(document, clauses(key, condition)?)?,
            "$nor" => !any_match(document, clauses(key, condition)?)?,
            op if op.starts_with('$') => {
                return Err(FixzitError::bad_request(format!(
                    "Unsupported top-level operator: {}",
                    op
                )));
            }
            path => field_matches(&resolve_path(document, path), condition)?,
        };

        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

fn clauses<'a>(operator: &str, condition: &'a Bson) -> Result<Vec<&'a Document>> {
    let Bson::Array(items) = condition else {
        return Err(FixzitError::bad_request(format!(
            "{} expects an array of filter documents",
            operator
        )));
    };

    items
        .iter()
        .map(|item| match item {
            Bson::Document(clause) => Ok(clause),
            _ => Err(FixzitError::bad_request(format!(
                "{} expects an array of filter documents",
                operator
            ))),
        })
        .collect()
}

fn all_match(document: &Document, filters: Vec<&Document>) -> Result<bool> {
    for filter in filters {
        if !matches(document, filter)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_match(document: &Document, filters: Vec<&Document>) -> Result<bool> {
    for filter in filters {
        if matches(document, filter)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Collect every value reachable through a dotted path
///
/// Arrays met along the way fan out over their elements.
pub fn resolve_path<'a>(document: &'a Document, path: &str) -> Vec<&'a Bson> {
    let mut current: Vec<&Bson> = Vec::new();
    let mut segments = path.split('.');

    let Some(first) = segments.next() else {
        return current;
    };
    if let Some(value) = document.get(first) {
        current.push(value);
    }

    for segment in segments {
        let mut next = Vec::new();
        for value in current {
            match value {
                Bson::Document(inner) => next.extend(inner.get(segment)),
                Bson::Array(items) => {
                    if let Ok(index) = segment.parse::<usize>() {
                        next.extend(items.get(index));
                    } else {
                        for item in items {
                            if let Bson::Document(inner) = item {
                                next.extend(inner.get(segment));
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        current = next;
    }

    current
}

fn is_operator_document(condition: &Bson) -> bool {
    match condition {
        Bson::Document(inner) => {
            !inner.is_empty() && inner.keys().all(|key| key.starts_with('$'))
        }
        _ => false,
    }
}

fn field_matches(values: &[&Bson], condition: &Bson) -> Result<bool> {
    let Bson::Document(operators) = condition else {
        return Ok(equals_any(values, condition));
    };
    if !is_operator_document(condition) {
        return Ok(equals_any(values, condition));
    }

    for (operator, operand) in operators {
        let satisfied = match operator.as_str() {
            "$eq" => equals_any(values, operand),
            "$ne" => !equals_any(values, operand),
            "$in" => in_list(values, operator, operand)?,
            "$nin" => !in_list(values, operator, operand)?,
            "$exists" => values.is_empty() != truthy(operand),
            "$gt" => compares(values, operand, |o| o == Ordering::Greater),
            "$gte" => compares(values, operand, |o| o != Ordering::Less),
            "$lt" => compares(values, operand, |o| o == Ordering::Less),
            "$lte" => compares(values, operand, |o| o != Ordering::Greater),
            "$regex" => {
                let options = match operators.get("$options") {
                    Some(Bson::String(options)) => options.as_str(),
                    _ => "",
                };
                regex_matches(values, operand, options)?
            }
            "$options" => true,
            other => {
                return Err(FixzitError::bad_request(format!(
                    "Unsupported field operator: {}",
                    other
                )));
            }
        };

        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

fn truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(flag) => *flag,
        Bson::Null => false,
        other => as_f64(other).is_none_or(|n| n != 0.0),
    }
}

/// Equality with array element matching; a missing field equals `null`
fn equals_any(values: &[&Bson], expected: &Bson) -> bool {
    if values.is_empty() {
        return matches!(expected, Bson::Null);
    }

    values.iter().any(|value| {
        bson_eq(value, expected)
            || matches!(value, Bson::Array(items) if items.iter().any(|item| bson_eq(item, expected)))
    })
}

fn in_list(values: &[&Bson], operator: &str, operand: &Bson) -> Result<bool> {
    let Bson::Array(candidates) = operand else {
        return Err(FixzitError::bad_request(format!(
            "{} expects an array",
            operator
        )));
    };
    Ok(candidates
        .iter()
        .any(|candidate| equals_any(values, candidate)))
}

fn compares<F>(values: &[&Bson], operand: &Bson, accept: F) -> bool
where
    F: Fn(Ordering) -> bool,
{
    values.iter().any(|value| {
        compare_same_type(value, operand).is_some_and(&accept)
            || matches!(value, Bson::Array(items) if items
                .iter()
                .any(|item| compare_same_type(item, operand).is_some_and(&accept)))
    })
}

fn regex_matches(values: &[&Bson], pattern: &Bson, options: &str) -> Result<bool> {
    let regex = match pattern {
        Bson::String(pattern) => build_regex(pattern, options)?,
        Bson::RegularExpression(regex) => {
            let mut combined = regex.options.clone();
            combined.push_str(options);
            build_regex(&regex.pattern, &combined)?
        }
        _ => return Err(FixzitError::bad_request("$regex expects a string pattern")),
    };

    Ok(values.iter().any(|value| match value {
        Bson::String(text) => regex.is_match(text),
        Bson::Array(items) => items
            .iter()
            .any(|item| matches!(item, Bson::String(text) if regex.is_match(text))),
        _ => false,
    }))
}

fn build_regex(pattern: &str, options: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(options.contains('i'))
        .multi_line(options.contains('m'))
        .dot_matches_new_line(options.contains('s'))
        .build()?)
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Equality treating all numeric types as comparable
pub fn bson_eq(left: &Bson, right: &Bson) -> bool {
    match (as_f64(left), as_f64(right)) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

/// Ordering of two values of comparable type; `None` across types
pub fn compare_same_type(left: &Bson, right: &Bson) -> Option<Ordering> {
    if let (Some(l), Some(r)) = (as_f64(left), as_f64(right)) {
        return l.partial_cmp(&r);
    }

    match (left, right) {
        (Bson::String(l), Bson::String(r)) => Some(l.cmp(r)),
        (Bson::DateTime(l), Bson::DateTime(r)) => Some(l.cmp(r)),
        (Bson::ObjectId(l), Bson::ObjectId(r)) => Some(l.bytes().cmp(&r.bytes())),
        (Bson::Boolean(l), Bson::Boolean(r)) => Some(l.cmp(r)),
        _ => None,
    }
}

/// Total ordering used for sorting: missing/null first, then numbers,
/// strings, object ids, booleans, dates and everything else
pub fn compare_for_sort(left: Option<&Bson>, right: Option<&Bson>) -> Ordering {
    fn rank(value: Option<&Bson>) -> u8 {
        match value {
            None | Some(Bson::Null) => 0,
            Some(Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_)) => 1,
            Some(Bson::String(_)) => 2,
            Some(Bson::ObjectId(_)) => 3,
            Some(Bson::Boolean(_)) => 4,
            Some(Bson::DateTime(_)) => 5,
            Some(_) => 6,
        }
    }

    rank(left).cmp(&rank(right)).then_with(|| match (left, right) {
        (Some(l), Some(r)) => compare_same_type(l, r).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    })
}
