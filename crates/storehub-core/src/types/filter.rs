//! Filter types for dynamic query building.
//!
//! A [`FilterField`] is pure data: the Postgres repository renders it to
//! SQL, the in-memory repository evaluates it against a record's JSON form.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// SQL `LIKE` pattern match.
    Like,
    /// SQL `ILIKE` case-insensitive pattern match.
    ILike,
    /// SQL `IN` list membership.
    In,
    /// SQL `IS NULL` check.
    IsNull,
    /// SQL `IS NOT NULL` check.
    IsNotNull,
}

impl FilterOp {
    /// Return the SQL operator for binary comparisons.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::In => "= ANY",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }
}

/// A dynamic filter value that can represent various SQL types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// A list of string values (for `IN` operator).
    StringList(Vec<String>),
    /// Null / no value (for `IS NULL`, `IS NOT NULL`).
    Null,
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column or field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::String(value.into()))
    }

    /// Shorthand for a boolean flag filter.
    pub fn flag(field: impl Into<String>, value: bool) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::Boolean(value))
    }

    /// Shorthand for a case-insensitive LIKE filter.
    pub fn ilike(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::ILike, FilterValue::String(pattern.into()))
    }

    /// Evaluate this condition against a record serialized as a JSON object.
    ///
    /// Follows SQL semantics: a missing or null field never satisfies a
    /// comparison, only `IS NULL`.
    pub fn matches(&self, record: &Value) -> bool {
        let actual = record.get(&self.field).filter(|v| !v.is_null());

        match self.op {
            FilterOp::IsNull => actual.is_none(),
            FilterOp::IsNotNull => actual.is_some(),
            op => {
                let Some(actual) = actual else {
                    return false;
                };
                match op {
                    FilterOp::Eq => compare(actual, &self.value) == Some(Ordering::Equal),
                    FilterOp::Ne => compare(actual, &self.value).is_some_and(Ordering::is_ne),
                    FilterOp::Gt => compare(actual, &self.value) == Some(Ordering::Greater),
                    FilterOp::Gte => compare(actual, &self.value).is_some_and(Ordering::is_ge),
                    FilterOp::Lt => compare(actual, &self.value) == Some(Ordering::Less),
                    FilterOp::Lte => compare(actual, &self.value).is_some_and(Ordering::is_le),
                    FilterOp::Like => like(actual, &self.value, false),
                    FilterOp::ILike => like(actual, &self.value, true),
                    FilterOp::In => match &self.value {
                        FilterValue::StringList(items) => items
                            .iter()
                            .any(|item| actual.as_str() == Some(item.as_str())),
                        other => compare(actual, other) == Some(Ordering::Equal),
                    },
                    FilterOp::IsNull | FilterOp::IsNotNull => unreachable!("handled above"),
                }
            }
        }
    }
}

/// Whether `name` is a plain identifier that is safe to splice into SQL.
pub fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn compare(actual: &Value, expected: &FilterValue) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Bool(a), FilterValue::Boolean(b)) => Some(a.cmp(b)),
        (Value::Number(a), FilterValue::Integer(b)) => a.as_f64()?.partial_cmp(&(*b as f64)),
        (Value::Number(a), FilterValue::Float(b)) => a.as_f64()?.partial_cmp(b),
        (Value::String(a), FilterValue::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

fn like(actual: &Value, pattern: &FilterValue, case_insensitive: bool) -> bool {
    let (Value::String(text), FilterValue::String(pattern)) = (actual, pattern) else {
        return false;
    };
    let (text, pattern) = if case_insensitive {
        (text.to_lowercase(), pattern.to_lowercase())
    } else {
        (text.clone(), pattern.clone())
    };
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    like_match(&text, &pattern)
}

fn like_match(text: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|skip| like_match(&text[skip..], rest)),
        Some(('_', rest)) => !text.is_empty() && like_match(&text[1..], rest),
        Some((c, rest)) => text.first() == Some(c) && like_match(&text[1..], rest),
    }
}
