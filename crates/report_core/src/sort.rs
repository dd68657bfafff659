use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::Row;

/// Optional key transform applied to a field value before comparison.
pub type Primer = dyn Fn(&Value) -> Value + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn multiplier(self) -> i8 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown sort direction `{0}` (expected `asc` or `desc`)")]
pub struct SortDirectionError(pub String);

impl FromStr for SortDirection {
    type Err = SortDirectionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Ascending)
        } else if token.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Descending)
        } else {
            Err(SortDirectionError(token.to_string()))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Active sort column and direction, as last requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

/// Returns a new row order sorted by `field`. Ties may be reordered.
pub fn sort_rows(
    rows: &[Row],
    field: &str,
    direction: SortDirection,
    primer: Option<&Primer>,
) -> Vec<Row> {
    let key = |row: &Row| -> Value {
        let raw = row.get(field).cloned().unwrap_or(Value::Null);
        match primer {
            Some(primer) => primer(&raw),
            None => raw,
        }
    };

    let mut sorted = rows.to_vec();
    sorted.sort_unstable_by(|a, b| {
        let natural = compare_values(&key(a), &key(b)) as i8;
        (natural * direction.multiplier()).cmp(&0)
    });
    sorted
}

/// Total order over JSON values: null < bool < number < string < array/object.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) | Value::Object(_) => 4,
    }
}
