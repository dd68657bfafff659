use serde_json::{Map, Value};

/// Field of the fetched record that carries the JSON-encoded rows.
pub const CUSTOM_VALUES_FIELD: &str = "customValues";

/// One report row, keys in the order the backend sent them.
pub type Row = Map<String, Value>;

/// Materialized report: parsed rows plus every other field of the fetched record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportData {
    pub rows: Vec<Row>,
    pub metadata: Map<String, Value>,
}

impl ReportData {
    pub fn columns(&self) -> Vec<String> {
        columns(&self.rows)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MaterializeError {
    #[error("report record is not a JSON object")]
    NotAnObject,
    #[error("report record has no `customValues` field")]
    MissingRows,
    #[error("`customValues` is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("`customValues` is not an array of objects")]
    NotRowArray,
}

/// Parse a fetched report record into rows.
///
/// `customValues` is normally a JSON-encoded string; an inline array is accepted as well.
pub fn materialize(record: Value) -> Result<ReportData, MaterializeError> {
    let Value::Object(mut metadata) = record else {
        return Err(MaterializeError::NotAnObject);
    };
    let raw = metadata
        .remove(CUSTOM_VALUES_FIELD)
        .ok_or(MaterializeError::MissingRows)?;

    let parsed = match raw {
        Value::String(encoded) => serde_json::from_str::<Value>(&encoded)
            .map_err(|err| MaterializeError::InvalidJson(err.to_string()))?,
        inline @ Value::Array(_) => inline,
        _ => return Err(MaterializeError::NotRowArray),
    };

    let Value::Array(items) = parsed else {
        return Err(MaterializeError::NotRowArray);
    };
    let rows = items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(row),
            _ => Err(MaterializeError::NotRowArray),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReportData { rows, metadata })
}

/// Union of row keys in first-seen order.
pub fn columns(rows: &[Row]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !seen.iter().any(|known| known == key) {
                seen.push(key.clone());
            }
        }
    }
    seen
}

/// Render a cell value the way a table would show it.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
