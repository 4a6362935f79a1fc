//! CSV documents re-serialized as JSON rows.
//!
//! The first row names the columns. Every following row becomes a JSON
//! object keyed by those names, and the whole document flattens to one
//! JSON array. A row longer than the header keeps its extra fields under
//! positional `field_N` keys rather than losing them.

use csv::ReaderBuilder;
use groundwork_core::error::ExtractError;
use groundwork_core::extract::Extractor;
use serde_json::{Map, Value};

pub struct DelimitedExtractor;

#[async_trait::async_trait]
impl Extractor for DelimitedExtractor {
    fn name(&self) -> &str {
        "delimited"
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        _extension: &str,
    ) -> std::result::Result<String, ExtractError> {
        rows_as_json(bytes)
    }
}

fn rows_as_json(bytes: &[u8]) -> std::result::Result<String, ExtractError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| ExtractError::Parse(format!("CSV header read failed: {e}")))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ExtractError::Parse(format!("CSV record read failed: {e}")))?;
        let mut row = Map::new();
        for (i, field) in record.iter().enumerate() {
            let key = match headers.get(i) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => format!("field_{i}"),
            };
            row.insert(key, Value::String(field.to_string()));
        }
        rows.push(Value::Object(row));
    }

    serde_json::to_string(&rows)
        .map_err(|e| ExtractError::Parse(format!("CSV serialize failed: {e}")))
}
