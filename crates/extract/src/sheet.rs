//! Spreadsheets: the first sheet rendered as CSV.
//!
//! `.xlsx` parses as an OOXML workbook, legacy `.xls` as a binary one.
//! Only the first sheet survives; subsequent sheets are ignored. Cells
//! render through their display form and are quoted RFC-4180 style when
//! they contain commas, quotes, or newlines.

use calamine::{Data, Range, Reader, Xls, Xlsx};
use groundwork_core::error::ExtractError;
use groundwork_core::extract::Extractor;
use std::io::Cursor;

pub struct SpreadsheetExtractor;

#[async_trait::async_trait]
impl Extractor for SpreadsheetExtractor {
    fn name(&self) -> &str {
        "spreadsheet"
    }

    fn extensions(&self) -> &[&str] {
        &["xls", "xlsx"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        extension: &str,
    ) -> std::result::Result<String, ExtractError> {
        let bytes = bytes.to_vec();
        let extension = extension.to_string();
        tokio::task::spawn_blocking(move || first_sheet_csv(bytes, &extension))
            .await
            .map_err(|e| ExtractError::TaskFailed(format!("spreadsheet task join error: {e}")))?
    }
}

fn first_sheet_csv(bytes: Vec<u8>, extension: &str) -> std::result::Result<String, ExtractError> {
    let range = if extension == "xls" {
        let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes))
            .map_err(|e| ExtractError::Parse(format!("XLS open failed: {e}")))?;
        match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => Some(range),
            Some(Err(e)) => return Err(ExtractError::Parse(format!("sheet read failed: {e}"))),
            None => None,
        }
    } else {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ExtractError::Parse(format!("XLSX open failed: {e}")))?;
        match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => Some(range),
            Some(Err(e)) => return Err(ExtractError::Parse(format!("sheet read failed: {e}"))),
            None => None,
        }
    };

    Ok(match range {
        Some(range) => render_csv(&range),
        None => String::new(),
    })
}

fn render_csv(range: &Range<Data>) -> String {
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(render_cell)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cell(cell: &Data) -> String {
    let raw = match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    };
    escape_csv_field(raw)
}

fn escape_csv_field(field: String) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_csv_joins_cells_and_rows() {
        let mut range = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("name".into()));
        range.set_value((0, 1), Data::String("age".into()));
        range.set_value((1, 0), Data::String("ava".into()));
        range.set_value((1, 1), Data::Float(3.0));
        assert_eq!(render_csv(&range), "name,age\nava,3");
    }

    #[test]
    fn cells_with_commas_are_quoted() {
        assert_eq!(escape_csv_field("last, first".into()), "\"last, first\"");
        assert_eq!(escape_csv_field("say \"hi\"".into()), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("plain".into()), "plain");
    }

    #[test]
    fn empty_cells_render_empty() {
        assert_eq!(render_cell(&Data::Empty), "");
        assert_eq!(render_cell(&Data::Bool(true)), "true");
    }

    #[tokio::test]
    async fn garbage_bytes_are_a_parse_error() {
        let err = SpreadsheetExtractor
            .extract(b"not a workbook", "xlsx")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }
}
