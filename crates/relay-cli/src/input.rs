//! Raw artifact batch input
//!
//! A batch is either one JSON array of raw field values or JSON Lines with
//! one raw value per line. Blank lines are ignored; an empty stored value is
//! written as `""`.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::CliError;

/// Path meaning standard input
pub const STDIN_PATH: &str = "-";

/// Read a batch from a file, or stdin for `-`
///
/// # Errors
/// Returns [`CliError`] on IO failure or malformed input.
pub fn read_batch(path: &Path) -> Result<Vec<Value>, CliError> {
    let text = if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::io_error(path, e))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?
    };
    parse_batch(&text)
}

/// Parse batch text
///
/// # Errors
/// Returns [`CliError::InvalidInput`] with the 1-based line of the first
/// value that is not JSON.
pub fn parse_batch(text: &str) -> Result<Vec<Value>, CliError> {
    // JSON Lines may also open with an array value, so the text is one batch
    // array only when it parses as a single document.
    if text.trim_start().starts_with('[') {
        if let Ok(Value::Array(values)) = serde_json::from_str::<Value>(text) {
            return Ok(values);
        }
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| CliError::InvalidInput {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn parses_array() {
        let values = parse_batch(r#"[{"kind":"report"}, "", null]"#).unwrap();
        assert_eq!(values, vec![json!({"kind": "report"}), json!(""), Value::Null]);
    }

    #[test]
    fn parses_json_lines() {
        let text = "\"{\\\"kind\\\":\\\"report\\\"}\"\n\n42\n{\"a\":1}\n";
        let values = parse_batch(text).unwrap();
        assert_eq!(values, vec![json!(r#"{"kind":"report"}"#), json!(42), json!({"a": 1})]);
    }

    #[test]
    fn json_lines_may_start_with_array() {
        let text = "[1,2,3]\n\"{\\\"kind\\\":\\\"report\\\"}\"\n";
        let values = parse_batch(text).unwrap();
        assert_eq!(values, vec![json!([1, 2, 3]), json!(r#"{"kind":"report"}"#)]);
    }

    #[test]
    fn unterminated_array_reports_line() {
        let err = parse_batch("[1, 2,\n").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { line: 1, .. }));
    }

    #[test]
    fn reports_bad_line() {
        let err = parse_batch("1\n2\nnot json\n").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { line: 3, .. }));
    }

    #[test]
    fn empty_input_is_empty_batch() {
        assert!(parse_batch("").unwrap().is_empty());
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[1, 2]").unwrap();
        assert_eq!(read_batch(file.path()).unwrap(), vec![json!(1), json!(2)]);
    }
}
