use std::io::Write;

use serde_json::Value;

use crate::error::CliError;

/// Write one JSON document to stdout.
pub fn render(data: &Value, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    write_json(&mut stdout, data, pretty)
}

fn write_json<W: Write>(writer: &mut W, data: &Value, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data)?;
    } else {
        serde_json::to_writer(&mut *writer, data)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_output_is_one_line() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"count": 0}), false).expect("written");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "{\"count\":0}\n");
    }

    #[test]
    fn pretty_output_is_indented() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"count": 0}), true).expect("written");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "{\n  \"count\": 0\n}\n");
    }
}
