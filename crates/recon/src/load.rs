// CSV loading for the two inventory snapshots.
// Every cell stays text; numeric interpretation happens in the reconciler.

use std::path::Path;

use crate::config::{InputConfig, InputEncoding};
use crate::error::ReconError;
use crate::model::{Dataset, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a file from disk and parse it as `dataset`.
pub fn load_file(dataset: Dataset, path: &Path, input: &InputConfig) -> Result<Table, ReconError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
    load_table(dataset, &bytes, input)
}

/// Decode raw bytes to text in the configured single-byte (or UTF-8) charset.
pub fn decode(dataset: Dataset, bytes: &[u8], encoding: InputEncoding) -> Result<String, ReconError> {
    match encoding {
        InputEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        InputEncoding::Windows1252 => {
            // No BOM sniffing: a stray UTF-8 BOM must not switch the charset
            let (decoded, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
            Ok(decoded.into_owned())
        }
        InputEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            std::str::from_utf8(bytes).map(str::to_owned).map_err(|e| {
                ReconError::parse(
                    dataset,
                    format!("invalid UTF-8 at byte {}", e.valid_up_to()),
                )
            })
        }
    }
}

/// Parse CSV bytes into a header row plus raw-text records.
///
/// Rows must all have the header's width; a ragged row is a parse error
/// rather than being padded or truncated.
pub fn load_table(dataset: Dataset, bytes: &[u8], input: &InputConfig) -> Result<Table, ReconError> {
    let delimiter = input.delimiter_byte()?;
    let content = decode(dataset, bytes, input.encoding)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(false)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::parse(dataset, e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ReconError::parse(dataset, "missing header row"));
    }

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::parse(dataset, e.to_string()))?;
        table.rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    log::info!(
        "loaded {dataset}: {} columns, {} rows",
        table.headers.len(),
        table.rows.len()
    );

    Ok(table)
}
