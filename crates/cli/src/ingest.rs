//! Dataset ingestion helpers.

use std::path::Path;

/// Read a file as UTF-8, decoding as Windows-1252 when the bytes are not
/// valid UTF-8. Insurance ledger exports are frequently cp1252.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            // The error keeps the raw buffer, so no second read is needed.
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            Ok(decoded.into_owned())
        }
    }
}
