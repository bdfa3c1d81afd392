//! [`Dataset`] -> delimited text. Cells are looked up by header name, so a
//! record missing a column serializes as an empty cell.

use crate::error::ReconError;
use crate::model::Dataset;

/// Serialize a dataset: header line first, then rows in dataset order.
pub fn write_dataset(dataset: &Dataset, delimiter: u8) -> Result<String, ReconError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer
        .write_record(&dataset.header)
        .map_err(|e| ReconError::Io(e.to_string()))?;

    for record in &dataset.records {
        let row: Vec<&str> = dataset
            .header
            .iter()
            .map(|column| record.get(column).unwrap_or(""))
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| ReconError::Io(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReconError::Io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReconError::Io(e.to_string()))
}
