use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::domain::company::CompanyRow;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not create {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    #[error("could not write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not flush csv: {0}")]
    Flush(#[from] std::io::Error),
}

#[derive(Serialize)]
struct CompanyRecord<'a> {
    #[serde(rename = "Website")]
    website: &'a str,
    #[serde(rename = "Extracted Information")]
    extracted_information: &'a str,
}

/// Writes the header and one record per row, in order.
pub fn write_company_rows<W: Write>(writer: W, rows: &[CompanyRow]) -> Result<(), StorageError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // serde only emits the header with the first record
    if rows.is_empty() {
        csv_writer.write_record(["Website", "Extracted Information"])?;
    }
    for row in rows {
        csv_writer.serialize(CompanyRecord {
            website: &row.website,
            extracted_information: row.outcome.cell(),
        })?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Creates or truncates the file at `path`.
pub fn save_company_rows(path: impl AsRef<Path>, rows: &[CompanyRow]) -> Result<(), StorageError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| StorageError::Create {
        path: path.display().to_string(),
        source,
    })?;

    write_company_rows(file, rows)
}
