use crate::error::DatasetError;
use core_types::SalaryRecord;
use rust_decimal::Decimal;
use std::path::Path;

/// Loads the salary dataset from a CSV file with a header row.
///
/// The expected columns are `year, seniority, contract, company_size, role,
/// company_location, remote, salary_usd`. Loading stops at the first
/// malformed row; a negative salary is rejected as well, since every
/// aggregation downstream assumes non-negative USD amounts.
pub fn load_records(path: &Path) -> Result<Vec<SalaryRecord>, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        let record: SalaryRecord = row?;
        if record.salary_usd < Decimal::ZERO {
            // Positions are 1-based and count the header row.
            let line = records.len() as u64 + 2;
            return Err(DatasetError::InvalidRecord {
                line,
                reason: format!("negative salary {}", record.salary_usd),
            });
        }
        records.push(record);
    }

    tracing::info!(rows = records.len(), path = %path.display(), "dataset loaded");
    Ok(records)
}
