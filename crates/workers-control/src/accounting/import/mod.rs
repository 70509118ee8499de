mod parser;

use crate::accounting::domain::{Plan, Transfer};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum SnapshotImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, message: String },
}

impl std::fmt::Display for SnapshotImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotImportError::Io(err) => write!(f, "failed to read ledger snapshot: {}", err),
            SnapshotImportError::Csv(err) => write!(f, "invalid ledger snapshot CSV: {}", err),
            SnapshotImportError::InvalidRow { line, message } => {
                write!(f, "invalid ledger snapshot row on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for SnapshotImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotImportError::Io(err) => Some(err),
            SnapshotImportError::Csv(err) => Some(err),
            SnapshotImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for SnapshotImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SnapshotImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads plans and transfers exported as CSV into memory.
///
/// Plans: `id,name,approval_date,timeframe_days,is_public_service,means_cost,resource_cost,labour_cost`
/// where an empty `approval_date` marks an unapproved plan and an empty `id` gets a fresh one.
/// Transfers: `date,type,debit_account,credit_account,value`.
pub struct LedgerSnapshotImporter;

impl LedgerSnapshotImporter {
    pub fn plans_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Plan>, SnapshotImportError> {
        let file = std::fs::File::open(path)?;
        Self::plans_from_reader(file)
    }

    pub fn plans_from_reader<R: Read>(reader: R) -> Result<Vec<Plan>, SnapshotImportError> {
        parser::parse_plans(reader)
    }

    pub fn transfers_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Transfer>, SnapshotImportError> {
        let file = std::fs::File::open(path)?;
        Self::transfers_from_reader(file)
    }

    pub fn transfers_from_reader<R: Read>(reader: R) -> Result<Vec<Transfer>, SnapshotImportError> {
        parser::parse_transfers(reader)
    }
}
