//! Import command implementation.

use crate::backend::Backend;
use crate::cli::ImportArgs;
use crate::error::Result;
use crate::output::Formatter;
use caselink_client::RecordSetDto;
use caselink_domain::RecordSet;
use caselink_store::IngestReport;
use std::fs;
use std::path::Path;

/// Execute the import command.
pub fn execute_import(
    args: &ImportArgs,
    backend: &mut Backend,
    formatter: &Formatter,
) -> Result<()> {
    let records = read_records(&args.file)?;
    let report: IngestReport = backend.import(records)?;
    println!("{}", formatter.success(&format!("Imported {}", report.summary())));
    Ok(())
}

/// Read and validate a record-set JSON file.
pub fn read_records(path: &Path) -> Result<RecordSet> {
    let text = fs::read_to_string(path)?;
    let dto = RecordSetDto::from_json(&text)?;
    Ok(RecordSet::try_from(dto)?)
}
