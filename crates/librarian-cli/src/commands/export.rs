//! Export-notes command implementation.

use crate::cli::ExportNotesArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use librarian_pipeline::export_notes;
use librarian_store::JsonTrackingLog;

/// Execute the export-notes command.
pub fn execute_export_notes(args: ExportNotesArgs, formatter: &Formatter) -> Result<()> {
    if !args.tracking_file.is_file() {
        return Err(CliError::Config(format!(
            "Tracking file {} does not exist",
            args.tracking_file.display()
        )));
    }

    let log = JsonTrackingLog::open(&args.tracking_file)?;
    let records = log.load_records()?;
    tracing::info!(
        "Loaded {} records from {}",
        records.len(),
        args.tracking_file.display()
    );

    let notes = export_notes(&records, &args.output_dir, &args.doc_type)?;
    println!("{}", formatter.exported_notes(&notes));

    Ok(())
}
