use crate::error::Result;
use crate::sheets::{CellValue, SpreadsheetId, SpreadsheetOperations, ValueGrid};
use std::io::Write;
use tracing::instrument;

// Columns A and E of the sample sheet
const NAME_COLUMN: usize = 0;
const MAJOR_COLUMN: usize = 4;

/// Read the roster range and print the name and major of each student.
#[instrument(name = "Reading roster", skip(sheets, out))]
pub async fn print_roster<S, W>(
    sheets: &S,
    spreadsheet: &SpreadsheetId,
    range: &str,
    out: &mut W,
) -> Result<()>
where
    S: SpreadsheetOperations + Sync,
    W: Write,
{
    let values = sheets.get_values(spreadsheet, range).await?;
    write_roster(&values, out)
}

fn write_roster<W: Write>(values: &ValueGrid, out: &mut W) -> Result<()> {
    if values.is_empty() {
        writeln!(out, "No data found.")?;
        return Ok(());
    }

    writeln!(out, "Name, Major")?;
    for row in values {
        writeln!(out, "{}, {}", cell(row, NAME_COLUMN), cell(row, MAJOR_COLUMN))?;
    }

    Ok(())
}

// The service trims trailing empty cells, so short rows are expected
fn cell(row: &[CellValue], index: usize) -> &CellValue {
    static EMPTY: CellValue = CellValue::Empty;
    row.get(index).unwrap_or(&EMPTY)
}
