use crate::error::{AppError, Result};
use crate::sheets::{
    AppendOptions, CellValue, GridRect, InsertDataOption, PasteType, RangeValues, SpreadsheetId,
    SpreadsheetOperations, SpreadsheetSummary, StructuralEdit, ValueGrid, ValueInputOption,
};
use chrono::{DateTime, Utc};
use indicatif::ProgressStyle;
use tracing::{Span, debug, info, instrument};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const STEPS: u64 = 5;

const RENAMED_TITLE: &str = "Expenses - API";

/// What the walkthrough observed in the spreadsheet once it finished.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughReport {
    pub spreadsheet: SpreadsheetSummary,
    pub appended_total: Option<CellValue>,
    pub february_total: Option<CellValue>,
    pub march_total: Option<CellValue>,
}

/// Drives every spreadsheet operation against a single expenses spreadsheet.
pub struct Walkthrough<S> {
    sheets: S,
    insert: InsertDataOption,
}

impl<S> Walkthrough<S>
where
    S: SpreadsheetOperations + Sync,
{
    pub fn new(sheets: S) -> Self {
        Self {
            sheets,
            insert: InsertDataOption::InsertRows,
        }
    }

    /// How the grand total is appended below the expenses table.
    pub fn with_insert(mut self, insert: InsertDataOption) -> Self {
        self.insert = insert;
        self
    }

    pub fn default_title(now: DateTime<Utc>) -> String {
        format!("Expenses walkthrough {}", now.format("%Y-%m-%d %H:%M UTC"))
    }

    /// Use the given spreadsheet, or create a fresh one.
    pub async fn prepare(&self, existing: Option<SpreadsheetId>) -> Result<SpreadsheetId> {
        if let Some(id) = existing {
            return Ok(id);
        }

        let created = self
            .sheets
            .create_spreadsheet(&Self::default_title(Utc::now()))
            .await?;
        info!(title = %created.title, url = %created.url, "Created spreadsheet");

        Ok(created.id)
    }

    #[instrument(name = "Walkthrough", skip_all, fields(spreadsheet = %spreadsheet))]
    pub async fn run(&self, spreadsheet: &SpreadsheetId) -> Result<WalkthroughReport> {
        let span = Span::current();
        span.pb_set_style(
            &ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
            )
            .map_err(|e| AppError::Other(e.into()))?,
        );
        span.pb_set_length(STEPS);

        span.pb_set_message("Writing expenses");
        self.sheets
            .update_values(spreadsheet, "A1", &expenses(), ValueInputOption::Raw)
            .await?;
        span.pb_inc(1);

        span.pb_set_message("Writing monthly totals");
        let written = self
            .sheets
            .batch_update_values(spreadsheet, &monthly_totals(), ValueInputOption::UserEntered)
            .await?;
        for response in &written.responses {
            debug!(range = %response.updated_range, "Wrote monthly total");
        }
        span.pb_inc(1);

        span.pb_set_message("Appending grand total");
        let appended = self
            .sheets
            .append_values(
                spreadsheet,
                "A1",
                &vec![vec!["Total".into(), "=E1+E4".into()]],
                AppendOptions {
                    input: ValueInputOption::UserEntered,
                    insert: self.insert,
                    include_values_in_response: true,
                },
            )
            .await?;
        let appended_total = appended
            .updates
            .updated_data
            .as_deref()
            .and_then(|rows| first_cell(rows, 1));
        info!(total = ?appended_total, range = %appended.updates.updated_range, "Appended total");
        span.pb_inc(1);

        span.pb_set_message("Reading monthly totals");
        let totals = self
            .sheets
            .batch_get_values(spreadsheet, &["E1".to_string(), "E4".to_string()])
            .await?;
        let february_total = totals.first().and_then(|grid| first_cell(grid, 0));
        let march_total = totals.get(1).and_then(|grid| first_cell(grid, 0));
        span.pb_inc(1);

        span.pb_set_message("Restructuring spreadsheet");
        let before = self.sheets.get_spreadsheet(spreadsheet).await?;
        let edits = restructure_edits(&before)?;
        self.sheets.apply_batch_edits(spreadsheet, &edits).await?;
        let after = self.sheets.get_spreadsheet(spreadsheet).await?;
        span.pb_inc(1);

        info!(title = %after.title, sheets = after.sheets.len(), "Walkthrough completed");

        Ok(WalkthroughReport {
            spreadsheet: after,
            appended_total,
            february_total,
            march_total,
        })
    }
}

fn expenses() -> ValueGrid {
    vec![
        vec!["Expenses February".into()],
        vec!["books".into(), 30.into()],
        vec!["pens".into(), 10.into()],
        vec!["Expenses March".into()],
        vec!["clothes".into(), 20.into()],
        vec!["shoes".into(), 5.into()],
    ]
}

fn monthly_totals() -> Vec<RangeValues> {
    vec![
        RangeValues::new("D1", vec![vec!["February Total".into(), "=B2+B3".into()]]),
        RangeValues::new("D4", vec![vec!["March Total".into(), "=B5+B6".into()]]),
    ]
}

/// Add a sheet, copy the first row's two leading cells into it and rename
/// the spreadsheet.
fn restructure_edits(spreadsheet: &SpreadsheetSummary) -> Result<Vec<StructuralEdit>> {
    let source_sheet = spreadsheet
        .sheets
        .first()
        .map(|sheet| sheet.sheet_id)
        .ok_or_else(|| AppError::Remote(format!("Spreadsheet {} has no sheets", spreadsheet.id)))?;
    let new_sheet = spreadsheet.next_sheet_id();

    let header = |sheet_id| GridRect {
        sheet_id,
        start_row: 0,
        end_row: 1,
        start_column: 0,
        end_column: 2,
    };

    Ok(vec![
        StructuralEdit::AddSheet {
            title: format!("AutomaticSheet{}", spreadsheet.sheets.len()),
            sheet_id: Some(new_sheet),
        },
        StructuralEdit::CopyPaste {
            source: header(source_sheet),
            destination: header(new_sheet),
            paste_type: PasteType::Values,
        },
        StructuralEdit::RenameSpreadsheet {
            title: RENAMED_TITLE.to_string(),
        },
    ])
}

fn first_cell(rows: &[Vec<CellValue>], column: usize) -> Option<CellValue> {
    rows.first().and_then(|row| row.get(column)).cloned()
}
