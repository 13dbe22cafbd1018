use crate::config::Config;
use crate::error::{AppError, Result};
use crate::sheets::{InsertDataOption, SheetsClient, SpreadsheetId};
use crate::walkthrough::Walkthrough;
use dialoguer::Confirm;
use tracing::info;

pub async fn execute(spreadsheet_id: Option<&str>, yes: bool, overwrite: bool) -> Result<()> {
    let existing = spreadsheet_id.map(SpreadsheetId::from);

    if let Some(id) = &existing {
        if !yes && !confirm_overwrite(id)? {
            info!("Walkthrough cancelled");
            return Ok(());
        }
    }

    let config = Config::load()?;
    let sheets = SheetsClient::new(&config.google, config.quickstart.value_render_option).await?;

    let insert = if overwrite {
        InsertDataOption::Overwrite
    } else {
        InsertDataOption::InsertRows
    };
    let walkthrough = Walkthrough::new(sheets).with_insert(insert);
    let spreadsheet = walkthrough.prepare(existing).await?;
    let report = walkthrough.run(&spreadsheet).await?;

    info!(
        url = %spreadsheet.url(),
        title = %report.spreadsheet.title,
        sheets = report.spreadsheet.sheets.len(),
        total = ?report.appended_total,
        "Walkthrough finished"
    );

    Ok(())
}

fn confirm_overwrite(id: &SpreadsheetId) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!(
            "Overwrite cells and rename spreadsheet {}?",
            id.url()
        ))
        .default(false)
        .interact()
        .map_err(|e| AppError::Other(e.into()))
}
