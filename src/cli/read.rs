use crate::config::Config;
use crate::error::Result;
use crate::quickstart::print_roster;
use crate::sheets::{SheetsClient, SpreadsheetId};
use std::io;

pub async fn execute(spreadsheet_id: Option<&str>, range: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let quickstart = &config.quickstart;

    let spreadsheet = SpreadsheetId::from(spreadsheet_id.unwrap_or(&quickstart.spreadsheet_id));
    let range = range.unwrap_or(&quickstart.range);

    let sheets = SheetsClient::new(&config.google, quickstart.value_render_option).await?;
    print_roster(&sheets, &spreadsheet, range, &mut io::stdout().lock()).await
}
